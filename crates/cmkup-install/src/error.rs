use std::fmt;
use std::path::PathBuf;

use cmkup_catalog::Available;
use cmkup_platform::HostDescriptor;
use thiserror::Error;

use crate::source::BoxError;
use crate::tool::ToolSpec;

pub type Result<T> = std::result::Result<T, InstallError>;

/// What an installation attempt was for; attached to every [`InstallError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    pub tool: String,
    pub id: String,
    pub host_os: String,
    pub host_arch: String,
}

impl InstallTarget {
    pub fn new(tool: &ToolSpec, host: &HostDescriptor) -> Self {
        Self {
            tool: tool.name().to_string(),
            id: tool.id().to_string(),
            host_os: host.os_name().to_string(),
            host_arch: host.arch().to_string(),
        }
    }
}

impl fmt::Display for InstallTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} on {} ({})", self.tool, self.id, self.host_os, self.host_arch)
    }
}

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("{tool} {id}: unknown platform `{os_name}` ({arch})")]
    UnknownPlatform {
        tool: String,
        id: String,
        os_name: String,
        arch: String,
    },

    #[error("{target}: no such version in the download catalog")]
    NoMatchingVersion { target: InstallTarget },

    #[error("{target}: no compatible download; available: {available}")]
    NoMatchingVariant {
        target: InstallTarget,
        available: Available,
    },

    #[error("{target}: catalog lookup failed")]
    Catalog {
        target: InstallTarget,
        #[source]
        source: cmkup_catalog::Error,
    },

    #[error(
        "{target}: unrecognized archive format, no installation root below {}",
        .tree.display()
    )]
    UnrecognizedArchiveFormat {
        target: InstallTarget,
        tree: PathBuf,
    },

    #[error("{target}: ambiguous archive format, candidates: {}", list(.candidates))]
    AmbiguousArchiveFormat {
        target: InstallTarget,
        candidates: Vec<PathBuf>,
    },

    #[error("{target}: failed to install {url}")]
    Transport {
        target: InstallTarget,
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("{target}: filesystem operation failed")]
    Filesystem {
        target: InstallTarget,
        #[source]
        source: cmkup_fs::Error,
    },

    #[error("{target}: hook `{hook}` failed")]
    Hook {
        target: InstallTarget,
        hook: &'static str,
        #[source]
        source: HookError,
    },
}

fn list(paths: &[PathBuf]) -> String {
    let shown: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
    shown.join(", ")
}

impl InstallError {
    /// The tool, id and host the failed attempt was for.
    pub fn target(&self) -> Option<&InstallTarget> {
        match self {
            Self::UnknownPlatform { .. } => None,
            Self::NoMatchingVersion { target }
            | Self::NoMatchingVariant { target, .. }
            | Self::Catalog { target, .. }
            | Self::UnrecognizedArchiveFormat { target, .. }
            | Self::AmbiguousArchiveFormat { target, .. }
            | Self::Transport { target, .. }
            | Self::Filesystem { target, .. }
            | Self::Hook { target, .. } => Some(target),
        }
    }
}

#[derive(Debug, Error)]
pub enum HookError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Failed(String),
}
