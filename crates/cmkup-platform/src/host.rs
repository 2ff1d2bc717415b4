//! Description of the host a tool is resolved for.

use std::fmt;

use crate::error::{Error, Result};
use crate::{OsFamily, arch};

/// The execution target of a resolution: its OS family and raw architecture.
///
/// Recomputed for every resolution; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDescriptor {
    os_name: String,
    family: OsFamily,
    arch: String,
}

impl HostDescriptor {
    /// Describe a host from its raw `os.name` and `os.arch` strings.
    ///
    /// Fails with [`Error::UnknownOs`] when `os_name` does not classify.
    pub fn from_raw(os_name: impl Into<String>, arch: impl Into<String>) -> Result<Self> {
        let os_name = os_name.into();
        let family = OsFamily::classify(&os_name).ok_or_else(|| Error::UnknownOs(os_name.clone()))?;
        Ok(Self {
            os_name,
            family,
            arch: arch.into(),
        })
    }

    /// Describe a host by family directly, using its canonical OS name.
    pub fn new(family: OsFamily, arch: impl Into<String>) -> Self {
        Self {
            os_name: family.canonical_name().to_string(),
            family,
            arch: arch.into(),
        }
    }

    /// Describe the machine this process runs on.
    pub fn detect() -> Result<Self> {
        let unsupported = || Error::UnsupportedHost {
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        };
        let family = match std::env::consts::OS {
            "linux" => OsFamily::Linux,
            "windows" => OsFamily::Windows,
            "macos" => OsFamily::Macos,
            "solaris" | "illumos" => OsFamily::SunOs,
            "freebsd" => OsFamily::FreeBsd,
            "aix" => OsFamily::Aix,
            _ => return Err(unsupported()),
        };
        let arch = arch::detect(family).ok_or_else(unsupported)?;
        Ok(Self::new(family, arch))
    }

    pub fn os_name(&self) -> &str {
        &self.os_name
    }

    pub fn family(&self) -> OsFamily {
        self.family
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }
}

impl fmt::Display for HostDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.os_name, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_classifies() {
        let host = HostDescriptor::from_raw("Windows 11", "amd64").unwrap();
        assert_eq!(host.family(), OsFamily::Windows);
        assert_eq!(host.os_name(), "Windows 11");
        assert_eq!(host.arch(), "amd64");
    }

    #[test]
    fn from_raw_rejects_unknown_os() {
        let err = HostDescriptor::from_raw("Plan 9", "386").unwrap_err();
        assert!(matches!(err, Error::UnknownOs(ref raw) if raw == "Plan 9"));
        assert!(err.to_string().contains("Plan 9"));
    }

    #[test]
    fn detect_matches_build_target() {
        match HostDescriptor::detect() {
            Ok(host) => {
                assert_eq!(OsFamily::classify(host.os_name()), Some(host.family()));
                assert!(!host.arch().is_empty());
            }
            Err(err) => assert!(matches!(err, Error::UnsupportedHost { .. })),
        }
    }

    #[test]
    fn display() {
        let host = HostDescriptor::new(OsFamily::Linux, "aarch64");
        assert_eq!(host.to_string(), "Linux (aarch64)");
    }
}
