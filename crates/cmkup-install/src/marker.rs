use std::fs;
use std::path::{Path, PathBuf};

use cmkup_fs::{AtomicWriteOptions, atomic_write, read_optional};
use tracing::debug;

/// Name of the file recording the URL an installation was populated from.
pub const MARKER_FILE: &str = ".installedFrom";

/// The `.installedFrom` marker of one installation directory.
///
/// The marker is the only durable state: a directory without it is treated as
/// not installed, whatever it contains.
#[derive(Debug, Clone)]
pub struct InstallationCache {
    marker: PathBuf,
}

impl InstallationCache {
    pub fn new(install_dir: impl AsRef<Path>) -> Self {
        Self {
            marker: install_dir.as_ref().join(MARKER_FILE),
        }
    }

    pub fn marker_path(&self) -> &Path {
        &self.marker
    }

    /// URL recorded by the last completed installation, trailing whitespace
    /// removed.
    pub fn installed_from(&self) -> cmkup_fs::Result<Option<String>> {
        Ok(read_optional(&self.marker)?.map(|s| s.trim_end().to_string()))
    }

    pub fn is_current(&self, url: &str) -> cmkup_fs::Result<bool> {
        Ok(self.installed_from()?.as_deref() == Some(url))
    }

    /// Drop the marker before the directory contents change.
    pub fn invalidate(&self) -> cmkup_fs::Result<()> {
        match fs::remove_file(&self.marker) {
            Ok(()) => {
                debug!("removed stale marker {}", self.marker.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(cmkup_fs::Error::Write {
                path: self.marker.clone(),
                source: e,
            }),
        }
    }

    pub fn record(&self, url: &str) -> cmkup_fs::Result<()> {
        atomic_write(&self.marker, url.as_bytes(), AtomicWriteOptions::new().sync(true))
    }
}
