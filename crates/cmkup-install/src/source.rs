use std::path::Path;

use cmkup_fetch::{FetchOptions, Fetcher, HttpClient};
use tracing::{debug, info};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Populates an installation directory from an archive URL.
pub trait ArchiveInstaller {
    /// Download `url` and extract it into `destination`, creating it if
    /// needed. Returns whether anything was extracted.
    fn install_archive(&self, url: &str, destination: &Path) -> Result<bool, BoxError>;
}

impl<T: ArchiveInstaller + ?Sized> ArchiveInstaller for &T {
    fn install_archive(&self, url: &str, destination: &Path) -> Result<bool, BoxError> {
        (**self).install_archive(url, destination)
    }
}

/// Downloads the archive next to the destination, then extracts it.
pub struct DownloadExtract<C: HttpClient> {
    fetcher: Fetcher<C>,
    options: FetchOptions,
}

impl<C: HttpClient> DownloadExtract<C> {
    pub fn new(client: C) -> Self {
        Self {
            fetcher: Fetcher::new(client),
            options: FetchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }
}

#[cfg(feature = "reqwest")]
impl DownloadExtract<cmkup_fetch::ReqwestClient> {
    /// Default transport: blocking `reqwest` with an optional overall timeout.
    pub fn reqwest(timeout: Option<std::time::Duration>) -> cmkup_fetch::Result<Self> {
        Ok(Self::new(cmkup_fetch::ReqwestClient::with_timeout(timeout)?))
    }
}

/// Last path segment of `url`, without query or fragment.
fn archive_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => "download",
    }
}

impl<C: HttpClient> ArchiveInstaller for DownloadExtract<C> {
    fn install_archive(&self, url: &str, destination: &Path) -> Result<bool, BoxError> {
        std::fs::create_dir_all(destination)?;
        // Stage the download outside the tree that will be scanned.
        let staging_parent = destination.parent().unwrap_or(destination);
        let staging = tempfile::Builder::new().prefix(".download.").tempdir_in(staging_parent)?;
        let archive = staging.path().join(archive_name(url));

        info!("downloading {url}");
        self.fetcher.fetch(url, &archive, &self.options)?;

        let report = cmkup_archive::extract_file(&archive, destination)?;
        debug!(
            "unpacked {} entries ({} bytes, {}) to {}",
            report.entry_count,
            report.total_bytes,
            report.format,
            destination.display()
        );
        Ok(report.entry_count > 0)
    }
}
