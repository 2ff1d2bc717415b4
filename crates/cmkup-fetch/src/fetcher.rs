use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{FetchError, Result};
use crate::http::HttpClient;
use crate::options::{FetchOptions, FetchPhase, Progress};

const CHUNK: usize = 64 * 1024;

/// Downloads URLs through an [`HttpClient`].
pub struct Fetcher<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Download `url` to `destination`.
    ///
    /// The body is streamed into a staging file in the destination's parent
    /// directory and renamed over `destination` once complete.
    pub fn fetch(&self, url: &str, destination: &Path, options: &FetchOptions) -> Result<PathBuf> {
        validate_url(url)?;
        if destination.is_dir() {
            return Err(FetchError::DestinationIsDirectory(destination.to_path_buf()));
        }
        let parent = match destination.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(FetchError::io(parent))?;

        options.report(Progress {
            phase: FetchPhase::Connecting,
            bytes_downloaded: 0,
            total_bytes: None,
        });
        let body = self.open(url, options)?;
        let total_bytes = body.content_length;

        let mut staging = tempfile::Builder::new()
            .prefix(".fetch.")
            .suffix(".part")
            .tempfile_in(parent)
            .map_err(FetchError::io(parent))?;

        let written =
            copy_with_progress(url, body.reader, staging.as_file_mut(), total_bytes, options)?;
        staging.as_file_mut().flush().map_err(FetchError::io(staging.path()))?;

        options.report(Progress {
            phase: FetchPhase::Committing,
            bytes_downloaded: written,
            total_bytes,
        });
        staging
            .persist(destination)
            .map_err(|e| FetchError::Io {
                path: destination.to_path_buf(),
                source: e.error,
            })?;

        debug!("downloaded {written} bytes from {url} to {}", destination.display());
        options.report(Progress {
            phase: FetchPhase::Completed,
            bytes_downloaded: written,
            total_bytes,
        });
        Ok(destination.to_path_buf())
    }

    /// Download `url` fully into memory.
    pub fn fetch_bytes(&self, url: &str, options: &FetchOptions) -> Result<Vec<u8>> {
        validate_url(url)?;
        let body = self.open(url, options)?;
        let mut buf = Vec::with_capacity(body.content_length.unwrap_or(0) as usize);
        copy_with_progress(url, body.reader, &mut buf, body.content_length, options)?;
        Ok(buf)
    }

    fn open(&self, url: &str, options: &FetchOptions) -> Result<crate::http::Body> {
        debug!("GET {url}");
        self.client
            .get(url, &options.headers)
            .map_err(|e| FetchError::Network {
                url: url.to_string(),
                source: Box::new(e),
            })
    }
}

fn validate_url(url: &str) -> Result<()> {
    let scheme_ok = url
        .split_once("://")
        .is_some_and(|(scheme, rest)| !scheme.is_empty() && !rest.is_empty());
    if scheme_ok {
        Ok(())
    } else {
        Err(FetchError::InvalidUrl(url.to_string()))
    }
}

fn copy_with_progress(
    url: &str,
    mut reader: Box<dyn Read + Send>,
    writer: &mut dyn Write,
    total_bytes: Option<u64>,
    options: &FetchOptions,
) -> Result<u64> {
    let mut buf = vec![0u8; CHUNK];
    let mut written = 0u64;
    loop {
        let n = reader.read(&mut buf).map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n]).map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;
        written += n as u64;
        options.report(Progress {
            phase: FetchPhase::Downloading,
            bytes_downloaded: written,
            total_bytes,
        });
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_validation() {
        assert!(validate_url("https://example.com/a.tar.gz").is_ok());
        assert!(validate_url("file:///tmp/a").is_ok());
        assert!(matches!(validate_url("example.com/a"), Err(FetchError::InvalidUrl(_))));
        assert!(matches!(validate_url("://x"), Err(FetchError::InvalidUrl(_))));
    }
}
