//! Extraction of downloaded archives into a directory.
//!
//! Every entry path goes through the zip-slip check before anything is
//! written. Unix permission bits stored in the archive are preserved so the
//! extracted executables stay runnable.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::detect::{ArchiveFormat, detect_from_reader};
use crate::error::{Error, Result};
#[cfg(feature = "tar")]
use crate::sanitize::check_symlink_target;
#[cfg(any(feature = "tar", feature = "zip"))]
use crate::sanitize::sanitize_path;

/// Summary of one extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractReport {
    pub format: ArchiveFormat,
    pub entry_count: usize,
    pub total_bytes: u64,
}

impl ExtractReport {
    fn new(format: ArchiveFormat) -> Self {
        Self {
            format,
            entry_count: 0,
            total_bytes: 0,
        }
    }
}

fn failed(path: &Path) -> impl FnOnce(io::Error) -> Error + '_ {
    move |source| Error::ExtractionFailed {
        path: path.to_path_buf(),
        source,
    }
}

/// Extract the archive at `archive` into `destination`, sniffing its format.
pub fn extract_file(
    archive: impl AsRef<Path>,
    destination: impl AsRef<Path>,
) -> Result<ExtractReport> {
    let archive = archive.as_ref();
    let destination = destination.as_ref();

    let mut file = File::open(archive).map_err(failed(archive))?;
    let format = detect_from_reader(&mut file)
        .map_err(failed(archive))?
        .ok_or_else(|| Error::UnsupportedFormat(archive.to_path_buf()))?;
    fs::create_dir_all(destination).map_err(failed(destination))?;

    debug!("extracting {} ({format}) into {}", archive.display(), destination.display());
    let report = match format {
        #[cfg(feature = "tar")]
        ArchiveFormat::TarGz => {
            let reader = flate2::read::GzDecoder::new(BufReader::new(file));
            untar(reader, destination, format)?
        }
        #[cfg(feature = "tar")]
        ArchiveFormat::Tar => untar(BufReader::new(file), destination, format)?,
        #[cfg(feature = "zip")]
        ArchiveFormat::Zip => unzip(file, destination)?,
        #[allow(unreachable_patterns)]
        _ => return Err(Error::UnsupportedFormat(archive.to_path_buf())),
    };
    debug!(
        entries = report.entry_count,
        bytes = report.total_bytes,
        "extracted {}",
        archive.display()
    );
    Ok(report)
}

#[cfg(feature = "tar")]
fn untar<R: io::Read>(
    reader: R,
    destination: &Path,
    format: ArchiveFormat,
) -> Result<ExtractReport> {
    let mut archive = tar::Archive::new(reader);
    archive.set_preserve_permissions(true);
    archive.set_overwrite(true);

    let mut report = ExtractReport::new(format);
    let entries = archive.entries().map_err(|e| Error::Corrupted(e.to_string()))?;
    for entry in entries {
        let mut entry = entry.map_err(|e| Error::Corrupted(e.to_string()))?;
        let raw: PathBuf = entry.path().map_err(|_| Error::InvalidPath)?.into_owned();
        let target = sanitize_path(&raw, destination)?;

        let kind = entry.header().entry_type();
        if kind.is_symlink() || kind.is_hard_link() {
            let link = entry
                .link_name()
                .map_err(|_| Error::InvalidPath)?
                .ok_or(Error::InvalidPath)?
                .into_owned();
            if kind.is_symlink() {
                check_symlink_target(&link, &target, destination)?;
            } else {
                sanitize_path(&link, destination)?;
            }
        }

        entry.unpack_in(destination).map_err(failed(&target))?;
        report.entry_count += 1;
        report.total_bytes += entry.size();
    }
    Ok(report)
}

#[cfg(feature = "zip")]
fn unzip(file: File, destination: &Path) -> Result<ExtractReport> {
    let mut archive =
        zip::ZipArchive::new(BufReader::new(file)).map_err(|e| Error::Corrupted(e.to_string()))?;

    let mut report = ExtractReport::new(ArchiveFormat::Zip);
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| Error::Corrupted(e.to_string()))?;
        let raw = PathBuf::from(entry.name());
        let target = sanitize_path(&raw, destination)?;

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(failed(&target))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(failed(parent))?;
            }
            let mut out = File::create(&target).map_err(failed(&target))?;
            io::copy(&mut entry, &mut out).map_err(failed(&target))?;

            #[cfg(unix)]
            if let Some(mode) = entry.unix_mode() {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(&target, fs::Permissions::from_mode(mode & 0o7777))
                    .map_err(failed(&target))?;
            }
        }
        report.entry_count += 1;
        report.total_bytes += entry.size();
    }
    Ok(report)
}
