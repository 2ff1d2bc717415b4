use std::fmt;
use std::path::PathBuf;

use crate::Variant;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("failed to read catalog '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no version `{id}` in the download catalog")]
    NoMatchingVersion { id: String },

    #[error("version `{id}` has no download for {host_os} ({host_arch}); available: {available}")]
    NoMatchingVariant {
        id: String,
        host_os: String,
        host_arch: String,
        available: Available,
    },
}

/// The variants an id was published with, listed for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Available(pub Vec<Variant>);

impl fmt::Display for Available {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("none");
        }
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "[{}/{} {}]", v.os, v.arch, v.url)?;
        }
        Ok(())
    }
}
