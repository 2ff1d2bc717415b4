//! Archive handling for cmkup installations.
//!
//! - `detect.rs` - Format sniffing from magic bytes
//! - `sanitize.rs` - Entry path sanitization (zip-slip prevention)
//! - `extract.rs` - Per-format extraction into a directory
//! - `layout.rs` - Locating the installation root inside an extracted tree

pub use detect::{ArchiveFormat, detect_format};
pub use error::{Error, Result};
pub use extract::{ExtractReport, extract_file};
pub use layout::{Layout, LayoutError, find_root};

mod detect;
mod error;
mod extract;
mod layout;
mod sanitize;
