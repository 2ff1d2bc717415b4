//! Filesystem primitives used while populating a tool installation.
//!
//! - [`atomic_write`] / [`read_optional`] for the install marker
//! - [`InstallLock`] advisory lock keyed by installation path
//! - [`list_matching`] glob scan of an extracted tree
//! - [`empty_dir`] clears a stale installation before it is repopulated
//! - [`pull_up`], [`remove_best_effort`], [`remove_empty_dirs`] for layout normalization

mod atomic;
mod error;
mod lock;
mod scan;
mod tree;

pub use atomic::{AtomicWriteOptions, atomic_write, read_optional};
pub use error::{Error, Result};
pub use lock::InstallLock;
pub use scan::list_matching;
pub use tree::{empty_dir, pull_up, remove_best_effort, remove_empty_dirs};
