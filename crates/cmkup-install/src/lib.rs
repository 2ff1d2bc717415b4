//! Idempotent installation of catalog-published tool versions.
//!
//! [`Installer::ensure_installed`] resolves the archive for a host, installs it
//! into a deterministic directory below the tools root, normalizes the layout
//! and records the source URL in an `.installedFrom` marker. A later call for
//! the same URL returns without touching the network.
//!
//! Downloading and extracting is delegated to an [`ArchiveInstaller`];
//! [`DownloadExtract`] is the default one.

mod config;
mod error;
mod hooks;
mod location;
mod marker;
mod pipeline;
mod source;
mod tool;

pub use config::{ConfigError, InstallerConfig, LocationKey, LockStrategy};
pub use error::{HookError, InstallError, InstallTarget, Result};
pub use hooks::{ExecutableBitsHook, HookContext, InstallHook};
pub use location::sanitize;
pub use marker::{InstallationCache, MARKER_FILE};
pub use pipeline::Installer;
pub use source::{ArchiveInstaller, BoxError, DownloadExtract};
pub use tool::{PATH_CONTRIBUTION, SuiteTool, ToolPath, ToolSpec};
