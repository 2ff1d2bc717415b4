//! Hook traits for the install lifecycle.
//!
//! Hooks inject platform or policy behavior without touching the
//! orchestration steps themselves.

use std::path::Path;

use cmkup_platform::HostDescriptor;

use crate::error::HookError;
use crate::tool::ToolSpec;

/// What a hook is told about the installation in progress.
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
    pub tool: &'a ToolSpec,
    pub host: &'a HostDescriptor,
    pub url: &'a str,
    /// Normalized installation directory, containing `bin/` and `share/`.
    pub install_dir: &'a Path,
}

pub trait InstallHook: Send + Sync {
    /// Name of this hook for error reporting.
    fn name(&self) -> &'static str;

    /// Called after the layout is normalized, before the marker is written.
    /// An error aborts the installation and leaves it unmarked.
    fn post_normalize(&self, _ctx: &HookContext<'_>) -> Result<(), HookError> {
        Ok(())
    }

    /// Called after the marker is written. Errors are logged only.
    fn post_commit(&self, _ctx: &HookContext<'_>) -> Result<(), HookError> {
        Ok(())
    }
}

/// Marks every regular file in `bin/` executable (`a+x`).
///
/// Zip archives carry no unix permissions, so tools extracted from them would
/// otherwise not run. No-op on non-unix platforms.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutableBitsHook;

impl InstallHook for ExecutableBitsHook {
    fn name(&self) -> &'static str {
        "executable_bits"
    }

    #[cfg(unix)]
    fn post_normalize(&self, ctx: &HookContext<'_>) -> Result<(), HookError> {
        use std::os::unix::fs::PermissionsExt;

        let bin = ctx.install_dir.join("bin");
        let io = |path: &Path| {
            let path = path.to_path_buf();
            move |source| HookError::Io { path, source }
        };
        let entries = match std::fs::read_dir(&bin) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(io(&bin)(e)),
        };
        for entry in entries {
            let entry = entry.map_err(io(&bin))?;
            let path = entry.path();
            let meta = std::fs::metadata(&path).map_err(io(&path))?;
            if !meta.is_file() {
                continue;
            }
            let mut perms = meta.permissions();
            perms.set_mode(perms.mode() | 0o111);
            std::fs::set_permissions(&path, perms).map_err(io(&path))?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn post_normalize(&self, _ctx: &HookContext<'_>) -> Result<(), HookError> {
        Ok(())
    }
}
