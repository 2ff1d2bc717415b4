//! The installation orchestrator.
//!
//! Steps, in order: resolve the variant, lock (optional), compare the marker
//! with the resolved URL, and only when they differ: invalidate the marker,
//! empty and repopulate the directory, normalize its layout, prune, run hooks,
//! and write the marker last. An interrupted run leaves no marker, so the next call
//! starts over.

use std::path::{Path, PathBuf};

use cmkup_archive::{LayoutError, find_root};
use cmkup_catalog::Catalog;
use cmkup_fs::InstallLock;
use cmkup_platform::HostDescriptor;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, InstallerConfig, LocationKey, LockStrategy};
use crate::error::{InstallError, InstallTarget, Result};
use crate::hooks::{HookContext, InstallHook};
use crate::location::{install_dir, lock_file};
use crate::marker::InstallationCache;
use crate::source::ArchiveInstaller;
use crate::tool::{SuiteTool, ToolPath, ToolSpec};

/// Vendor artifact left by some extractors; never needed.
const TIMESTAMP_FILE: &str = ".timestamp";

pub struct Installer<A: ArchiveInstaller> {
    catalog: Catalog,
    tools_root: PathBuf,
    archives: A,
    location_key: LocationKey,
    lock: LockStrategy,
    prune: Vec<String>,
    hooks: Vec<Box<dyn InstallHook>>,
}

impl<A: ArchiveInstaller> Installer<A> {
    pub fn new(catalog: Catalog, tools_root: impl Into<PathBuf>, archives: A) -> Self {
        let defaults = InstallerConfig::default();
        Self {
            catalog,
            tools_root: tools_root.into(),
            archives,
            location_key: defaults.location_key,
            lock: defaults.lock,
            prune: defaults.prune,
            hooks: vec![],
        }
    }

    /// Build from a loaded configuration, resolving its tools root.
    pub fn from_config(
        catalog: Catalog,
        config: &InstallerConfig,
        archives: A,
    ) -> std::result::Result<Self, ConfigError> {
        let root = config.resolved_tools_root()?;
        Ok(Self::new(catalog, root, archives)
            .location_key(config.location_key)
            .lock(config.lock)
            .prune(config.prune.iter().cloned()))
    }

    pub fn location_key(mut self, key: LocationKey) -> Self {
        self.location_key = key;
        self
    }

    pub fn lock(mut self, lock: LockStrategy) -> Self {
        self.lock = lock;
        self
    }

    pub fn prune(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.prune = names.into_iter().collect();
        self
    }

    pub fn hook<H: InstallHook + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn tools_root(&self) -> &Path {
        &self.tools_root
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn key<'t>(&self, tool: &'t ToolSpec) -> &'t str {
        match self.location_key {
            LocationKey::Id => tool.id(),
            LocationKey::Name => tool.name(),
        }
    }

    /// Deterministic installation directory of `tool`.
    pub fn install_dir(&self, tool: &ToolSpec) -> PathBuf {
        install_dir(&self.tools_root, self.key(tool))
    }

    /// Like [`ensure_installed`](Self::ensure_installed), for a host given by
    /// its raw `os.name` and `os.arch` strings.
    pub fn ensure_installed_on(
        &self,
        tool: &ToolSpec,
        os_name: &str,
        arch: &str,
    ) -> Result<ToolPath> {
        let Ok(host) = HostDescriptor::from_raw(os_name, arch) else {
            return Err(InstallError::UnknownPlatform {
                tool: tool.name().to_string(),
                id: tool.id().to_string(),
                os_name: os_name.to_string(),
                arch: arch.to_string(),
            });
        };
        self.ensure_installed(tool, &host)
    }

    /// Make sure the archive `tool` resolves to on `host` is installed, and
    /// return where.
    pub fn ensure_installed(&self, tool: &ToolSpec, host: &HostDescriptor) -> Result<ToolPath> {
        let target = InstallTarget::new(tool, host);
        let resolution = self.catalog.resolve(tool.id(), host).map_err(|e| match e {
            cmkup_catalog::Error::NoMatchingVersion { .. } => InstallError::NoMatchingVersion {
                target: target.clone(),
            },
            cmkup_catalog::Error::NoMatchingVariant { available, .. } => {
                InstallError::NoMatchingVariant {
                    target: target.clone(),
                    available,
                }
            }
            source => InstallError::Catalog {
                target: target.clone(),
                source,
            },
        })?;
        let url = resolution.url();
        let fs_err = |source| InstallError::Filesystem {
            target: target.clone(),
            source,
        };

        let dir = self.install_dir(tool);
        let _lock = match self.lock {
            LockStrategy::None => None,
            LockStrategy::Advisory => {
                let path = lock_file(&self.tools_root, self.key(tool));
                debug!("waiting for {}", path.display());
                Some(InstallLock::acquire(&path).map_err(fs_err)?)
            }
        };

        let cache = InstallationCache::new(&dir);
        if cache.is_current(url).map_err(fs_err)? {
            debug!("{target} is up to date in {}", dir.display());
            return Ok(ToolPath::new(dir, url, host.family()));
        }

        cache.invalidate().map_err(fs_err)?;
        // Leftovers of an earlier or interrupted install would make the layout ambiguous.
        cmkup_fs::empty_dir(&dir).map_err(fs_err)?;
        info!("installing {target} from {url} into {}", dir.display());
        let installed = self
            .archives
            .install_archive(url, &dir)
            .map_err(|source| InstallError::Transport {
                target: target.clone(),
                url: url.to_string(),
                source,
            })?;
        if !installed {
            warn!("{url} produced no files in {}; leaving it unmarked", dir.display());
            return Ok(ToolPath::new(dir, url, host.family()));
        }

        cmkup_fs::remove_best_effort(dir.join(TIMESTAMP_FILE));
        self.normalize(&dir, &target)?;

        let ctx = HookContext {
            tool,
            host,
            url,
            install_dir: &dir,
        };
        for hook in &self.hooks {
            hook.post_normalize(&ctx).map_err(|source| InstallError::Hook {
                target: target.clone(),
                hook: hook.name(),
                source,
            })?;
        }

        cache.record(url).map_err(fs_err)?;
        info!("installed {target}");

        for hook in &self.hooks {
            if let Err(e) = hook.post_commit(&ctx) {
                warn!("post-commit hook `{}` failed for {target}: {e}", hook.name());
            }
        }

        Ok(ToolPath::new(dir, url, host.family()))
    }

    /// Pull the single installation root found below `dir` up into `dir`.
    fn normalize(&self, dir: &Path, target: &InstallTarget) -> Result<()> {
        let layout = find_root(dir, SuiteTool::Cmake.file_stem()).map_err(|e| match e {
            LayoutError::NotFound { tree } => InstallError::UnrecognizedArchiveFormat {
                target: target.clone(),
                tree,
            },
            LayoutError::Ambiguous { candidates } => InstallError::AmbiguousArchiveFormat {
                target: target.clone(),
                candidates,
            },
            LayoutError::Scan(source) => InstallError::Filesystem {
                target: target.clone(),
                source,
            },
        })?;
        if !layout.is_nested_in(dir) {
            return Ok(());
        }

        let root = layout.root().to_path_buf();
        debug!("pulling {} up into {}", root.display(), dir.display());
        // Extras at the top level are not part of the installation root.
        for name in &self.prune {
            let extra = dir.join(name);
            if !root.starts_with(&extra) {
                cmkup_fs::remove_best_effort(&extra);
            }
        }
        cmkup_fs::pull_up(&root, dir).map_err(|source| InstallError::Filesystem {
            target: target.clone(),
            source,
        })?;
        if let Some(vendor) = root.parent() {
            cmkup_fs::remove_empty_dirs(vendor, dir);
        }
        Ok(())
    }
}
