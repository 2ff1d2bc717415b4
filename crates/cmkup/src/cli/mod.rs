use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use cmkup_catalog::Catalog;
use cmkup_fetch::{FetchOptions, Fetcher, ReqwestClient};
use cmkup_install::{
    DownloadExtract, ExecutableBitsHook, InstallationCache, Installer, InstallerConfig, LocationKey,
    ToolPath, ToolSpec, sanitize,
};
use cmkup_platform::HostDescriptor;
use tracing::debug;

use app::{App, CatalogArg, Commands, HostArg, InstallArg, LocationArg, ResolveArg, WhichArg};

pub mod app;

pub fn run(app: App) -> Result<()> {
    match app.cmd {
        Commands::Resolve(arg) => resolve(arg),
        Commands::Install(arg) => install(arg),
        Commands::Which(arg) => which(arg),
    }
}

fn resolve(arg: ResolveArg) -> Result<()> {
    let host = host(&arg.host)?;
    let catalog = load_catalog(&arg.catalog, None)?;
    let resolution = catalog.resolve(&arg.id, &host)?;
    println!("{}", resolution.url());
    Ok(())
}

fn install(arg: InstallArg) -> Result<()> {
    let config = InstallerConfig::discover(arg.location.config.as_deref())
        .context("Failed to load config")?;
    let host = host(&arg.host)?;
    let catalog = load_catalog(&arg.catalog, config.timeout())?;
    let root = tools_root(&arg.location, &config)?;

    let archives = DownloadExtract::reqwest(config.timeout())?;
    let installer = Installer::new(catalog, &root, archives)
        .location_key(config.location_key)
        .lock(arg.lock.unwrap_or(config.lock))
        .prune(config.prune.iter().cloned())
        .hook(ExecutableBitsHook);

    let tool = ToolSpec::new(&arg.location.name, &arg.id);
    let path = installer.ensure_installed(&tool, &host)?;
    if arg.env {
        let (key, bin) = path.env_contribution();
        println!("{key}={}", bin.display());
    } else {
        println!("{}", path.bin_dir().display());
    }
    Ok(())
}

fn which(arg: WhichArg) -> Result<()> {
    let config = InstallerConfig::discover(arg.location.config.as_deref())
        .context("Failed to load config")?;
    let root = tools_root(&arg.location, &config)?;
    let key = match config.location_key {
        LocationKey::Id => &arg.id,
        LocationKey::Name => &arg.location.name,
    };
    let dir = root.join(sanitize(key));

    let cache = InstallationCache::new(&dir);
    let Some(url) = cache.installed_from()? else {
        bail!("{} {} is not installed in {}", arg.location.name, arg.id, root.display());
    };
    let family = HostDescriptor::detect()?.family();
    let path = ToolPath::new(dir, url, family);
    println!("{}", path.executable(arg.tool).display());
    Ok(())
}

fn tools_root(location: &LocationArg, config: &InstallerConfig) -> Result<PathBuf> {
    match &location.root {
        Some(root) => Ok(root.clone()),
        None => Ok(config.resolved_tools_root()?),
    }
}

/// Explicit `--os`/`--arch` win; missing parts come from this machine.
fn host(arg: &HostArg) -> Result<HostDescriptor> {
    if let (Some(os), Some(arch)) = (&arg.os, &arg.arch) {
        return Ok(HostDescriptor::from_raw(os.as_str(), arch.as_str())?);
    }
    let detected = HostDescriptor::detect()
        .context("Failed to describe this machine; pass --os and --arch")?;
    let os = arg.os.as_deref().unwrap_or(detected.os_name());
    let arch = arg.arch.as_deref().unwrap_or(detected.arch());
    Ok(HostDescriptor::from_raw(os, arch)?)
}

fn load_catalog(arg: &CatalogArg, timeout: Option<std::time::Duration>) -> Result<Catalog> {
    let source = arg.catalog.as_str();
    if !source.contains("://") {
        return Catalog::from_path(Path::new(source))
            .with_context(|| format!("Failed to load catalog {source}"));
    }
    debug!("fetching catalog {source}");
    let fetcher = Fetcher::new(ReqwestClient::with_timeout(timeout)?);
    let bytes = fetcher.fetch_bytes(source, &FetchOptions::default())?;
    Catalog::from_slice(&bytes).with_context(|| format!("Failed to parse catalog {source}"))
}
