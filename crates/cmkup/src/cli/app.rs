use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use cmkup_install::{LockStrategy, SuiteTool};

#[derive(Clone, Debug, Parser)]
#[command(
    name = "cmkup",
    version = env!("CARGO_PKG_VERSION"),
    about,
    long_about = None,
    propagate_version = true
)]
pub struct App {
    /// Raise log verbosity (`-v` debug, `-vv` trace); overrides CMKUP_LOG.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Print the download URL a version resolves to on a host.
    #[command(alias = "r", name = "resolve")]
    Resolve(ResolveArg),
    /// Install a version unless it is already installed, and print its bin directory.
    #[command(alias = "i", name = "install")]
    Install(InstallArg),
    /// Print the path of an installed executable.
    #[command(alias = "w", name = "which")]
    Which(WhichArg),
}

#[derive(Clone, Debug, Args)]
pub struct CatalogArg {
    /// Catalog file or URL (`{"list": [...]}`, optionally JSONP-wrapped).
    #[arg(long, short = 'c')]
    pub catalog: String,
}

#[derive(Clone, Debug, Args)]
pub struct HostArg {
    /// Host OS name as reported by `os.name` (default: this machine).
    #[arg(long)]
    pub os: Option<String>,
    /// Host architecture as reported by `os.arch` (default: this machine).
    #[arg(long)]
    pub arch: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ResolveArg {
    #[command(flatten)]
    pub catalog: CatalogArg,
    #[command(flatten)]
    pub host: HostArg,
    /// Catalog id of the version, e.g. `3.20.0`.
    pub id: String,
}

#[derive(Clone, Debug, Args)]
pub struct LocationArg {
    /// Tool name, used for the directory when `location_key = "name"`.
    #[arg(long, default_value = "cmake")]
    pub name: String,
    /// Tools root (overrides config and CMKUP_HOME).
    #[arg(long)]
    pub root: Option<PathBuf>,
    /// TOML config file (default: $CMKUP_CONFIG).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct InstallArg {
    #[command(flatten)]
    pub catalog: CatalogArg,
    #[command(flatten)]
    pub host: HostArg,
    #[command(flatten)]
    pub location: LocationArg,
    /// Coordination between concurrent installers: `none` or `advisory`.
    #[arg(long)]
    pub lock: Option<LockStrategy>,
    /// Print `PATH+CMAKE=<bin>` instead of the bare bin directory.
    #[arg(long)]
    pub env: bool,
    pub id: String,
}

#[derive(Clone, Debug, Args)]
pub struct WhichArg {
    #[command(flatten)]
    pub location: LocationArg,
    /// Executable to locate: cmake, cpack or ctest.
    #[arg(long, default_value = "cmake")]
    pub tool: SuiteTool,
    pub id: String,
}
