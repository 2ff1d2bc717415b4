//! Default locations for installed tools.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable that relocates every cmkup installation.
pub const HOME_ENV: &str = "CMKUP_HOME";

/// `$CMKUP_HOME`, ignored when unset or empty.
pub fn home_override() -> Option<PathBuf> {
    non_empty(env::var_os(HOME_ENV)).map(PathBuf::from)
}

/// Per-user directory for application data, if this platform has one.
pub fn data_dir() -> Option<PathBuf> {
    if cfg!(windows) {
        return non_empty(env::var_os("LOCALAPPDATA")).map(PathBuf::from);
    }
    let home = home::home_dir();
    if cfg!(target_os = "macos") {
        return home.map(|h| h.join("Library").join("Application Support"));
    }
    non_empty(env::var_os("XDG_DATA_HOME"))
        .map(PathBuf::from)
        .or_else(|| home.map(|h| h.join(".local").join("share")))
}

/// Default root under which tool versions are installed.
///
/// `$CMKUP_HOME/tools` wins over `<data dir>/cmkup/tools`.
pub fn tools_root() -> Option<PathBuf> {
    tools_root_from(home_override(), data_dir())
}

fn tools_root_from(home: Option<PathBuf>, data_dir: Option<PathBuf>) -> Option<PathBuf> {
    match home {
        Some(home) => Some(home.join("tools")),
        None => data_dir.map(|d| d.join("cmkup").join("tools")),
    }
}

fn non_empty(value: Option<OsString>) -> Option<OsString> {
    value.filter(|v| !v.is_empty())
}
