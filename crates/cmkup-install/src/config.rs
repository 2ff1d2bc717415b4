//! Installer settings, read from TOML.
//!
//! ```toml
//! tools_root = "/opt/cmkup/tools"
//! location_key = "name"
//! lock = "advisory"
//! prune = ["doc", "man"]
//! timeout_secs = 300
//! ```

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming a config file to load.
pub const CONFIG_ENV: &str = "CMKUP_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("no tools root configured and no per-user data directory found")]
    NoToolsRoot,

    #[error("unknown {what} `{value}`")]
    UnknownValue { what: &'static str, value: String },
}

/// How concurrent installers of the same tool coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockStrategy {
    /// No coordination: racing installers may overwrite each other.
    #[default]
    None,
    /// Exclusive advisory lock on `<tools_root>/<key>.lock`.
    Advisory,
}

impl FromStr for LockStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "advisory" => Ok(Self::Advisory),
            other => Err(ConfigError::UnknownValue {
                what: "lock strategy",
                value: other.to_string(),
            }),
        }
    }
}

/// Which tool attribute names the installation directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKey {
    #[default]
    Id,
    Name,
}

impl FromStr for LocationKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            other => Err(ConfigError::UnknownValue {
                what: "location key",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallerConfig {
    pub tools_root: Option<PathBuf>,
    pub location_key: LocationKey,
    pub lock: LockStrategy,
    /// Extra top-level directories removed after a nested archive is pulled up.
    pub prune: Vec<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            tools_root: None,
            location_key: LocationKey::Id,
            lock: LockStrategy::None,
            prune: vec!["doc".to_string(), "man".to_string()],
            timeout_secs: None,
        }
    }
}

impl InstallerConfig {
    pub fn from_toml(text: &str, origin: impl AsRef<Path>) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.as_ref().to_path_buf(),
            source,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Load `explicit`, else the file named by `$CMKUP_CONFIG`, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    /// Effective tools root: `$CMKUP_HOME/tools`, then `tools_root`, then the
    /// per-user data directory.
    pub fn resolved_tools_root(&self) -> Result<PathBuf, ConfigError> {
        if cmkup_platform::dir::home_override().is_none() {
            if let Some(root) = &self.tools_root {
                return Ok(root.clone());
            }
        }
        cmkup_platform::dir::tools_root().ok_or(ConfigError::NoToolsRoot)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_prune_docs() {
        let config = InstallerConfig::from_toml("", "inline").unwrap();
        assert_eq!(config, InstallerConfig::default());
        assert_eq!(config.prune, ["doc", "man"]);
        assert_eq!(config.lock, LockStrategy::None);
    }

    #[test]
    fn parses_every_field() {
        let text = r#"
            tools_root = "/opt/tools"
            location_key = "name"
            lock = "advisory"
            prune = ["doc"]
            timeout_secs = 30
        "#;
        let config = InstallerConfig::from_toml(text, "inline").unwrap();
        assert_eq!(config.tools_root.as_deref(), Some(Path::new("/opt/tools")));
        assert_eq!(config.location_key, LocationKey::Name);
        assert_eq!(config.lock, LockStrategy::Advisory);
        assert_eq!(config.prune, ["doc"]);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = InstallerConfig::from_toml("mirror = \"x\"", "cmkup.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("cmkup.toml"));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = InstallerConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn strategies_parse_from_flags() {
        assert_eq!("advisory".parse::<LockStrategy>().unwrap(), LockStrategy::Advisory);
        assert_eq!("name".parse::<LocationKey>().unwrap(), LocationKey::Name);
        assert!("flock".parse::<LockStrategy>().is_err());
    }
}
