use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use cmkup_platform::OsFamily;

/// Environment key under which the bin directory is prepended to `PATH`.
pub const PATH_CONTRIBUTION: &str = "PATH+CMAKE";

/// A named tool installation request: display name plus catalog id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    name: String,
    id: String,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Executables shipped with one installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuiteTool {
    Cmake,
    Cpack,
    Ctest,
}

impl SuiteTool {
    pub const ALL: [SuiteTool; 3] = [SuiteTool::Cmake, SuiteTool::Cpack, SuiteTool::Ctest];

    pub fn file_stem(self) -> &'static str {
        match self {
            SuiteTool::Cmake => "cmake",
            SuiteTool::Cpack => "cpack",
            SuiteTool::Ctest => "ctest",
        }
    }
}

impl fmt::Display for SuiteTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

impl FromStr for SuiteTool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.file_stem() == s)
            .ok_or_else(|| format!("unknown suite tool `{s}` (expected cmake, cpack or ctest)"))
    }
}

/// An installed tool version on one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPath {
    home: PathBuf,
    installed_from: String,
    family: OsFamily,
}

impl ToolPath {
    pub fn new(
        home: impl Into<PathBuf>,
        installed_from: impl Into<String>,
        family: OsFamily,
    ) -> Self {
        Self {
            home: home.into(),
            installed_from: installed_from.into(),
            family,
        }
    }

    /// Installation directory, the parent of `bin/`.
    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn installed_from(&self) -> &str {
        &self.installed_from
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.home.join("bin")
    }

    /// Path of `tool`, with `.exe` on Windows hosts.
    pub fn executable(&self, tool: SuiteTool) -> PathBuf {
        self.bin_dir().join(self.family.executable_name(tool.file_stem()))
    }

    /// The `PATH+CMAKE` entry to add to a build environment.
    pub fn env_contribution(&self) -> (&'static str, PathBuf) {
        (PATH_CONTRIBUTION, self.bin_dir())
    }
}
