//! Locating the functional installation root inside an extracted archive.
//!
//! Published archives nest the tool at varying depths (`cmake-<v>-<os>/`,
//! `CMake.app/Contents/`, or directly at the top) and may carry extra
//! top-level files. The root is the directory holding both `bin/<exe>` and
//! `share/`; it is only accepted when exactly one candidate exists.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::debug;

/// The installation root found inside an extracted tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
    executable: PathBuf,
}

impl Layout {
    /// Directory containing `bin/` and `share/`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Whether the root is nested below `tree` and needs a pull-up.
    pub fn is_nested_in(&self, tree: &Path) -> bool {
        self.root != tree
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("unrecognized archive format: no installation root below '{tree}'")]
    NotFound { tree: PathBuf },

    #[error("ambiguous archive format: several candidate executables {}", list(.candidates))]
    Ambiguous { candidates: Vec<PathBuf> },

    #[error(transparent)]
    Scan(#[from] cmkup_fs::Error),
}

fn list(paths: &[PathBuf]) -> String {
    let shown: Vec<String> = paths.iter().map(|p| format!("'{}'", p.display())).collect();
    shown.join(", ")
}

/// Find the single directory below `tree` that contains `bin/<executable>`
/// (or `bin/<executable>.exe`) and a `share` directory.
pub fn find_root(tree: impl AsRef<Path>, executable: &str) -> Result<Layout, LayoutError> {
    let tree = tree.as_ref();
    let exe_patterns = [format!("**/bin/{executable}"), format!("**/bin/{executable}.exe")];
    let exe_includes: Vec<&str> = exe_patterns.iter().map(String::as_str).collect();

    let candidates: Vec<PathBuf> = cmkup_fs::list_matching(tree, &exe_includes)?
        .into_iter()
        .filter(|p| p.is_file())
        .collect();
    let shares: BTreeSet<PathBuf> = cmkup_fs::list_matching(tree, &["**/share"])?
        .into_iter()
        .filter(|p| p.is_dir())
        .collect();

    let executable_path = match candidates.as_slice() {
        [] => return Err(LayoutError::NotFound { tree: tree.to_path_buf() }),
        [single] => single.clone(),
        _ => return Err(LayoutError::Ambiguous { candidates }),
    };

    // strip `<exe>`, then `bin`
    let root = executable_path
        .parent()
        .and_then(Path::parent)
        .ok_or_else(|| LayoutError::NotFound { tree: tree.to_path_buf() })?
        .to_path_buf();

    if !shares.contains(&root.join("share")) {
        debug!("{} has no sibling share directory", executable_path.display());
        return Err(LayoutError::NotFound { tree: tree.to_path_buf() });
    }

    debug!("installation root is {}", root.display());
    Ok(Layout {
        root,
        executable: executable_path,
    })
}
