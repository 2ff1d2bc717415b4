use std::path::{Path, PathBuf};

use ::glob::{MatchOptions, Pattern};

use crate::{Error, Result};

const OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// List files and directories below `root` matching any of the glob
/// `includes` (e.g. `**/bin/cmake`), sorted and without duplicates.
pub fn list_matching(root: impl AsRef<Path>, includes: &[&str]) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let root_str = root.to_str().ok_or_else(|| Error::Pattern {
        pattern: root.display().to_string(),
        message: "root is not valid UTF-8".to_string(),
    })?;
    let base = Pattern::escape(root_str);

    let mut found = Vec::new();
    for include in includes {
        let pattern = format!("{}/{}", base.trim_end_matches('/'), include);
        let paths = ::glob::glob_with(&pattern, OPTIONS).map_err(|e| Error::Pattern {
            pattern: pattern.clone(),
            message: e.msg.to_string(),
        })?;
        for entry in paths {
            let path = entry.map_err(|e| Error::Read {
                path: e.path().to_path_buf(),
                source: e.into_error(),
            })?;
            found.push(path);
        }
    }
    found.sort();
    found.dedup();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_matches_at_any_depth() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("bin")).unwrap();
        fs::create_dir_all(dir.path().join("a/b/bin")).unwrap();
        fs::write(dir.path().join("bin/cmake"), "").unwrap();
        fs::write(dir.path().join("a/b/bin/cmake"), "").unwrap();
        fs::write(dir.path().join("a/b/bin/ctest"), "").unwrap();

        let found = list_matching(dir.path(), &["**/bin/cmake"]).unwrap();
        assert_eq!(found, vec![dir.path().join("a/b/bin/cmake"), dir.path().join("bin/cmake")]);
    }

    #[test]
    fn test_multiple_includes_dedup() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("x/share")).unwrap();
        let found = list_matching(dir.path(), &["**/share", "x/share"]).unwrap();
        assert_eq!(found, vec![dir.path().join("x/share")]);
    }

    #[test]
    fn test_root_with_glob_characters() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("cmake[3.20]*");
        fs::create_dir_all(root.join("bin")).unwrap();
        fs::write(root.join("bin/cmake"), "").unwrap();
        let found = list_matching(&root, &["**/bin/cmake"]).unwrap();
        assert_eq!(found, vec![root.join("bin/cmake")]);
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = tempdir().unwrap();
        let err = list_matching(dir.path(), &["***"]).unwrap_err();
        assert!(matches!(err, Error::Pattern { .. }));
    }
}
