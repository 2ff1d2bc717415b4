use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::{Error, Result};

/// Move every child of `from` into `to` and remove `from`.
///
/// `from` is usually a descendant of `to` (a vendor directory inside an
/// extracted archive). It is first renamed to a unique staging name directly
/// under `to`, so a child sharing its name cannot collide with it. Existing
/// entries of `to` with the same name as a moved child are replaced.
pub fn pull_up(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
    let from = from.as_ref();
    let to = to.as_ref();

    let staging = to.join(format!(".pullup.{}", uuid::Uuid::new_v4()));
    fs::rename(from, &staging).map_err(|e| Error::Move {
        from: from.to_path_buf(),
        to: staging.clone(),
        source: e,
    })?;

    let entries = fs::read_dir(&staging).map_err(|e| Error::Read {
        path: staging.clone(),
        source: e,
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::Read {
            path: staging.clone(),
            source: e,
        })?;
        let target = to.join(entry.file_name());
        if fs::symlink_metadata(&target).is_ok() {
            debug!("replacing {} with pulled-up entry", target.display());
            remove_path(&target)?;
        }
        fs::rename(entry.path(), &target).map_err(|e| Error::Move {
            from: entry.path(),
            to: target.clone(),
            source: e,
        })?;
    }

    fs::remove_dir(&staging).map_err(|e| Error::Write {
        path: staging.clone(),
        source: e,
    })
}

fn remove_path(path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let removed = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.map_err(|e| Error::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Remove a file or directory tree, logging instead of failing.
///
/// Returns whether something was removed.
pub fn remove_best_effort(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    if fs::symlink_metadata(path).is_err() {
        return false;
    }
    match remove_path(path) {
        Ok(()) => {
            debug!("removed {}", path.display());
            true
        }
        Err(e) => {
            warn!("could not remove {}: {e}", path.display());
            false
        }
    }
}

/// Remove every entry below `dir`, keeping `dir` itself.
///
/// A missing `dir` is already empty.
pub fn empty_dir(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(Error::Read {
                path: dir.to_path_buf(),
                source: e,
            });
        }
    };
    for entry in entries {
        let entry = entry.map_err(|e| Error::Read {
            path: dir.to_path_buf(),
            source: e,
        })?;
        remove_path(&entry.path())?;
    }
    debug!("emptied {}", dir.display());
    Ok(())
}

/// Remove `start` and its ancestors while they are empty directories,
/// stopping before `stop`.
pub fn remove_empty_dirs(start: impl AsRef<Path>, stop: impl AsRef<Path>) {
    let stop = stop.as_ref();
    let mut current = start.as_ref();
    while current != stop && current.starts_with(stop) {
        if fs::remove_dir(current).is_err() {
            break;
        }
        debug!("removed empty directory {}", current.display());
        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_pull_up_nested() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let vendor = root.join("cmake-3.20.0-linux-x86_64");
        fs::create_dir_all(vendor.join("bin")).unwrap();
        fs::create_dir_all(vendor.join("share/cmake-3.20")).unwrap();
        fs::write(vendor.join("bin/cmake"), "exe").unwrap();

        pull_up(&vendor, root).unwrap();

        assert!(!vendor.exists());
        assert_eq!(fs::read_to_string(root.join("bin/cmake")).unwrap(), "exe");
        assert!(root.join("share/cmake-3.20").is_dir());
    }

    #[test]
    fn test_pull_up_child_named_like_parent() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let vendor = root.join("cmake");
        fs::create_dir_all(vendor.join("cmake")).unwrap();
        fs::write(vendor.join("cmake/inner.txt"), "x").unwrap();

        pull_up(&vendor, root).unwrap();

        assert!(root.join("cmake/inner.txt").is_file());
    }

    #[test]
    fn test_pull_up_replaces_existing() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("doc")).unwrap();
        fs::write(root.join("doc/old.txt"), "old").unwrap();
        let vendor = root.join("v");
        fs::create_dir_all(vendor.join("doc")).unwrap();
        fs::write(vendor.join("doc/new.txt"), "new").unwrap();

        pull_up(&vendor, root).unwrap();

        assert!(root.join("doc/new.txt").exists());
        assert!(!root.join("doc/old.txt").exists());
    }

    #[test]
    fn test_remove_best_effort() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("doc");
        fs::create_dir_all(doc.join("html")).unwrap();
        assert!(remove_best_effort(&doc));
        assert!(!doc.exists());
        assert!(!remove_best_effort(&doc));
    }

    #[test]
    fn test_empty_dir_keeps_the_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("3.20.0");
        fs::create_dir_all(root.join("bin")).unwrap();
        fs::create_dir_all(root.join("share/cmake-3.20")).unwrap();
        fs::write(root.join("bin/cmake"), "old").unwrap();
        fs::write(root.join(".timestamp"), "").unwrap();

        empty_dir(&root).unwrap();

        assert!(root.is_dir());
        assert_eq!(fs::read_dir(&root).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_dir_missing_is_ok() {
        let dir = tempdir().unwrap();
        empty_dir(dir.path().join("absent")).unwrap();
        assert!(!dir.path().join("absent").exists());
    }

    #[test]
    fn test_remove_empty_dirs_stops_at_content() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::write(root.join("a/keep.txt"), "").unwrap();

        remove_empty_dirs(root.join("a/b/c"), root);

        assert!(!root.join("a/b").exists());
        assert!(root.join("a/keep.txt").exists());
    }

    #[test]
    fn test_remove_empty_dirs_never_removes_stop() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir_all(root.join("x")).unwrap();
        remove_empty_dirs(root.join("x"), &root);
        assert!(root.is_dir());
        assert!(!root.join("x").exists());
    }
}
