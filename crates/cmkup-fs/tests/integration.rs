use std::fs;

use cmkup_fs::{
    AtomicWriteOptions, InstallLock, atomic_write, list_matching, pull_up, read_optional,
};
use tempfile::tempdir;

#[test]
fn marker_round_trip() {
    let dir = tempdir().unwrap();
    let marker = dir.path().join(".installedFrom");

    assert_eq!(read_optional(&marker).unwrap(), None);
    atomic_write(&marker, b"https://x/a.tar.gz", AtomicWriteOptions::new()).unwrap();
    assert_eq!(read_optional(&marker).unwrap().as_deref(), Some("https://x/a.tar.gz"));
}

#[test]
fn scan_then_pull_up() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let app = root.join("cmake-3.20.0-macos-universal/CMake.app/Contents");
    fs::create_dir_all(app.join("bin")).unwrap();
    fs::create_dir_all(app.join("share")).unwrap();
    fs::write(app.join("bin/cmake"), "").unwrap();

    let exes = list_matching(root, &["**/bin/cmake"]).unwrap();
    assert_eq!(exes, vec![app.join("bin/cmake")]);

    pull_up(&app, root).unwrap();
    assert!(root.join("bin/cmake").is_file());
    assert!(root.join("share").is_dir());
    assert!(root.join("cmake-3.20.0-macos-universal/CMake.app").is_dir());
}

#[test]
fn lock_serializes_holders() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tool.lock");

    let first = InstallLock::acquire(&path).unwrap();
    assert!(InstallLock::try_acquire(&path).is_err());
    drop(first);
    assert!(InstallLock::try_acquire(&path).is_ok());
}
