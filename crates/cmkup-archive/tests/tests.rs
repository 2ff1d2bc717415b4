use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use cmkup_archive::{ArchiveFormat, Error, LayoutError, extract_file, find_root};
use flate2::Compression;
use flate2::write::GzEncoder;

fn append_file<W: Write>(builder: &mut tar::Builder<W>, path: &str, mode: u32, data: &[u8]) {
    let mut header = tar::Header::new_gnu();
    header.set_size(data.len() as u64);
    header.set_mode(mode);
    header.set_cksum();
    builder.append_data(&mut header, path, data).unwrap();
}

fn write_tar_gz(path: &Path, files: &[(&str, u32)]) {
    let file = File::create(path).unwrap();
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    for (name, mode) in files {
        append_file(&mut builder, name, *mode, b"data");
    }
    builder.into_inner().unwrap().finish().unwrap();
}

fn write_zip(path: &Path, files: &[&str]) {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    for name in files {
        zip.start_file(*name, options).unwrap();
        zip.write_all(b"data").unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn extract_nested_tar_gz_and_find_root() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("cmake.tar.gz");
    write_tar_gz(
        &archive,
        &[
            ("cmake-3.20.0-linux-x86_64/bin/cmake", 0o755),
            ("cmake-3.20.0-linux-x86_64/share/cmake-3.20/Modules/x.cmake", 0o644),
            ("cmake-3.20.0-linux-x86_64/doc/cmake-3.20/README", 0o644),
            ("README.txt", 0o644),
        ],
    );

    let out = dir.path().join("out");
    let report = extract_file(&archive, &out).unwrap();
    assert_eq!(report.format, ArchiveFormat::TarGz);
    assert_eq!(report.entry_count, 4);

    let layout = find_root(&out, "cmake").unwrap();
    assert_eq!(layout.root(), out.join("cmake-3.20.0-linux-x86_64"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(out.join("cmake-3.20.0-linux-x86_64/bin/cmake"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}

#[test]
fn extract_zip() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("cmake.zip");
    write_zip(
        &archive,
        &["cmake-3.20.0-win64-x64/bin/cmake.exe", "cmake-3.20.0-win64-x64/share/cmake-3.20/x"],
    );

    let out = dir.path().join("out");
    let report = extract_file(&archive, &out).unwrap();
    assert_eq!(report.format, ArchiveFormat::Zip);
    assert_eq!(report.total_bytes, 8);

    let layout = find_root(&out, "cmake").unwrap();
    assert_eq!(layout.root(), out.join("cmake-3.20.0-win64-x64"));
}

#[test]
fn zip_slip_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("evil.zip");
    write_zip(&archive, &["../escaped.txt"]);

    let out = dir.path().join("out");
    let err = extract_file(&archive, &out).unwrap_err();
    assert!(matches!(err, Error::ZipSlip { .. }));
    assert!(!dir.path().join("escaped.txt").exists());
}

#[test]
fn extra_top_level_file_does_not_change_root() {
    let dir = tempfile::tempdir().unwrap();
    let tree = dir.path();
    fs::create_dir_all(tree.join("prefix/bin")).unwrap();
    fs::create_dir_all(tree.join("prefix/share")).unwrap();
    fs::write(tree.join("prefix/bin/cmake"), "").unwrap();
    fs::write(tree.join("prefix/share/x"), "").unwrap();

    let before = find_root(tree, "cmake").unwrap();
    fs::write(tree.join("LICENSE.txt"), "").unwrap();
    let after = find_root(tree, "cmake").unwrap();

    assert_eq!(before.root(), tree.join("prefix"));
    assert_eq!(before, after);
}

#[test]
fn two_executables_are_ambiguous() {
    let dir = tempfile::tempdir().unwrap();
    let tree = dir.path();
    for prefix in ["one", "two"] {
        fs::create_dir_all(tree.join(prefix).join("bin")).unwrap();
        fs::create_dir_all(tree.join(prefix).join("share")).unwrap();
        fs::write(tree.join(prefix).join("bin/cmake"), "").unwrap();
    }
    assert!(matches!(find_root(tree, "cmake"), Err(LayoutError::Ambiguous { .. })));
}

#[test]
fn no_executable_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("prefix/share")).unwrap();
    fs::create_dir_all(dir.path().join("prefix/bin")).unwrap();
    fs::write(dir.path().join("prefix/bin/ctest"), "").unwrap();
    assert!(matches!(find_root(dir.path(), "cmake"), Err(LayoutError::NotFound { .. })));
}
