use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Resolve an archive entry path below `base`, rejecting entries that are
/// absolute or climb out of it.
pub(crate) fn sanitize_path(entry_path: &Path, base: &Path) -> Result<PathBuf> {
    let normalized = normalize(entry_path)?;
    let resolved = base.join(&normalized);
    if normalized.is_absolute() || !resolved.starts_with(base) {
        return Err(Error::ZipSlip {
            entry: entry_path.to_path_buf(),
            resolved,
        });
    }
    Ok(resolved)
}

/// Check that a symlink stored at `link` (already resolved below `base`)
/// pointing at `target` stays inside `base`.
pub(crate) fn check_symlink_target(target: &Path, link: &Path, base: &Path) -> Result<()> {
    let escape = || Error::SymlinkEscape {
        target: target.to_path_buf(),
        symlink: link.to_path_buf(),
    };
    if target.is_absolute() {
        return Err(escape());
    }
    let parent = link.parent().unwrap_or(base);
    let relative_parent = parent.strip_prefix(base).map_err(|_| escape())?;
    let joined = relative_parent.join(target);
    match normalize(&joined) {
        Ok(p) if !p.is_absolute() => Ok(()),
        _ => Err(escape()),
    }
}

/// Lexically normalize `path`, failing if `..` climbs above its start.
fn normalize(path: &Path) -> Result<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return Err(Error::ZipSlip {
                        entry: path.to_path_buf(),
                        resolved: out.join(".."),
                    });
                }
            }
            Component::Normal(part) => {
                if part.to_string_lossy().contains('\0') {
                    return Err(Error::InvalidPath);
                }
                out.push(part);
            }
            Component::RootDir | Component::Prefix(_) => out.push(component.as_os_str()),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_nested_paths() {
        let base = Path::new("/dest");
        let resolved = sanitize_path(Path::new("cmake-3.20/./bin/cmake"), base).unwrap();
        assert_eq!(resolved, Path::new("/dest/cmake-3.20/bin/cmake"));
    }

    #[test]
    fn rejects_parent_escape() {
        let base = Path::new("/dest");
        assert!(matches!(
            sanitize_path(Path::new("../etc/passwd"), base),
            Err(Error::ZipSlip { .. })
        ));
        assert!(matches!(
            sanitize_path(Path::new("a/../../b"), base),
            Err(Error::ZipSlip { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn rejects_absolute_entries() {
        assert!(sanitize_path(Path::new("/etc/passwd"), Path::new("/dest")).is_err());
    }

    #[test]
    fn symlink_targets() {
        let base = Path::new("/dest");
        let link = Path::new("/dest/root/bin/cmake-link");
        assert!(check_symlink_target(Path::new("cmake"), link, base).is_ok());
        assert!(check_symlink_target(Path::new("../share/x"), link, base).is_ok());
        assert!(check_symlink_target(Path::new("../../../outside"), link, base).is_err());
    }
}
