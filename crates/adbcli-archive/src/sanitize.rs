use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Resolve an archive entry path against `base`.
///
/// Absolute entries, drive prefixes and `..` components that climb above
/// the archive root are rejected.
pub fn sanitize_path<P: AsRef<Path>, B: AsRef<Path>>(entry_path: P, base: B) -> Result<PathBuf> {
    let entry_path = entry_path.as_ref();
    let base = base.as_ref();
    let relative = normalize_relative(entry_path)?;

    if relative.as_os_str().is_empty() {
        return Err(Error::InvalidPath(entry_path.display().to_string()));
    }

    let resolved = base.join(relative);
    if !resolved.starts_with(base) {
        return Err(Error::ZipSlip {
            entry: entry_path.to_path_buf(),
            resolved,
        });
    }
    Ok(resolved)
}

fn normalize_relative(path: &Path) -> Result<PathBuf> {
    let mut result = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Normal(part) => {
                result.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir if depth > 0 => {
                result.pop();
                depth -= 1;
            }
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(Error::ZipSlip {
                    entry: path.to_path_buf(),
                    resolved: path.to_path_buf(),
                });
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> &'static Path {
        if cfg!(windows) {
            Path::new("C:/cache/scrcpy")
        } else {
            Path::new("/cache/scrcpy")
        }
    }

    #[test]
    fn basic_path_sanitization() {
        let resolved = sanitize_path("scrcpy-win64-v2.7/scrcpy.exe", base()).unwrap();
        assert_eq!(resolved, base().join("scrcpy-win64-v2.7").join("scrcpy.exe"));
    }

    #[test]
    fn inner_parent_dir_is_folded() {
        let resolved = sanitize_path("a/b/../c.txt", base()).unwrap();
        assert_eq!(resolved, base().join("a").join("c.txt"));
    }

    #[test]
    fn escaping_parent_dir_rejected() {
        let result = sanitize_path("a/../../etc/passwd", base());
        assert!(matches!(result, Err(Error::ZipSlip { .. })));
    }

    #[test]
    fn absolute_path_rejected() {
        let malicious = if cfg!(windows) { "C:\\etc\\passwd" } else { "/etc/passwd" };
        let result = sanitize_path(malicious, base());
        assert!(matches!(result, Err(Error::ZipSlip { .. })));
    }

    #[test]
    fn empty_path_rejected() {
        assert!(matches!(sanitize_path("./", base()), Err(Error::InvalidPath(_))));
    }
}
