//! Capability-based filesystem checks for database paths.

use std::io;
use std::path::Component;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};

/// Whether `path` exists and is a regular file.
///
/// A missing path surfaces as an `io::ErrorKind::NotFound` error rather than
/// `Ok(false)`, so callers can tell "absent" from "wrong type".
pub(crate) fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = parent_or_cwd(path);
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// Create every missing directory above `path`.
pub(crate) fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) else {
        return Ok(());
    };
    let (base, relative) = split_anchor(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    Dir::open_ambient_dir(&base, ambient_authority())?.create_dir_all(&relative)
}

fn parent_or_cwd(path: &Utf8Path) -> &Utf8Path {
    match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    }
}

/// Split `dir` into an ambient anchor (root, drive prefix or `.`) and the
/// path below it, since cap-std only creates directories relative to an
/// open handle.
fn split_anchor(dir: &Utf8Path) -> io::Result<(Utf8PathBuf, Utf8PathBuf)> {
    let mut components = dir.as_std_path().components();
    let anchor = match components.next() {
        Some(Component::Prefix(prefix)) => {
            let prefix = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            if components.next() != Some(Component::RootDir) {
                return Err(io::Error::other("drive-relative paths are not supported"));
            }
            Utf8PathBuf::from(prefix).join(std::path::MAIN_SEPARATOR_STR)
        }
        Some(Component::RootDir) => Utf8PathBuf::from(std::path::MAIN_SEPARATOR_STR),
        _ => return Ok((Utf8PathBuf::from("."), dir.to_path_buf())),
    };
    let relative = Utf8PathBuf::from_path_buf(components.as_path().to_path_buf())
        .map_err(|_| io::Error::other("non-UTF-8 parent path"))?;
    Ok((anchor, relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 temp dir")
    }

    #[rstest]
    fn file_is_file_distinguishes_files_directories_and_absence() {
        let tmp = TempDir::new().expect("tempdir");
        let root = utf8_root(&tmp);
        let file = root.join("clubfeed.db");
        std::fs::write(&file, b"db").expect("write file");

        assert!(file_is_file(&file).expect("inspect file"));
        assert!(!file_is_file(&root).expect("inspect directory"));
        let err = file_is_file(&root.join("missing.db")).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn ensure_parent_dir_creates_nested_directories() {
        let tmp = TempDir::new().expect("tempdir");
        let target = utf8_root(&tmp).join("a/b/c/clubfeed.db");

        ensure_parent_dir(&target).expect("create parents");

        assert!(target.parent().expect("parent").is_dir());
        ensure_parent_dir(&target).expect("idempotent");
    }

    #[rstest]
    fn bare_file_names_need_no_directories() {
        ensure_parent_dir(Utf8Path::new("clubfeed.db")).expect("nothing to create");
    }
}
