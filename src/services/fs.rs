use camino::Utf8Path;
use std::fs;
use std::io;

/// The filesystem calls [`ModStore`](crate::services::ModStore) relies on.
///
/// Kept narrow so store logic can be exercised against mocks without a real
/// directory tree.
#[cfg_attr(test, mockall::automock)]
pub trait ModFs {
    fn is_dir(&self, path: &Utf8Path) -> bool;

    fn exists(&self, path: &Utf8Path) -> bool;

    /// Names of the immediate child directories of `path`, in enumeration
    /// order. Links to directories count as directories.
    fn list_dirs(&self, path: &Utf8Path) -> io::Result<Vec<String>>;

    fn rename(&self, from: &Utf8Path, to: &Utf8Path) -> io::Result<()>;

    fn create_dir_all(&self, path: &Utf8Path) -> io::Result<()>;
}

/// [`ModFs`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl ModFs for RealFs {
    fn is_dir(&self, path: &Utf8Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Utf8Path) -> bool {
        path.exists()
    }

    fn list_dirs(&self, path: &Utf8Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in path.read_dir_utf8()? {
            let entry = entry?;
            // Follows symlinks and junctions, like `is_dir`
            if entry.path().is_dir() {
                names.push(entry.file_name().to_string());
            }
        }
        Ok(names)
    }

    fn rename(&self, from: &Utf8Path, to: &Utf8Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn create_dir_all(&self, path: &Utf8Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }
}
