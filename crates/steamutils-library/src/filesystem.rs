//! Filesystem access used by the catalog and reconciler

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read-only filesystem operations the catalog depends on
///
/// Listing results are returned as absolute paths in no particular order;
/// callers sort what they need sorted.
pub trait Filesystem {
    /// Whether anything exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Immediate subdirectories of `path`
    fn list_subdirectories(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Immediate regular files in `path`
    fn list_files(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Read a whole text file
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// The local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    fn list_entries(path: &Path, want_dirs: bool) -> io::Result<Vec<PathBuf>> {
        let mut entries = Vec::new();

        for entry in fs::read_dir(path)? {
            let entry_path = entry?.path();
            // Follows symlinks, so a linked install directory counts as a directory
            let keep = if want_dirs {
                entry_path.is_dir()
            } else {
                entry_path.is_file()
            };
            if keep {
                entries.push(entry_path);
            }
        }

        Ok(entries)
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_subdirectories(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        Self::list_entries(path, true)
    }

    fn list_files(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        Self::list_entries(path, false)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        // Manifests written by older clients are not always valid UTF-8
        let bytes = fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
