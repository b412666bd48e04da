//! In-memory filesystem for testing without a real Steam installation
//!
//! # Usage
//!
//! ```
//! use steamutils_library::mock::MockFilesystem;
//! use steamutils_library::Catalog;
//!
//! let fs = MockFilesystem::new()
//!     .with_dir("/steam/steamapps/common/Portal")
//!     .with_file(
//!         "/steam/steamapps/appmanifest_400.acf",
//!         "\"appid\" \"400\"\n\"name\" \"Portal\"\n\"installdir\" \"Portal\"\n\"SizeOnDisk\" \"1\"",
//!     );
//!
//! let catalog = Catalog::build_with(&fs, "/steam").unwrap();
//! assert_eq!(catalog.len(), 1);
//! ```

use crate::Filesystem;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// An in-memory tree of directories and text files
#[derive(Debug, Clone, Default)]
pub struct MockFilesystem {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
    unreadable: BTreeSet<PathBuf>,
}

impl MockFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory and all of its ancestors
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path.as_ref());
        self
    }

    /// Add a text file, creating its parent directories
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.insert(path.to_path_buf(), contents.into());
        self
    }

    /// Add a file that exists but fails to read with `PermissionDenied`
    pub fn with_unreadable_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        self = self.with_file(&path, "");
        self.unreadable.insert(path);
        self
    }

    fn add_dir(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    fn children<'a, I>(paths: I, parent: &Path) -> Vec<PathBuf>
    where
        I: Iterator<Item = &'a PathBuf>,
    {
        paths
            .filter(|p| p.parent() == Some(parent))
            .cloned()
            .collect()
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} not found", path.display()),
        )
    }
}

impl Filesystem for MockFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.dirs.contains(path) || self.files.contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn list_subdirectories(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.is_dir(path) {
            return Err(Self::not_found(path));
        }
        Ok(Self::children(self.dirs.iter(), path))
    }

    fn list_files(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.is_dir(path) {
            return Err(Self::not_found(path));
        }
        Ok(Self::children(self.files.keys(), path))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        if self.unreadable.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is not readable", path.display()),
            ));
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Self::not_found(path))
    }
}
