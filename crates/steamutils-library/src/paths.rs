//! Steam installation paths

use crate::{COMMON_DIR, Filesystem, LibraryError, STEAMAPPS_DIR};
use serde::Serialize;
use std::fmt;
use std::ops::Deref;
use std::path::{Path, PathBuf};

/// A filesystem path known to be absolute
///
/// Made absolute lexically against the current directory. Symlinks and `..`
/// components are left as they are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AbsolutePath(PathBuf);

impl AbsolutePath {
    /// Make `path` absolute against the current working directory
    pub fn new(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let path = path.as_ref();
        std::path::absolute(path)
            .map(Self)
            .map_err(|e| LibraryError::io(path, e))
    }

    /// Wrap a path that is already absolute
    ///
    /// Returns `None` for relative paths.
    pub fn from_absolute(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        path.is_absolute().then_some(Self(path))
    }

    /// Join a single component onto this path without normalizing it
    pub fn join(&self, component: impl AsRef<Path>) -> Self {
        Self(self.0.join(component))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl Deref for AbsolutePath {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for AbsolutePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for AbsolutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Standard layout of a Steam installation root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SteamPaths {
    /// Installation root
    pub root: AbsolutePath,
    /// Manifest directory (`root/steamapps`)
    pub steamapps: AbsolutePath,
    /// Installed games (`root/steamapps/common`)
    pub common: AbsolutePath,
}

impl SteamPaths {
    /// Derive the layout from an installation root
    pub fn new(root: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let root = AbsolutePath::new(root)?;
        let steamapps = root.join(STEAMAPPS_DIR);
        let common = steamapps.join(COMMON_DIR);

        Ok(Self {
            root,
            steamapps,
            common,
        })
    }

    /// Check that both `steamapps/` and `steamapps/common/` are directories
    pub fn validate(&self, fs: &dyn Filesystem) -> Result<(), LibraryError> {
        if !fs.is_dir(&self.steamapps) || !fs.is_dir(&self.common) {
            return Err(LibraryError::InvalidInstallationRoot(
                self.root.clone().into_path_buf(),
            ));
        }
        Ok(())
    }

    /// Install path for a manifest's `installdir` value
    pub fn install_path(&self, install_dir_name: &str) -> AbsolutePath {
        self.common.join(install_dir_name)
    }
}
