//! Steam game library catalog
//!
//! Reads the `appmanifest_<id>.acf` files a Steam client keeps under
//! `steamapps/`, turns them into validated [`GameRecord`]s and compares the
//! resulting [`Catalog`] against the install directories in
//! `steamapps/common/`.
//!
//! # Example
//!
//! ```no_run
//! use steamutils_library::{Catalog, reconcile_with, LocalFilesystem};
//!
//! fn main() -> Result<(), steamutils_library::LibraryError> {
//!     let catalog = Catalog::build("/home/user/.steam/steam")?;
//!     for game in catalog.search("half") {
//!         println!("{} ({})", game.name, game.app_id);
//!     }
//!
//!     let report = reconcile_with(&catalog, &LocalFilesystem)?;
//!     println!("{} leftovers", report.len());
//!     Ok(())
//! }
//! ```

mod acf;
mod catalog;
mod filesystem;
pub mod mock;
mod paths;
mod reconcile;
mod record;

pub use acf::parse_manifest;
pub use catalog::Catalog;
pub use filesystem::{Filesystem, LocalFilesystem};
pub use paths::{AbsolutePath, SteamPaths};
pub use reconcile::{ReconcileReport, reconcile, reconcile_with};
pub use record::{GameRecord, ManifestIssue, ManifestWarning, manifest_app_id};

use std::path::PathBuf;
use thiserror::Error;

/// Directory under the installation root holding manifests
pub const STEAMAPPS_DIR: &str = "steamapps";

/// Directory under `steamapps/` holding installed games
pub const COMMON_DIR: &str = "common";

/// Manifest file name prefix (`appmanifest_<id>.acf`)
pub const MANIFEST_PREFIX: &str = "appmanifest_";

/// Manifest file extension
pub const MANIFEST_EXTENSION: &str = "acf";

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Invalid steam directory: {0} (expected steamapps/ and steamapps/common/)")]
    InvalidInstallationRoot(PathBuf),

    #[error("No usable manifest files found in {0}")]
    EmptyCatalog(PathBuf),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LibraryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
