//! Reconciliation of a catalog against the install directories on disk

use crate::{AbsolutePath, Catalog, Filesystem, GameRecord, LibraryError};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use tracing::debug;

/// Discrepancies between manifests and `steamapps/common/`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Records whose install directory does not exist, in catalog order
    pub orphan_manifests: Vec<GameRecord>,

    /// Directories no record points at, sorted
    pub orphan_directories: Vec<AbsolutePath>,
}

impl ReconcileReport {
    /// No leftovers in either direction
    pub fn is_clean(&self) -> bool {
        self.orphan_manifests.is_empty() && self.orphan_directories.is_empty()
    }

    /// Total number of discrepancies
    pub fn len(&self) -> usize {
        self.orphan_manifests.len() + self.orphan_directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_clean()
    }
}

/// Classify catalog records and install directories
///
/// `common_dir_entries` are the immediate subdirectories of
/// `steamapps/common/`; `exists` decides whether a record's install path is
/// present. Entries are compared to install paths exactly, so the result
/// does not depend on the order of `common_dir_entries`.
pub fn reconcile<I, F>(catalog: &Catalog, common_dir_entries: I, exists: F) -> ReconcileReport
where
    I: IntoIterator<Item = AbsolutePath>,
    F: Fn(&Path) -> bool,
{
    let orphan_manifests: Vec<GameRecord> = catalog
        .list_all()
        .iter()
        .filter(|r| !exists(r.install_path.as_path()))
        .cloned()
        .collect();

    let install_paths: HashSet<&Path> = catalog
        .list_all()
        .iter()
        .map(|r| r.install_path.as_path())
        .collect();

    let orphan_directories: BTreeSet<AbsolutePath> = common_dir_entries
        .into_iter()
        .filter(|dir| !install_paths.contains(dir.as_path()))
        .collect();

    debug!(
        "Reconciled {}: {} orphan manifests, {} orphan directories",
        catalog.root(),
        orphan_manifests.len(),
        orphan_directories.len()
    );

    ReconcileReport {
        orphan_manifests,
        orphan_directories: orphan_directories.into_iter().collect(),
    }
}

/// Reconcile against the directories a [`Filesystem`] reports
pub fn reconcile_with(
    catalog: &Catalog,
    fs: &dyn Filesystem,
) -> Result<ReconcileReport, LibraryError> {
    let common = &catalog.paths().common;
    let entries = fs
        .list_subdirectories(common)
        .map_err(|e| LibraryError::io(common.as_path(), e))?
        .into_iter()
        .map(AbsolutePath::new)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(reconcile(catalog, entries, |path| fs.exists(path)))
}
