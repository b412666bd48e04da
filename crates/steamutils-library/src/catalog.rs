//! Catalog of installed games for one Steam installation root

use crate::{
    AbsolutePath, Filesystem, GameRecord, LibraryError, LocalFilesystem, ManifestIssue,
    ManifestWarning, SteamPaths, manifest_app_id, parse_manifest,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Validated, immutable set of game records
///
/// Records are kept sorted by lowercase name, then app id.
#[derive(Debug, Clone)]
pub struct Catalog {
    paths: SteamPaths,
    records: Vec<GameRecord>,
    warnings: Vec<ManifestWarning>,
}

impl Catalog {
    /// Build a catalog from a Steam installation root on the local disk
    pub fn build(root: impl AsRef<Path>) -> Result<Self, LibraryError> {
        Self::build_with(&LocalFilesystem, root)
    }

    /// Build a catalog through any [`Filesystem`]
    ///
    /// Fails if `steamapps/` or `steamapps/common/` is missing, if no
    /// manifest files exist, or if none of them yields a valid record.
    /// Malformed manifests are skipped and reported via [`Catalog::warnings`].
    pub fn build_with(
        fs: &dyn Filesystem,
        root: impl AsRef<Path>,
    ) -> Result<Self, LibraryError> {
        let paths = SteamPaths::new(root)?;
        paths.validate(fs)?;

        let manifests = discover_manifests(fs, &paths)?;
        if manifests.is_empty() {
            return Err(LibraryError::EmptyCatalog(paths.steamapps.into_path_buf()));
        }
        debug!("Found {} manifest files in {}", manifests.len(), paths.steamapps);

        let mut records = Vec::with_capacity(manifests.len());
        let mut warnings = Vec::new();

        for manifest in manifests {
            let contents = fs
                .read_to_string(&manifest)
                .map_err(|e| LibraryError::io(&manifest, e))?;
            let fields = parse_manifest(&contents);
            let manifest_path = AbsolutePath::new(&manifest)?;

            match GameRecord::from_fields(fields, manifest_path, &paths) {
                Ok(record) => records.push(record),
                Err(issue) => {
                    debug!("Skipping {}: {}", manifest.display(), issue);
                    warnings.push(ManifestWarning {
                        path: manifest,
                        issue,
                    });
                }
            }
        }

        if records.is_empty() {
            return Err(LibraryError::EmptyCatalog(paths.steamapps.into_path_buf()));
        }

        warnings.extend(duplicate_app_ids(&records));
        sort_records(&mut records);

        info!(
            "Loaded {} games from {} ({} warnings)",
            records.len(),
            paths.root,
            warnings.len()
        );

        Ok(Self {
            paths,
            records,
            warnings,
        })
    }

    /// All records, sorted by name (case-insensitive) then app id
    pub fn list_all(&self) -> &[GameRecord] {
        &self.records
    }

    /// Records whose name contains `query` (case-insensitive) or whose app
    /// id contains `query`, in [`Catalog::list_all`] order
    pub fn search(&self, query: &str) -> Vec<&GameRecord> {
        self.records.iter().filter(|r| r.matches(query)).collect()
    }

    /// First record with exactly this app id
    pub fn get(&self, app_id: &str) -> Option<&GameRecord> {
        self.records.iter().find(|r| r.app_id == app_id)
    }

    /// Installation root this catalog was built from
    pub fn root(&self) -> &AbsolutePath {
        &self.paths.root
    }

    pub fn paths(&self) -> &SteamPaths {
        &self.paths
    }

    /// Skipped manifests and duplicate app id notices
    pub fn warnings(&self) -> &[ManifestWarning] {
        &self.warnings
    }

    /// Combined `SizeOnDisk` of every record
    pub fn total_size(&self) -> u64 {
        self.records.iter().map(|r| r.size_on_disk).sum()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Manifest files directly under `steamapps/`, sorted by file name
fn discover_manifests(
    fs: &dyn Filesystem,
    paths: &SteamPaths,
) -> Result<Vec<PathBuf>, LibraryError> {
    let mut manifests: Vec<PathBuf> = fs
        .list_files(&paths.steamapps)
        .map_err(|e| LibraryError::io(paths.steamapps.as_path(), e))?
        .into_iter()
        .filter(|p| manifest_app_id(p).is_some())
        .collect();

    manifests.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(manifests)
}

/// Notices for every record whose app id was already seen
///
/// Both records stay in the catalog.
fn duplicate_app_ids(records: &[GameRecord]) -> Vec<ManifestWarning> {
    let mut first_seen: HashMap<&str, &GameRecord> = HashMap::new();
    let mut warnings = Vec::new();

    for record in records {
        if let Some(first) = first_seen.get(record.app_id.as_str()) {
            debug!(
                "App id {} declared by both {} and {}",
                record.app_id, first.manifest_path, record.manifest_path
            );
            warnings.push(ManifestWarning {
                path: record.manifest_path.clone().into_path_buf(),
                issue: ManifestIssue::DuplicateAppId {
                    app_id: record.app_id.clone(),
                    other: first.manifest_path.clone().into_path_buf(),
                },
            });
        } else {
            first_seen.insert(&record.app_id, record);
        }
    }

    warnings
}

fn sort_records(records: &mut [GameRecord]) {
    records.sort_by_cached_key(|r| (r.name.to_lowercase(), r.app_id.clone()));
}
