//! Validated game records built from parsed manifests

use crate::{AbsolutePath, MANIFEST_EXTENSION, MANIFEST_PREFIX, SteamPaths};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

const KEY_APP_ID: &str = "appid";
const KEY_NAME: &str = "name";
const KEY_INSTALL_DIR: &str = "installdir";
const KEY_SIZE_ON_DISK: &str = "SizeOnDisk";

/// An installed game described by one manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub app_id: String,
    pub name: String,
    pub install_dir_name: String,
    pub size_on_disk: u64,

    /// Every other manifest field
    pub extra_fields: BTreeMap<String, String>,

    /// `steamapps/common/<installdir>`
    pub install_path: AbsolutePath,

    /// The manifest file this record came from
    pub manifest_path: AbsolutePath,
}

/// Why a manifest was left out of the catalog, or flagged
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestIssue {
    #[error("missing required key \"{0}\"")]
    MissingKey(&'static str),

    #[error("installdir is empty")]
    EmptyInstallDir,

    #[error("SizeOnDisk is not a byte count: \"{0}\"")]
    InvalidSize(String),

    #[error("app id {app_id} is also declared by {}", other.display())]
    DuplicateAppId { app_id: String, other: PathBuf },
}

/// A non-fatal problem with a single manifest file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestWarning {
    pub path: PathBuf,
    pub issue: ManifestIssue,
}

impl ManifestWarning {
    /// Whether the manifest was skipped (as opposed to kept with a notice)
    pub fn is_malformed(&self) -> bool {
        !matches!(self.issue, ManifestIssue::DuplicateAppId { .. })
    }
}

impl fmt::Display for ManifestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.issue)
    }
}

impl GameRecord {
    /// Build a record from parsed manifest fields
    ///
    /// Fails when a required key is missing, `installdir` is empty, or
    /// `SizeOnDisk` is not an unsigned decimal number.
    pub fn from_fields(
        mut fields: BTreeMap<String, String>,
        manifest_path: AbsolutePath,
        paths: &SteamPaths,
    ) -> Result<Self, ManifestIssue> {
        let mut take =
            |key: &'static str| fields.remove(key).ok_or(ManifestIssue::MissingKey(key));

        let app_id = take(KEY_APP_ID)?;
        let name = take(KEY_NAME)?;
        let install_dir_name = take(KEY_INSTALL_DIR)?;
        let size = take(KEY_SIZE_ON_DISK)?;

        if install_dir_name.is_empty() {
            return Err(ManifestIssue::EmptyInstallDir);
        }

        let size_on_disk = parse_size(&size).ok_or(ManifestIssue::InvalidSize(size))?;
        let install_path = paths.install_path(&install_dir_name);

        Ok(Self {
            app_id,
            name,
            install_dir_name,
            size_on_disk,
            extra_fields: fields,
            install_path,
            manifest_path,
        })
    }

    /// Look up a manifest field by its original key
    pub fn field(&self, key: &str) -> Option<String> {
        match key {
            KEY_APP_ID => Some(self.app_id.clone()),
            KEY_NAME => Some(self.name.clone()),
            KEY_INSTALL_DIR => Some(self.install_dir_name.clone()),
            KEY_SIZE_ON_DISK => Some(self.size_on_disk.to_string()),
            _ => self.extra_fields.get(key).cloned(),
        }
    }

    /// Every manifest field, required ones included, ordered by key
    pub fn raw_fields(&self) -> BTreeMap<String, String> {
        let mut fields = self.extra_fields.clone();
        fields.insert(KEY_APP_ID.to_string(), self.app_id.clone());
        fields.insert(KEY_NAME.to_string(), self.name.clone());
        fields.insert(KEY_INSTALL_DIR.to_string(), self.install_dir_name.clone());
        fields.insert(KEY_SIZE_ON_DISK.to_string(), self.size_on_disk.to_string());
        fields
    }

    /// Whether `query` matches the name (case-insensitive) or the app id
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase()) || self.app_id.contains(query)
    }
}

/// Strict unsigned decimal parse; rejects signs and whitespace
fn parse_size(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// App id encoded in a manifest file name (`appmanifest_<digits>.acf`)
///
/// Returns `None` for anything else.
pub fn manifest_app_id(path: &Path) -> Option<&str> {
    let file_name = path.file_name()?.to_str()?;
    let id = file_name
        .strip_prefix(MANIFEST_PREFIX)?
        .strip_suffix(MANIFEST_EXTENSION)?
        .strip_suffix('.')?;

    if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
        Some(id)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_manifest;

    fn paths() -> SteamPaths {
        SteamPaths::new("/steam").unwrap()
    }

    fn manifest_path() -> AbsolutePath {
        AbsolutePath::from_absolute("/steam/steamapps/appmanifest_220.acf").unwrap()
    }

    fn fields(text: &str) -> BTreeMap<String, String> {
        parse_manifest(text)
    }

    #[test]
    fn test_record_from_complete_manifest() {
        let record = GameRecord::from_fields(
            fields(
                "\"appid\" \"220\"\n\"name\" \"Half-Life 2\"\n\"installdir\" \"Half-Life 2\"\n\"SizeOnDisk\" \"6517590211\"\n\"StateFlags\" \"4\"",
            ),
            manifest_path(),
            &paths(),
        )
        .unwrap();

        assert_eq!(record.app_id, "220");
        assert_eq!(record.name, "Half-Life 2");
        assert_eq!(record.size_on_disk, 6_517_590_211);
        assert_eq!(
            record.install_path.as_path(),
            Path::new("/steam/steamapps/common/Half-Life 2")
        );
        assert_eq!(record.extra_fields.len(), 1);
        assert_eq!(record.field("StateFlags").as_deref(), Some("4"));
        assert_eq!(record.field("appid").as_deref(), Some("220"));
        assert_eq!(record.field("missing"), None);
    }

    #[test]
    fn test_missing_keys() {
        let cases = [
            ("\"name\" \"x\"\n\"installdir\" \"x\"\n\"SizeOnDisk\" \"1\"", "appid"),
            ("\"appid\" \"1\"\n\"installdir\" \"x\"\n\"SizeOnDisk\" \"1\"", "name"),
            ("\"appid\" \"1\"\n\"name\" \"x\"\n\"SizeOnDisk\" \"1\"", "installdir"),
            ("\"appid\" \"1\"\n\"name\" \"x\"\n\"installdir\" \"x\"", "SizeOnDisk"),
        ];

        for (text, key) in cases {
            let err = GameRecord::from_fields(fields(text), manifest_path(), &paths()).unwrap_err();
            assert_eq!(err, ManifestIssue::MissingKey(key), "Failed for: {}", key);
        }
    }

    #[test]
    fn test_invalid_size_and_empty_installdir() {
        let err = GameRecord::from_fields(
            fields("\"appid\" \"1\"\n\"name\" \"x\"\n\"installdir\" \"x\"\n\"SizeOnDisk\" \"-5\""),
            manifest_path(),
            &paths(),
        )
        .unwrap_err();
        assert_eq!(err, ManifestIssue::InvalidSize("-5".to_string()));

        let err = GameRecord::from_fields(
            fields("\"appid\" \"1\"\n\"name\" \"x\"\n\"installdir\" \"\"\n\"SizeOnDisk\" \"5\""),
            manifest_path(),
            &paths(),
        )
        .unwrap_err();
        assert_eq!(err, ManifestIssue::EmptyInstallDir);
    }

    #[test]
    fn test_raw_fields_include_required_keys() {
        let record = GameRecord::from_fields(
            fields("\"appid\" \"400\"\n\"name\" \"Portal\"\n\"installdir\" \"Portal\"\n\"SizeOnDisk\" \"10\"\n\"buildid\" \"7\""),
            manifest_path(),
            &paths(),
        )
        .unwrap();

        let raw = record.raw_fields();
        let keys: Vec<&str> = raw.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["SizeOnDisk", "appid", "buildid", "installdir", "name"]);
    }

    #[test]
    fn test_manifest_app_id() {
        assert_eq!(manifest_app_id(Path::new("/s/appmanifest_220.acf")), Some("220"));
        assert_eq!(manifest_app_id(Path::new("appmanifest_0.acf")), Some("0"));
        assert_eq!(manifest_app_id(Path::new("appmanifest_.acf")), None);
        assert_eq!(manifest_app_id(Path::new("appmanifest_22a.acf")), None);
        assert_eq!(manifest_app_id(Path::new("appmanifest_220.acf.bak")), None);
        assert_eq!(manifest_app_id(Path::new("appmanifest_220acf")), None);
        assert_eq!(manifest_app_id(Path::new("libraryfolders.vdf")), None);
    }

    #[test]
    fn test_matches() {
        let record = GameRecord::from_fields(
            fields("\"appid\" \"220\"\n\"name\" \"Half-Life 2\"\n\"installdir\" \"hl2\"\n\"SizeOnDisk\" \"1\""),
            manifest_path(),
            &paths(),
        )
        .unwrap();

        assert!(record.matches("half"));
        assert!(record.matches("LIFE"));
        assert!(record.matches("22"));
        assert!(!record.matches("portal"));
    }

    #[test]
    fn test_warning_display() {
        let warning = ManifestWarning {
            path: PathBuf::from("/steam/steamapps/appmanifest_1.acf"),
            issue: ManifestIssue::MissingKey("name"),
        };
        assert!(warning.is_malformed());
        assert_eq!(
            format!("{}", warning),
            "/steam/steamapps/appmanifest_1.acf: missing required key \"name\""
        );
    }
}
