//! Integration tests against a Steam directory laid out on disk

use std::fs;
use std::path::PathBuf;
use steamutils_library::{Catalog, LibraryError, LocalFilesystem, reconcile_with};
use tempfile::TempDir;

/// Test helper to create a temporary Steam installation
struct SteamTestEnv {
    temp_dir: TempDir,
    steamapps: PathBuf,
    common: PathBuf,
}

impl SteamTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let steamapps = temp_dir.path().join("steamapps");
        let common = steamapps.join("common");

        fs::create_dir_all(&common).expect("Failed to create steamapps/common");

        Self {
            temp_dir,
            steamapps,
            common,
        }
    }

    /// Write a manifest, and its install directory when `installed`
    fn add_game(&self, app_id: &str, name: &str, installdir: &str, installed: bool) -> PathBuf {
        let manifest = format!(
            "\"AppState\"\n{{\n\t\"appid\"\t\t\"{app_id}\"\n\t\"Universe\"\t\t\"1\"\n\t\"name\"\t\t\"{name}\"\n\t\"StateFlags\"\t\t\"4\"\n\t\"installdir\"\t\t\"{installdir}\"\n\t\"SizeOnDisk\"\t\t\"2048\"\n\t\"UserConfig\"\n\t{{\n\t\t\"language\"\t\t\"english\"\n\t}}\n}}\n"
        );
        let path = self.steamapps.join(format!("appmanifest_{app_id}.acf"));
        fs::write(&path, manifest).expect("Failed to write manifest");

        if installed {
            fs::create_dir_all(self.common.join(installdir)).expect("Failed to create install dir");
        }
        path
    }

    fn root(&self) -> &std::path::Path {
        self.temp_dir.path()
    }
}

#[test]
fn test_catalog_from_disk() {
    let env = SteamTestEnv::new();
    env.add_game("400", "Portal", "Portal", true);
    env.add_game("220", "Half-Life 2", "Half-Life 2", true);
    fs::write(env.steamapps.join("libraryfolders.vdf"), "\"path\" \"x\"").unwrap();
    fs::write(env.steamapps.join("appmanifest_10.acf.tmp"), "").unwrap();

    let catalog = Catalog::build(env.root()).unwrap();
    let names: Vec<&str> = catalog.list_all().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Half-Life 2", "Portal"]);

    let portal = catalog.get("400").unwrap();
    assert_eq!(portal.install_path.as_path(), env.common.join("Portal"));
    assert_eq!(portal.manifest_path.as_path(), env.steamapps.join("appmanifest_400.acf"));
    assert_eq!(portal.size_on_disk, 2048);
    assert_eq!(portal.field("language").as_deref(), Some("english"));
}

#[test]
fn test_missing_common_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("steamapps")).unwrap();

    let err = Catalog::build(temp_dir.path()).unwrap_err();
    assert!(matches!(err, LibraryError::InvalidInstallationRoot(_)));
}

#[test]
fn test_empty_steamapps() {
    let env = SteamTestEnv::new();
    let err = Catalog::build(env.root()).unwrap_err();
    assert!(matches!(err, LibraryError::EmptyCatalog(_)));
}

#[test]
fn test_reconcile_on_disk() {
    let env = SteamTestEnv::new();
    env.add_game("400", "Portal", "Portal", true);
    env.add_game("220", "Half-Life 2", "Half-Life 2", false);
    fs::create_dir_all(env.common.join("Old Game")).unwrap();
    // Stray files in common/ are not directories and are ignored
    fs::write(env.common.join("readme.txt"), "hi").unwrap();

    let catalog = Catalog::build(env.root()).unwrap();
    let report = reconcile_with(&catalog, &LocalFilesystem).unwrap();

    assert_eq!(report.orphan_manifests.len(), 1);
    assert_eq!(report.orphan_manifests[0].app_id, "220");
    assert_eq!(report.orphan_directories.len(), 1);
    assert_eq!(report.orphan_directories[0].as_path(), env.common.join("Old Game"));
}

#[test]
fn test_reconcile_clean_install() {
    let env = SteamTestEnv::new();
    env.add_game("400", "Portal", "Portal", true);
    env.add_game("620", "Portal 2", "Portal 2", true);

    let catalog = Catalog::build(env.root()).unwrap();
    let report = reconcile_with(&catalog, &LocalFilesystem).unwrap();
    assert!(report.is_clean());
}

#[test]
fn test_records_serialize_to_json() {
    let env = SteamTestEnv::new();
    env.add_game("400", "Portal", "Portal", true);

    let catalog = Catalog::build(env.root()).unwrap();
    let json = serde_json::to_value(catalog.list_all()).unwrap();

    assert_eq!(json[0]["app_id"], "400");
    assert_eq!(json[0]["size_on_disk"], 2048);
    assert_eq!(
        json[0]["install_path"],
        env.common.join("Portal").to_string_lossy().as_ref()
    );
}
