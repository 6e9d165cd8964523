use std::fs;

use keycap_config::{
    load_binary, load_json, save_with_settings, ConfigError, Encoding, FileGroup, KeyDefinition,
    PersistSettings, RemapEntry,
};
use miette::Diagnostic;
use tempfile::tempdir;

#[test]
fn missing_settings_file_yields_defaults() {
    let dir = tempdir().expect("tempdir");
    let settings = PersistSettings::load_from(&dir.path().join("absent.toml")).expect("defaults");
    assert_eq!(settings, PersistSettings::default());
    assert_eq!(settings.encodings(), vec![Encoding::Binary, Encoding::Json]);
}

#[test]
fn saves_and_loads_settings() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("persist.toml");
    let settings = PersistSettings {
        primary: Encoding::Json,
        mirror: false,
    };

    settings.save_to(&path).expect("save settings");
    let stored = fs::read_to_string(&path).expect("read settings");
    assert!(stored.contains("primary = \"json\""));

    let loaded = PersistSettings::load_from(&path).expect("load settings");
    assert_eq!(loaded, settings);
    assert_eq!(loaded.encodings(), vec![Encoding::Json]);
}

#[test]
fn partial_settings_fill_in_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("persist.toml");
    fs::write(&path, "mirror = false\n").expect("write settings");

    let loaded = PersistSettings::load_from(&path).expect("load settings");
    assert_eq!(loaded.primary, Encoding::Binary);
    assert!(!loaded.mirror);
}

#[test]
fn invalid_settings_report_the_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("persist.toml");
    fs::write(&path, "primary = \"yaml\"\n").expect("write settings");

    let err = PersistSettings::load_from(&path).expect_err("unknown encoding");
    assert!(matches!(err, ConfigError::Settings { .. }));
    assert_eq!(err.path(), path.as_path());
    assert_eq!(
        err.code().map(|code| code.to_string()).as_deref(),
        Some("kfg.settings")
    );
}

#[test]
fn save_with_settings_writes_primary_then_mirror() {
    let dir = tempdir().expect("tempdir");
    let group = FileGroup::new(dir.path().join("layout.json"));
    let entries = vec![RemapEntry::new(
        KeyDefinition::new(0x41, 0),
        vec![KeyDefinition::new(0x42, 3)],
    )];
    let settings = PersistSettings {
        primary: Encoding::Json,
        mirror: true,
    };

    let written = save_with_settings(&entries, &group, &settings).expect("save");
    assert_eq!(
        written,
        vec![
            dir.path().join("layout.json"),
            dir.path().join("layout.kfg")
        ]
    );
    assert_eq!(load_binary::<RemapEntry>(&group).expect("binary"), entries);
    assert_eq!(load_json::<RemapEntry>(&group).expect("json"), entries);
}
