use figurekit_settings::{EditorSettings, SettingsError};
use tempfile::tempdir;

#[test]
fn test_defaults_are_valid() {
    let settings = EditorSettings::new();
    assert!(settings.validate().is_ok());
    assert_eq!(settings.history.undo_limit, 100);
    assert!(settings.history.coalesce_edits);
}

#[test]
fn test_toml_round_trip() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("settings.toml");

    let mut settings = EditorSettings::new();
    settings.history.undo_limit = 7;
    settings.hit_testing.tolerance = 0.5;
    settings.save_to_file(&path).expect("save");

    let loaded = EditorSettings::load_from_file(&path).expect("load");
    assert_eq!(loaded, settings);
}

#[test]
fn test_json_round_trip() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");

    let mut settings = EditorSettings::new();
    settings.history.coalesce_edits = false;
    settings.geometry.curve_samples = 8;
    settings.save_to_file(&path).expect("save");

    let loaded = EditorSettings::load_from_file(&path).expect("load");
    assert_eq!(loaded, settings);
}

#[test]
fn test_partial_file_uses_section_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("partial.toml");
    std::fs::write(&path, "[history]\nundo_limit = 3\n").expect("write");

    let loaded = EditorSettings::load_from_file(&path).expect("load");
    assert_eq!(loaded.history.undo_limit, 3);
    assert!(loaded.history.coalesce_edits);
    assert_eq!(loaded.hit_testing.tolerance, 2.0);
}

#[test]
fn test_invalid_values_rejected() {
    let mut settings = EditorSettings::new();
    settings.history.undo_limit = 0;
    assert!(matches!(
        settings.validate(),
        Err(SettingsError::InvalidSetting { .. })
    ));

    let mut settings = EditorSettings::new();
    settings.geometry.curve_samples = 1;
    assert!(matches!(settings.validate(), Err(SettingsError::Config(_))));
}

#[test]
fn test_unsupported_extension() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("settings.yaml");
    let result = EditorSettings::new().save_to_file(&path);
    assert!(matches!(result, Err(SettingsError::Config(_))));
}

#[test]
fn test_load_or_default_missing_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("missing.toml");
    let loaded = EditorSettings::load_or_default(&path).expect("defaults");
    assert_eq!(loaded, EditorSettings::default());
}
