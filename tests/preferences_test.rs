use std::fs;

use blockfall::term::{Preferences, Theme};

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = Preferences::load(&dir.path().join("absent.json")).unwrap();
    assert_eq!(prefs, Preferences::default());
    assert_eq!(prefs.theme(), Theme::Default);
}

#[test]
fn save_then_load_keeps_theme() {
    let dir = tempfile::tempdir().unwrap();
    // Parent directories are created on save.
    let path = dir.path().join("nested").join("prefs.json");

    let mut prefs = Preferences::default();
    prefs.set_theme(Theme::Orange);
    prefs.save(&path).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"theme\": \"orange\""));

    let loaded = Preferences::load(&path).unwrap();
    assert_eq!(loaded.theme(), Theme::Orange);
}

#[test]
fn corrupt_file_is_an_error_but_load_or_default_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    fs::write(&path, "{ not json").unwrap();

    let err = Preferences::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse preferences"));

    assert_eq!(Preferences::load_or_default(&path), Preferences::default());
}

#[test]
fn unknown_saved_theme_resolves_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    fs::write(&path, r#"{"theme":"neon"}"#).unwrap();

    let prefs = Preferences::load(&path).unwrap();
    assert_eq!(prefs.theme(), Theme::Default);
}

#[test]
fn cycling_visits_every_theme_once() {
    let mut theme = Theme::Default;
    let mut seen = Vec::new();
    for _ in 0..Theme::ALL.len() {
        seen.push(theme);
        theme = theme.next();
    }
    assert_eq!(theme, Theme::Default);
    assert_eq!(seen, Theme::ALL.to_vec());
}
