use std::fs;

use canto_core::config::{expand_path, resolve_with_base, Config, Settings};
use tempfile::TempDir;

#[test]
fn defaults_apply_without_config_files() {
    let tmp = TempDir::new().unwrap();
    let config = Config::load_from_dir(tmp.path(), "dev").expect("load");
    let settings = config.settings().expect("settings");

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.data.chants_dir, "chants");
    assert_eq!(settings.report.path, "word_counts.json");
}

#[test]
fn env_specific_file_overrides_base_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[data]\nchants_dir = \"/srv/inferno\"\n\n[report]\npath = \"base.json\"\n",
    )
    .unwrap();
    fs::write(tmp.path().join("config.test.toml"), "[report]\npath = \"test.json\"\n").unwrap();

    let config = Config::load_from_dir(tmp.path(), "test").expect("load");
    assert_eq!(config.get::<String>("data.chants_dir").unwrap(), "/srv/inferno");
    assert_eq!(config.get::<String>("report.path").unwrap(), "test.json");

    let prod = Config::load_from_dir(tmp.path(), "prod").expect("load");
    assert_eq!(prod.get::<String>("report.path").unwrap(), "base.json");
}

#[test]
fn empty_chants_dir_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[data]\nchants_dir = \"  \"\n").unwrap();

    assert!(Config::load_from_dir(tmp.path(), "dev").is_err());
}

#[test]
fn relative_config_paths_resolve_against_config_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[data]\nchants_dir = \"inferno\"\n\n[report]\npath = \"/var/tmp/counts.json\"\n",
    )
    .unwrap();

    let config = Config::load_from_dir(tmp.path(), "test").expect("load");
    assert_eq!(config.base_dir(), tmp.path());
    assert_eq!(config.chants_dir().unwrap(), tmp.path().join("inferno"));
    assert_eq!(config.report_path().unwrap(), std::path::PathBuf::from("/var/tmp/counts.json"));
}

#[test]
fn relative_paths_resolve_against_base() {
    let base = std::path::Path::new("/opt/canti");
    assert_eq!(resolve_with_base(base, "inferno"), base.join("inferno"));
    assert_eq!(resolve_with_base(base, "/abs/inferno"), std::path::PathBuf::from("/abs/inferno"));
    assert_eq!(expand_path("plain/dir"), std::path::PathBuf::from("plain/dir"));
}
