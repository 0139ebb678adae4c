use tumbuh_cli::config::{TumbuhConfig, load_from, save_to};

#[test]
fn defaults_to_info_filter() {
    let config = TumbuhConfig::default();
    assert_eq!(config.log_filter(), "info");
    assert!(config.reference_data_path.is_none());
    assert!(!config.json_logs);
}

#[test]
fn migrates_unversioned_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"json_logs": true}"#).unwrap();

    let config = load_from(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.log_filter.as_deref(), Some("info"));
    assert!(config.json_logs);
}

#[test]
fn migration_keeps_existing_filter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"log_filter": "tumbuh_growth=debug"}"#).unwrap();

    let config = load_from(&path).unwrap();
    assert_eq!(config.log_filter(), "tumbuh_growth=debug");
}

#[test]
fn rejects_newer_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"config_version": 7}"#).unwrap();

    let err = load_from(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let config = TumbuhConfig {
        config_version: 0,
        reference_data_path: Some(dir.path().join("who.json")),
        log_filter: Some("debug".into()),
        json_logs: true,
    };

    save_to(&config, &path).unwrap();
    let loaded = load_from(&path).unwrap();
    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.reference_data_path, config.reference_data_path);
    assert_eq!(loaded.log_filter(), "debug");
    assert!(!path.with_extension("json.tmp").exists());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[test]
fn unreadable_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_from(&dir.path().join("absent.json")).is_err());

    let path = dir.path().join("config.json");
    std::fs::write(&path, "[1, 2]").unwrap();
    assert!(load_from(&path).is_err());
}
