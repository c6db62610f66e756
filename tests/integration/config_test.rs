use pmview::core::config::Config;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.host, "http://localhost");
    assert_eq!(config.data_path, "/pm");
    assert_eq!(config.period_ms, 1000);
}

#[test]
fn test_config_load_nonexistent_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("missing.json")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.set_value("host", "http://192.168.4.1").unwrap();
    config.set_value("max.v_rms", "250").unwrap();
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.source_url().unwrap().as_str(), "http://192.168.4.1/pm");
    assert_eq!(loaded.channel_max[3], 250.0);
}

#[test]
fn test_config_empty_or_corrupted_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();

    let empty = temp_dir.path().join("empty.json");
    std::fs::write(&empty, "").unwrap();
    assert_eq!(Config::load_from(&empty).unwrap(), Config::default());

    let corrupted = temp_dir.path().join("corrupted.json");
    std::fs::write(&corrupted, "{not json").unwrap();
    assert_eq!(Config::load_from(&corrupted).unwrap(), Config::default());
}
