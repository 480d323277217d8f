use borderlands_core::GameConfig;
use borderlands_data::{load_game_config, load_game_config_or_default, resolve_config_path};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

fn unique_temp_file(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "borderlands_config_{}_{}_{}.json",
        tag,
        std::process::id(),
        nanos
    ))
}

#[test]
fn shipped_config_matches_defaults() {
    let config = load_game_config(&assets_root().join("borderlands.json")).expect("load config");
    assert_eq!(config, GameConfig::default());
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let file = unique_temp_file("missing");
    let config = load_game_config_or_default(&file).expect("fallback");
    assert_eq!(config, GameConfig::default());
    assert!(load_game_config(&file).is_err());
}

#[test]
fn partial_config_keeps_other_defaults() {
    let file = unique_temp_file("partial");
    std::fs::write(&file, r#"{"rps":{"wins":{"low":5,"mid":4,"high":3}}}"#).expect("write");
    let config = load_game_config(&file).expect("partial");
    assert_eq!(config.rps.wins.low, 5);
    assert_eq!(config.timing, GameConfig::default().timing);
    let _ = std::fs::remove_file(file);
}

#[test]
fn invalid_config_is_a_startup_error() {
    let file = unique_temp_file("invalid");
    std::fs::write(&file, r#"{"code_breaker":{"lengths":{"low":3,"mid":4,"high":12}}}"#)
        .expect("write");
    let err = load_game_config_or_default(&file).expect_err("invalid");
    assert!(format!("{err:#}").contains("code breaker"));

    std::fs::write(&file, "[1, 2").expect("write");
    assert!(load_game_config_or_default(&file).is_err());
    let _ = std::fs::remove_file(file);
}

#[test]
fn explicit_config_path_wins() {
    let path = PathBuf::from("custom.json");
    assert_eq!(resolve_config_path(Some(path.clone())), path);
}
