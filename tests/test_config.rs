use std::path::PathBuf;

use laser_defense::config::*;
use laser_defense::error::ConfigError;

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("laser_defense_{}_{}.toml", name, std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn defaults_match_classic_layout() {
    let config = GameConfig::default();
    assert_eq!((config.canvas.width, config.canvas.height), (1024.0, 768.0));
    assert_eq!(
        config.timing,
        TimingConfig {
            loop_ms: 100,
            enemy_step_ms: 300,
            laser_step_ms: 100,
            cooldown_step_ms: 200,
            end_delay_ms: 200,
        }
    );
    assert_eq!(config.assets.hero, "assets/player.png");
    assert_eq!(config.assets.life, "assets/life.png");
    assert!(config.validate().is_ok());
}

#[test]
fn empty_toml_is_the_default() {
    assert_eq!(GameConfig::from_toml("").unwrap(), GameConfig::default());
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let config = GameConfig::from_toml(
        r#"
        [canvas]
        width = 800

        [timing]
        enemy_step_ms = 150
        "#,
    )
    .unwrap();
    assert_eq!(config.canvas.width, 800.0);
    assert_eq!(config.canvas.height, 768.0);
    assert_eq!(config.timing.enemy_step_ms, 150);
    assert_eq!(config.timing.loop_ms, 100);
    assert_eq!(config.assets, AssetPaths::default());
}

#[test]
fn zero_period_is_rejected() {
    let err = GameConfig::from_toml("[timing]\nlaser_step_ms = 0\n").unwrap_err();
    match err {
        ConfigError::Invalid(msg) => assert!(msg.contains("laser_step_ms"), "{}", msg),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn zero_end_delay_is_allowed() {
    let config = GameConfig::from_toml("[timing]\nend_delay_ms = 0\n").unwrap();
    assert_eq!(config.timing.end_delay_ms, 0);
}

#[test]
fn non_positive_canvas_is_rejected() {
    let err = GameConfig::from_toml("[canvas]\nwidth = -1\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    let err = GameConfig::from_toml("[canvas]\nheight = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = GameConfig::from_toml("[canvas\nwidth = ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    let err = GameConfig::from_toml("[timing]\nloop_ms = \"fast\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("laser_defense_does_not_exist.toml");
    let err = GameConfig::load(&path).unwrap_err();
    match err {
        ConfigError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn load_reads_file_from_disk() {
    let path = scratch_file("load", "[assets]\nhero = \"art/ship.png\"\n");
    let config = GameConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.assets.hero, "art/ship.png");
    assert_eq!(config.assets.enemy, "assets/enemyShip.png");
}

#[test]
fn errors_render_readable_messages() {
    let err = GameConfig::from_toml("[timing]\nloop_ms = 0\n").unwrap_err();
    assert_eq!(err.to_string(), "invalid config: timing.loop_ms must be non-zero");
}
