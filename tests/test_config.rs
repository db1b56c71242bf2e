use std::io::Write;

use fantasy_fighter::config::{ConfigError, GameConfig};
use fantasy_fighter::display::Rgb;

fn write_config(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn defaults_are_valid_and_classic() {
    let cfg = GameConfig::default();
    cfg.validate().unwrap();
    assert_eq!((cfg.width, cfg.height), (1000.0, 700.0));
    assert_eq!((cfg.fps, cfg.game_over_fps), (60, 30));
    assert_eq!(cfg.player_start(), (435.0, 550.0));
    assert_eq!(cfg.enemy_spawn_max_x(), 970);
}

#[test]
fn spawn_interval_follows_score() {
    let cfg = GameConfig::default();
    assert_eq!(cfg.spawn_interval(0), 60);
    assert_eq!(cfg.spawn_interval(4), 60);
    assert_eq!(cfg.spawn_interval(25), 55);
    assert_eq!(cfg.spawn_interval(199), 21);
    assert_eq!(cfg.spawn_interval(200), 20);
    assert_eq!(cfg.spawn_interval(u64::MAX), 20);
}

#[test]
fn spawn_interval_never_increases() {
    let cfg = GameConfig::default();
    let mut last = i32::MAX;
    for score in 0..500 {
        let next = cfg.spawn_interval(score);
        assert!(next <= last);
        last = next;
    }
}

#[test]
fn partial_file_keeps_defaults() {
    let file = write_config(r#"{ "fps": 50, "palette": { "bullet": [1, 2, 3] } }"#);
    let cfg = GameConfig::load(file.path()).unwrap();
    assert_eq!(cfg.fps, 50);
    assert_eq!(cfg.palette.bullet, Rgb(1, 2, 3));
    assert_eq!(cfg.palette.enemy, Rgb(200, 50, 50));
    assert_eq!(cfg.player.speed, 5.0);
}

#[test]
fn downward_bullets_are_rejected() {
    let file = write_config(r#"{ "bullet": { "vy": 4.0 } }"#);
    match GameConfig::load(file.path()) {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "bullet.vy"),
        other => panic!("expected Invalid, got {other:?}"),
    }
}

#[test]
fn oversized_player_is_rejected() {
    let mut cfg = GameConfig::default();
    cfg.player.height = 800.0;
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid { field: "player", .. })));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let file = write_config("{ fps: ");
    assert!(matches!(GameConfig::load(file.path()), Err(ConfigError::Parse { .. })));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn huge_screen_is_rejected() {
    let mut cfg = GameConfig::default();
    cfg.width = 3e9;
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid { field: "width/height", .. })));
}

#[test]
fn negative_spawn_margin_is_rejected() {
    let mut cfg = GameConfig::default();
    cfg.enemy.spawn_margin = -5.0;
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::Invalid { field: "enemy.spawn_margin", .. })
    ));
}

#[test]
fn non_positive_player_speed_is_rejected() {
    for speed in [0.0, -5.0] {
        let mut cfg = GameConfig::default();
        cfg.player.speed = speed;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid { field: "player.speed", .. })
        ));
    }
}
