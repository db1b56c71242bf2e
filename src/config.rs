//! Game tuning, built once at startup and passed down explicitly.
//!
//! `GameConfig::default()` reproduces the classic game exactly; a JSON file
//! may override any subset of the fields.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::display::Rgb;

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "cannot read config {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "malformed config {}: {source}", path.display())
            }
            Self::Invalid { field, reason } => write!(f, "invalid config `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid { .. } => None,
        }
    }
}

/// Largest accepted screen side. Keeps every derived integer rectangle well
/// inside `i32`.
pub const MAX_SCREEN_SIDE: f64 = 100_000.0;

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f64,
    pub height: f64,
    /// Units moved per frame along each held axis.
    pub speed: f64,
    /// Distance from the bottom edge to the player's top at round start.
    pub start_bottom_margin: f64,
    /// Frames between two shots.
    pub shoot_cooldown: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 130.0,
            height: 130.0,
            speed: 5.0,
            start_bottom_margin: 150.0,
            shoot_cooldown: 12,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub width: f64,
    pub height: f64,
    /// Vertical velocity, negative is upward.
    pub vy: f64,
    /// How far above the player's top edge a new bullet appears.
    pub spawn_offset: f64,
    /// Bullets whose y drops below this are discarded.
    pub remove_above: f64,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            width: 20.0,
            height: 20.0,
            vy: -7.0,
            spawn_offset: 30.0,
            remove_above: -10.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub width: f64,
    pub height: f64,
    pub spawn_y: f64,
    /// Spawn x is drawn from `0..=screen_width - spawn_margin`. This is
    /// narrower than the enemy itself, so enemies may poke out on the right.
    pub spawn_margin: f64,
    pub min_speed: f64,
    pub max_speed: f64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            spawn_y: -30.0,
            spawn_margin: 30.0,
            min_speed: 1.0,
            max_speed: 3.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Timer value of a fresh round; 0 spawns on the very first frame.
    pub initial_timer: i32,
    pub base_interval: i32,
    pub min_interval: i32,
    /// Every `score_divisor` points shave one frame off the interval.
    pub score_divisor: u64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            initial_timer: 0,
            base_interval: 60,
            min_interval: 20,
            score_divisor: 5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgb,
    pub player: Rgb,
    pub player_outline: Rgb,
    pub enemy: Rgb,
    pub enemy_outline: Rgb,
    pub bullet: Rgb,
    pub hud_text: Rgb,
    pub game_over_title: Rgb,
    pub hint_text: Rgb,
    pub outline_width: f64,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb(30, 30, 40),
            player: Rgb(50, 200, 50),
            player_outline: Rgb(100, 255, 100),
            enemy: Rgb(200, 50, 50),
            enemy_outline: Rgb(255, 100, 100),
            bullet: Rgb(255, 220, 100),
            hud_text: Rgb(230, 230, 230),
            game_over_title: Rgb(255, 100, 100),
            hint_text: Rgb(200, 200, 200),
            outline_width: 3.0,
        }
    }
}

// ── Root ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: f64,
    pub height: f64,
    /// Target frame rate while a round is running.
    pub fps: u32,
    /// Frame rate of the idle game-over screen.
    pub game_over_fps: u32,
    pub player: PlayerConfig,
    pub bullet: BulletConfig,
    pub enemy: EnemyConfig,
    pub spawn: SpawnConfig,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 700.0,
            fps: 60,
            game_over_fps: 30,
            player: PlayerConfig::default(),
            bullet: BulletConfig::default(),
            enemy: EnemyConfig::default(),
            spawn: SpawnConfig::default(),
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    /// Read a JSON config file. Absent keys keep their default value.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        if self.width <= 0.0 || self.height <= 0.0 {
            return invalid("width/height", "screen must have a positive size");
        }
        if self.width > MAX_SCREEN_SIDE || self.height > MAX_SCREEN_SIDE {
            return invalid("width/height", "screen is too large");
        }
        if self.fps == 0 || self.game_over_fps == 0 {
            return invalid("fps", "frame rates must be at least 1");
        }
        let p = &self.player;
        if p.width <= 0.0 || p.height <= 0.0 {
            return invalid("player", "size must be positive");
        }
        if p.width > self.width || p.height > self.height {
            return invalid("player", "does not fit on the screen");
        }
        if p.speed <= 0.0 {
            return invalid("player.speed", "must be positive");
        }
        let b = &self.bullet;
        if b.width <= 0.0 || b.height <= 0.0 {
            return invalid("bullet", "size must be positive");
        }
        if b.width > MAX_SCREEN_SIDE || b.height > MAX_SCREEN_SIDE {
            return invalid("bullet", "too large");
        }
        if b.vy >= 0.0 {
            return invalid("bullet.vy", "bullets must travel upward");
        }
        let e = &self.enemy;
        if e.width <= 0.0 || e.height <= 0.0 {
            return invalid("enemy", "size must be positive");
        }
        if e.min_speed <= 0.0 || e.min_speed > e.max_speed {
            return invalid("enemy.min_speed", "speed range must be positive and ordered");
        }
        if e.width > MAX_SCREEN_SIDE || e.height > MAX_SCREEN_SIDE {
            return invalid("enemy", "too large");
        }
        if e.spawn_margin < 0.0 || e.spawn_margin > self.width {
            return invalid("enemy.spawn_margin", "must lie between 0 and the screen width");
        }
        let s = &self.spawn;
        if s.min_interval <= 0 || s.base_interval < s.min_interval {
            return invalid("spawn", "intervals must be positive and base >= min");
        }
        if s.score_divisor == 0 {
            return invalid("spawn.score_divisor", "must be at least 1");
        }
        Ok(())
    }

    /// Top-left corner of the player at the start of every round.
    pub fn player_start(&self) -> (f64, f64) {
        let x = (self.width / 2.0).floor() - (self.player.width / 2.0).floor();
        let y = self.height - self.player.start_bottom_margin;
        (x, y)
    }

    /// Frames until the next spawn, given the score at spawn time.
    pub fn spawn_interval(&self, score: u64) -> i32 {
        let s = &self.spawn;
        let reduction = (score / s.score_divisor).min(i32::MAX as u64) as i32;
        s.base_interval.saturating_sub(reduction).max(s.min_interval)
    }

    /// Largest x a freshly spawned enemy can get.
    pub fn enemy_spawn_max_x(&self) -> i64 {
        (self.width - self.enemy.spawn_margin).max(0.0) as i64
    }
}
