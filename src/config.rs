/// Game configuration.
///
/// Every value has a default matching the classic tuning, so a config file
/// only needs the keys it wants to change:
///
/// ```toml
/// seed = 7
///
/// [enemy]
/// spawn_chance = 0.05
/// ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::Rect;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `GameConfig`
    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Values parsed but make no sense together
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena: ArenaConfig,
    pub player: PlayerConfig,
    pub projectile: ProjectileConfig,
    pub enemy: EnemyConfig,
    pub timing: TimingConfig,
    /// Fixed RNG seed for reproducible enemy spawns; entropy when absent.
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: i32,
    pub height: i32,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub start_x: i32,
    pub start_y: i32,
    pub width: i32,
    pub height: i32,
    /// Units per millisecond on each axis while a direction is held.
    pub speed: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub width: i32,
    pub height: i32,
    /// Upward speed in units per millisecond.
    pub speed: f64,
    /// A shot is accepted only when strictly more than this many
    /// milliseconds passed since the previous accepted shot.
    pub cooldown_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub width: i32,
    pub height: i32,
    /// Descent speed in units per millisecond.
    pub speed: f64,
    /// Probability that a new enemy appears on any given tick.
    pub spawn_chance: f64,
    pub score_per_hit: u32,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Fixed simulation step.
    pub tick_ms: u64,
    /// Upper bound on simulation steps per rendered frame.
    pub max_substeps: u32,
    /// Without key-release events, a key stays held this long after its
    /// last press or repeat.
    pub hold_window_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            player: PlayerConfig::default(),
            projectile: ProjectileConfig::default(),
            enemy: EnemyConfig::default(),
            timing: TimingConfig::default(),
            seed: None,
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_x: 375,
            start_y: 500,
            width: 50,
            height: 50,
            speed: 0.2,
        }
    }
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            speed: 0.2,
            cooldown_ms: 1000,
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            speed: 0.05,
            spawn_chance: 0.02,
            score_per_hit: 10,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            max_substeps: 8,
            hold_window_ms: 150,
        }
    }
}

impl GameConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let config = Self::parse(&contents, display)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Self::parse(contents, "<inline>".to_string())
    }

    fn parse(contents: &str, path: String) -> Result<Self, ConfigError> {
        let config: GameConfig =
            toml::from_str(contents).map_err(|source| ConfigError::Parse { path, source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let arena = &self.arena;
        let fits = |what: &str, w: i32, h: i32| {
            if w <= 0 || h <= 0 {
                Err(ConfigError::Invalid(format!("{what} size must be positive, got {w}x{h}")))
            } else if w > arena.width || h > arena.height {
                Err(ConfigError::Invalid(format!(
                    "{what} ({w}x{h}) does not fit the {}x{} arena",
                    arena.width, arena.height
                )))
            } else {
                Ok(())
            }
        };
        fits("arena", arena.width, arena.height)?;
        fits("player", self.player.width, self.player.height)?;
        fits("projectile", self.projectile.width, self.projectile.height)?;
        fits("enemy", self.enemy.width, self.enemy.height)?;

        // A stopped or reversed enemy never leaves the arena and is never
        // retired, so the enemy list would only grow.
        let moving = |what: &str, speed: f64| {
            if speed.is_finite() && speed > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{what} must be finite and positive, got {speed}")))
            }
        };
        moving("enemy.speed", self.enemy.speed)?;
        moving("projectile.speed", self.projectile.speed)?;
        if !(self.player.speed.is_finite() && self.player.speed >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "player.speed must be finite and not negative, got {}",
                self.player.speed
            )));
        }

        if !(0.0..=1.0).contains(&self.enemy.spawn_chance) {
            return Err(ConfigError::Invalid(format!(
                "enemy.spawn_chance must be within [0, 1], got {}",
                self.enemy.spawn_chance
            )));
        }
        if self.timing.tick_ms == 0 {
            return Err(ConfigError::Invalid("timing.tick_ms must be positive".to_string()));
        }
        if self.timing.max_substeps == 0 {
            return Err(ConfigError::Invalid("timing.max_substeps must be positive".to_string()));
        }
        Ok(())
    }

    /// Player rectangle at the start of a run.
    pub fn player_start(&self) -> Rect {
        Rect::new(
            self.player.start_x,
            self.player.start_y,
            self.player.width,
            self.player.height,
        )
    }
}
