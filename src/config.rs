//! Static game configuration
//!
//! Built once at startup (defaults or JSON) and passed by reference into the
//! simulation. Nothing here changes while a game is running.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::geom::{Rect, max_position};
use crate::sim::level::{LevelDef, default_levels};

/// Where a motion command came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputSource {
    #[default]
    Keyboard,
    Touch,
}

impl InputSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputSource::Keyboard => "Keyboard",
            InputSource::Touch => "Touch",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "keyboard" | "key" => Some(InputSource::Keyboard),
            "touch" => Some(InputSource::Touch),
            _ => None,
        }
    }
}

/// Invalid configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level catalog is empty")]
    NoLevels,
    #[error("level at index {index} is numbered {found}, expected {}", .index + 1)]
    LevelNumbering { index: usize, found: u32 },
    #[error("level {0} has no bins")]
    EmptyLevel(u32),
    #[error("{0} must be greater than zero")]
    NonPositive(&'static str),
    #[error("{0} does not fit inside the arena")]
    TooLarge(&'static str),
    #[error("bin jitter chance {0} is outside [0, 1]")]
    JitterChance(f64),
    #[error("truck home position is outside the arena")]
    HomeOutOfBounds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TruckConfig {
    pub size: Vec2,
    /// Distance per accepted move step before input scaling
    pub speed: f32,
    /// Position the truck returns to at every level start
    pub home: Vec2,
}

impl Default for TruckConfig {
    fn default() -> Self {
        Self {
            size: Vec2::new(TRUCK_WIDTH, TRUCK_HEIGHT),
            speed: TRUCK_SPEED,
            home: Vec2::new(TRUCK_HOME_X, TRUCK_HOME_Y),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BinConfig {
    pub size: Vec2,
    /// Distance per bin tick along the (unnormalized) direction
    pub speed: f32,
    pub jitter_chance: f64,
    pub pickup_tolerance: f32,
    pub placement_attempts: u32,
}

impl Default for BinConfig {
    fn default() -> Self {
        Self {
            size: Vec2::new(BIN_WIDTH, BIN_HEIGHT),
            speed: BIN_SPEED,
            jitter_chance: BIN_JITTER_CHANCE,
            pickup_tolerance: PICKUP_TOLERANCE,
            placement_attempts: PLACEMENT_ATTEMPTS,
        }
    }
}

/// Hold-to-move cadence and per-device speed scaling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub repeat_interval_ms: u64,
    pub keyboard_speed_multiplier: f32,
    pub touch_speed_multiplier: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            repeat_interval_ms: INPUT_REPEAT_MS,
            keyboard_speed_multiplier: 1.0,
            touch_speed_multiplier: 1.0,
        }
    }
}

impl InputConfig {
    pub fn speed_multiplier(&self, source: InputSource) -> f32 {
        match source {
            InputSource::Keyboard => self.keyboard_speed_multiplier,
            InputSource::Touch => self.touch_speed_multiplier,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub bin_tick_ms: u64,
    pub countdown_ms: u64,
    pub moving_decay_ms: u64,
    pub lifting_ms: u64,
    pub warning_flash_ms: u64,
    pub warning_threshold_secs: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            bin_tick_ms: BIN_TICK_MS,
            countdown_ms: COUNTDOWN_MS,
            moving_decay_ms: MOVING_DECAY_MS,
            lifting_ms: LIFTING_MS,
            warning_flash_ms: WARNING_FLASH_MS,
            warning_threshold_secs: WARNING_THRESHOLD_SECS,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Arena width and height
    pub arena: Vec2,
    pub truck: TruckConfig,
    pub bins: BinConfig,
    /// Walls of the pen, active only on levels with barriers
    pub barriers: Vec<Rect>,
    /// Openable segment of the pen
    pub gate: Rect,
    pub levels: Vec<LevelDef>,
    pub input: InputConfig,
    pub timing: TimingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena: Vec2::new(GAME_WIDTH, GAME_HEIGHT),
            truck: TruckConfig::default(),
            bins: BinConfig::default(),
            barriers: vec![
                Rect::new(100.0, 50.0, 400.0, 20.0),  // Top
                Rect::new(100.0, 50.0, 20.0, 300.0),  // Left
                Rect::new(480.0, 50.0, 20.0, 300.0),  // Right
                Rect::new(100.0, 330.0, 150.0, 20.0), // Bottom-left
                Rect::new(350.0, 330.0, 150.0, 20.0), // Bottom-right
            ],
            gate: Rect::new(250.0, 330.0, 100.0, 20.0),
            levels: default_levels(),
            input: InputConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("arena width", self.arena.x)?;
        positive("arena height", self.arena.y)?;
        positive("truck width", self.truck.size.x)?;
        positive("truck height", self.truck.size.y)?;
        positive("truck speed", self.truck.speed)?;
        positive("bin width", self.bins.size.x)?;
        positive("bin height", self.bins.size.y)?;
        positive("bin speed", self.bins.speed)?;
        positive("keyboard speed multiplier", self.input.keyboard_speed_multiplier)?;
        positive("touch speed multiplier", self.input.touch_speed_multiplier)?;

        for (name, ms) in [
            ("input repeat interval", self.input.repeat_interval_ms),
            ("bin tick", self.timing.bin_tick_ms),
            ("countdown interval", self.timing.countdown_ms),
            ("moving decay interval", self.timing.moving_decay_ms),
            ("lifting duration", self.timing.lifting_ms),
            ("warning flash interval", self.timing.warning_flash_ms),
        ] {
            if ms == 0 {
                return Err(ConfigError::NonPositive(name));
            }
        }

        if self.truck.size.cmpgt(self.arena).any() {
            return Err(ConfigError::TooLarge("truck"));
        }
        if self.bins.size.cmpgt(self.arena).any() {
            return Err(ConfigError::TooLarge("bin"));
        }

        if !(0.0..=1.0).contains(&self.bins.jitter_chance) {
            return Err(ConfigError::JitterChance(self.bins.jitter_chance));
        }

        let home_max = max_position(self.arena, self.truck.size);
        if self.truck.home.cmplt(Vec2::ZERO).any() || self.truck.home.cmpgt(home_max).any() {
            return Err(ConfigError::HomeOutOfBounds);
        }

        if self.levels.is_empty() {
            return Err(ConfigError::NoLevels);
        }
        for (index, level) in self.levels.iter().enumerate() {
            if level.number as usize != index + 1 {
                return Err(ConfigError::LevelNumbering {
                    index,
                    found: level.number,
                });
            }
            if level.total_bins() == 0 {
                return Err(ConfigError::EmptyLevel(level.number));
            }
            if level.time_limit == 0 {
                return Err(ConfigError::NonPositive("level time limit"));
            }
        }

        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.barriers.len(), 5);
        assert_eq!(config.levels.len(), 4);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = GameConfig::from_json(r#"{ "truck": { "speed": 8.0 } }"#).unwrap();
        assert_eq!(config.truck.speed, 8.0);
        assert_eq!(config.truck.size, Vec2::new(TRUCK_WIDTH, TRUCK_HEIGHT));
        assert_eq!(config.arena, Vec2::new(GAME_WIDTH, GAME_HEIGHT));
    }

    #[test]
    fn test_json_roundtrip_keeps_catalog() {
        let config = GameConfig::default();
        let json = config.to_json().unwrap();
        let parsed = GameConfig::from_json(&json).unwrap();
        assert_eq!(parsed.levels, config.levels);
        assert_eq!(parsed.gate, config.gate);
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let mut config = GameConfig::default();
        config.timing.bin_tick_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::NonPositive(_))));
    }

    #[test]
    fn test_rejects_misnumbered_levels() {
        let mut config = GameConfig::default();
        config.levels.remove(1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LevelNumbering { index: 1, found: 3 })
        ));
    }

    #[test]
    fn test_rejects_empty_level_and_catalog() {
        let mut config = GameConfig::default();
        config.levels[0].stationary_bins = 0;
        assert!(matches!(config.validate(), Err(ConfigError::EmptyLevel(1))));

        config.levels.clear();
        assert!(matches!(config.validate(), Err(ConfigError::NoLevels)));
    }

    #[test]
    fn test_rejects_home_outside_arena() {
        let mut config = GameConfig::default();
        config.truck.home = Vec2::new(590.0, 10.0);
        assert!(matches!(config.validate(), Err(ConfigError::HomeOutOfBounds)));
    }

    #[test]
    fn test_rejects_jitter_out_of_range() {
        let mut config = GameConfig::default();
        config.bins.jitter_chance = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::JitterChance(_))));
    }

    #[test]
    fn test_input_source_names() {
        assert_eq!(InputSource::from_str("TOUCH"), Some(InputSource::Touch));
        assert_eq!(InputSource::from_str("keyboard"), Some(InputSource::Keyboard));
        assert_eq!(InputSource::from_str("mouse"), None);
        assert_eq!(InputSource::Touch.as_str(), "Touch");
    }

    #[test]
    fn test_speed_multiplier_per_source() {
        let input = InputConfig {
            touch_speed_multiplier: 1.5,
            ..Default::default()
        };
        assert_eq!(input.speed_multiplier(InputSource::Keyboard), 1.0);
        assert_eq!(input.speed_multiplier(InputSource::Touch), 1.5);
    }
}
