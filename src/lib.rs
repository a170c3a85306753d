//! Trash Truck - a sideloader arcade game engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, bins, truck, pickup, lifecycle)
//! - `timers`: Named game timers on a simulated millisecond clock
//! - `input`: Keyboard/touch hold-to-move coordination
//! - `engine`: The mount contract tying it all together
//! - `config`: Static, data-driven game configuration

pub mod config;
pub mod engine;
pub mod input;
pub mod sim;
pub mod timers;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{ConfigError, GameConfig, InputSource};
pub use engine::Engine;
pub use input::{Control, Key};
pub use sim::{Direction, GameState, GameStatus};

/// Default game configuration constants
pub mod consts {
    /// Arena dimensions
    pub const GAME_WIDTH: f32 = 600.0;
    pub const GAME_HEIGHT: f32 = 400.0;

    /// Truck defaults
    pub const TRUCK_WIDTH: f32 = 80.0;
    pub const TRUCK_HEIGHT: f32 = 40.0;
    pub const TRUCK_SPEED: f32 = 5.0;
    pub const TRUCK_HOME_X: f32 = 200.0;
    pub const TRUCK_HOME_Y: f32 = 200.0;

    /// Bin defaults
    pub const BIN_WIDTH: f32 = 30.0;
    pub const BIN_HEIGHT: f32 = 30.0;
    pub const BIN_SPEED: f32 = 2.0;
    /// Chance per bin tick that a moving bin picks a new direction
    pub const BIN_JITTER_CHANCE: f64 = 0.02;
    /// Max vertical-center offset between truck and bin for a pickup
    pub const PICKUP_TOLERANCE: f32 = 20.0;
    /// Rejection-sampling attempts before falling back to a grid scan
    pub const PLACEMENT_ATTEMPTS: u32 = 1000;

    /// Timer periods (milliseconds)
    pub const INPUT_REPEAT_MS: u64 = 50;
    pub const BIN_TICK_MS: u64 = 50;
    pub const COUNTDOWN_MS: u64 = 1000;
    pub const MOVING_DECAY_MS: u64 = 100;
    pub const LIFTING_MS: u64 = 200;
    pub const WARNING_FLASH_MS: u64 = 500;
    /// Seconds left at which the low-time warning starts flashing
    pub const WARNING_THRESHOLD_SECS: u32 = 10;
}

/// Format whole seconds as `M:SS`
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
