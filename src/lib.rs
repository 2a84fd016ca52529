//! Rock Drift - tick-driven vector asteroids on a wrap-around playfield
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity lists, subsystems, collisions, game state machine)
//! - `platform`: Drawing and input seams consumed by the simulation
//! - `ui`: Text overlays drawn by the orchestrator
//! - `settings`: Data-driven tuning loaded from JSON

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::{ConfigError, EntityError};
pub use settings::Settings;

/// Game configuration constants (defaults for `Settings`)
pub mod consts {
    /// Fixed tick period (10 Hz)
    pub const TICK_PERIOD_MS: u32 = 100;

    /// Playfield dimensions
    pub const DISPLAY_WIDTH: f32 = 320.0;
    pub const DISPLAY_HEIGHT: f32 = 240.0;

    /// Asteroid radius classes, strictly ordered large > medium > small
    pub const LARGE_ASTEROID_RADIUS: f32 = 24.0;
    pub const MEDIUM_ASTEROID_RADIUS: f32 = 12.0;
    pub const SMALL_ASTEROID_RADIUS: f32 = 6.0;
    /// Spawn velocity spread per axis
    pub const VELOCITY_VARIANCE: i32 = 8;
    /// Fragment velocity jitter spread per axis (children get parent ± half of this)
    pub const FRAGMENT_VARIANCE: i32 = 4;
    pub const MAX_ASTEROID_COUNT: usize = 64;

    /// Projectiles
    pub const PROJECTILE_RADIUS: f32 = 2.0;
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_LIFETIME_TICKS: u32 = 20;
    pub const MAX_PROJECTILE_COUNT: usize = 16;

    /// Craft polygon (offsets from center, vertex 0 is the nose)
    pub const CRAFT_VERTICES: [[f32; 2]; 5] = [
        [0.0, -10.0],
        [7.0, 10.0],
        [3.0, 5.0],
        [-3.0, 5.0],
        [-7.0, 10.0],
    ];
    pub const ROTATION_STEP_DEGREES: f32 = 15.0;
    /// Velocity added per tick while thrusting
    pub const THRUST_MAGNITUDE: f32 = 1.0;
    /// Drag coefficient: drag = |v|² / MAX_VELOCITY
    pub const MAX_VELOCITY: f32 = 30.0;
    /// Bounding radius of the craft plus some margin
    pub const WRAP_MARGIN: f32 = 12.0;
    pub const FIRE_COOLDOWN_TICKS: u32 = 3;
    pub const MAX_LIVE_PROJECTILES: usize = 5;

    /// Scoring and lives
    pub const ASTEROID_SCORE_POINTS: u32 = 100;
    pub const START_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;

    /// Debounce thresholds in ticks (2 seconds at 100 ms per tick)
    pub const CONFIRM_TICKS: u32 = 1;
    pub const HUD_REFRESH_TICKS: u32 = 2;
    pub const DEATH_TICKS: u32 = 20;
    pub const LEVEL_CLEAR_TICKS: u32 = 20;
    pub const NEXT_LEVEL_TICKS: u32 = 20;
    pub const GAME_OVER_TICKS: u32 = 20;
    pub const PLAY_AGAIN_TICKS: u32 = 20;
}
