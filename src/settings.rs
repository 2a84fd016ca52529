//! Game settings and tuning
//!
//! Every section has defaults matching `crate::consts`, so a JSON file only
//! needs to name the values it overrides.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{CollisionShape, NumericPolicy, ReseedPolicy};

/// Playfield extents and tick period
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldSettings {
    pub width: f32,
    pub height: f32,
    /// Period of the external tick source; debounce thresholds assume it
    pub tick_period_ms: u32,
}

impl Default for PlayfieldSettings {
    fn default() -> Self {
        Self {
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
            tick_period_ms: TICK_PERIOD_MS,
        }
    }
}

impl PlayfieldSettings {
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.extent() / 2.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidSettings {
    pub large_radius: f32,
    pub medium_radius: f32,
    pub small_radius: f32,
    pub velocity_variance: i32,
    pub fragment_variance: i32,
    pub capacity: usize,
    pub reseed: ReseedPolicy,
}

impl Default for AsteroidSettings {
    fn default() -> Self {
        Self {
            large_radius: LARGE_ASTEROID_RADIUS,
            medium_radius: MEDIUM_ASTEROID_RADIUS,
            small_radius: SMALL_ASTEROID_RADIUS,
            velocity_variance: VELOCITY_VARIANCE,
            fragment_variance: FRAGMENT_VARIANCE,
            capacity: MAX_ASTEROID_COUNT,
            reseed: ReseedPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileSettings {
    pub radius: f32,
    pub speed: f32,
    pub lifetime_ticks: u32,
    pub capacity: usize,
}

impl Default for ProjectileSettings {
    fn default() -> Self {
        Self {
            radius: PROJECTILE_RADIUS,
            speed: PROJECTILE_SPEED,
            lifetime_ticks: PROJECTILE_LIFETIME_TICKS,
            capacity: MAX_PROJECTILE_COUNT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftSettings {
    /// Polygon offsets from the center; vertex 0 defines the heading
    pub vertices: Vec<[f32; 2]>,
    pub rotation_step_degrees: f32,
    pub thrust: f32,
    pub max_velocity: f32,
    pub wrap_margin: f32,
    pub numeric: NumericPolicy,
    pub fire_cooldown_ticks: u32,
    pub max_live_projectiles: usize,
}

impl Default for CraftSettings {
    fn default() -> Self {
        Self {
            vertices: CRAFT_VERTICES.to_vec(),
            rotation_step_degrees: ROTATION_STEP_DEGREES,
            thrust: THRUST_MAGNITUDE,
            max_velocity: MAX_VELOCITY,
            wrap_margin: WRAP_MARGIN,
            numeric: NumericPolicy::default(),
            fire_cooldown_ticks: FIRE_COOLDOWN_TICKS,
            max_live_projectiles: MAX_LIVE_PROJECTILES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionSettings {
    pub shape: CollisionShape,
    /// Flag a projectile collided as soon as it scores a hit
    pub consume_projectile: bool,
    pub asteroid_points: u32,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            shape: CollisionShape::default(),
            consume_projectile: true,
            asteroid_points: ASTEROID_SCORE_POINTS,
        }
    }
}

/// Session rules and debounce thresholds (all in ticks)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub start_lives: u8,
    pub max_lives: u8,
    pub confirm_ticks: u32,
    pub hud_refresh_ticks: u32,
    pub death_ticks: u32,
    pub level_clear_ticks: u32,
    pub next_level_ticks: u32,
    pub game_over_ticks: u32,
    pub play_again_ticks: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            start_lives: START_LIVES,
            max_lives: MAX_LIVES,
            confirm_ticks: CONFIRM_TICKS,
            hud_refresh_ticks: HUD_REFRESH_TICKS,
            death_ticks: DEATH_TICKS,
            level_clear_ticks: LEVEL_CLEAR_TICKS,
            next_level_ticks: NEXT_LEVEL_TICKS,
            game_over_ticks: GAME_OVER_TICKS,
            play_again_ticks: PLAY_AGAIN_TICKS,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playfield: PlayfieldSettings,
    pub asteroids: AsteroidSettings,
    pub projectiles: ProjectileSettings,
    pub craft: CraftSettings,
    pub collision: CollisionSettings,
    pub game: GameSettings,
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.playfield.width <= 0.0 || self.playfield.height <= 0.0 {
            return invalid("playfield extents must be positive");
        }
        if self.playfield.tick_period_ms == 0 {
            return invalid("tick period must be non-zero");
        }

        let a = &self.asteroids;
        if !(a.large_radius > a.medium_radius
            && a.medium_radius > a.small_radius
            && a.small_radius > 0.0)
        {
            return invalid("asteroid radii must satisfy large > medium > small > 0");
        }
        if a.velocity_variance < 2 || a.fragment_variance < 0 {
            return invalid("velocity variance must be at least 2");
        }
        if a.capacity == 0 || self.projectiles.capacity == 0 {
            return invalid("entity capacities must be non-zero");
        }

        if self.projectiles.lifetime_ticks == 0 {
            return invalid("projectile lifetime must be non-zero");
        }

        let c = &self.craft;
        if c.vertices.is_empty() {
            return invalid("craft needs at least one vertex");
        }
        if c.vertices[0] == [0.0, 0.0] {
            return invalid("craft vertex 0 defines the heading and cannot be the center");
        }
        if c.max_velocity <= 0.0 {
            return invalid("craft max velocity must be positive");
        }

        let g = &self.game;
        if g.start_lives == 0 || g.start_lives > g.max_lives {
            return invalid("start lives must be within 1..=max_lives");
        }
        if g.confirm_ticks == 0 || g.hud_refresh_ticks == 0 {
            return invalid("debounce thresholds must be non-zero");
        }

        Ok(())
    }
}
