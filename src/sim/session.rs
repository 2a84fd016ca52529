//! Per-game progress: level, lives, score and debounce counters

use serde::{Deserialize, Serialize};

use crate::settings::GameSettings;

/// Tick counters driving the orchestrator's debounced transitions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    /// Ticks spent in the current orchestrator state
    pub in_state: u32,
    /// Consecutive play ticks with no live asteroid
    pub level_clear: u32,
    /// Play ticks since the HUD was last redrawn
    pub hud_refresh: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub level: u32,
    pub lives: u8,
    pub score: u32,
    start_lives: u8,
    /// Global run signal; clearing it unwinds the game back to `Init`
    #[serde(skip)]
    pub enabled: bool,
    #[serde(skip)]
    pub counters: Counters,
}

impl GameSession {
    pub fn new(settings: &GameSettings) -> Self {
        Self {
            level: 1,
            lives: settings.start_lives.min(settings.max_lives),
            score: 0,
            start_lives: settings.start_lives.min(settings.max_lives),
            enabled: false,
            counters: Counters::default(),
        }
    }

    /// Back to level 1 with full lives and no score. The run signal is kept.
    pub fn reset(&mut self) {
        self.level = 1;
        self.lives = self.start_lives;
        self.score = 0;
        self.counters = Counters::default();
    }

    pub fn award(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Remove one life; returns the lives left
    pub fn lose_life(&mut self) -> u8 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn advance_level(&mut self) -> u32 {
        self.level += 1;
        self.level
    }

    /// Number of large asteroids in the current level's wave
    pub fn wave_size(&self) -> u32 {
        self.level
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }
}
