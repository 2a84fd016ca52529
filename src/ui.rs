//! Text overlays: title, HUD, game over and replay prompt
//!
//! Each overlay remembers whether it is on screen (and, for the HUD, exactly
//! which strings), so hiding erases only what was drawn and never twice.

use glam::Vec2;

use crate::platform::{Color, Display};

/// Width of one glyph cell at text size 1, spacing included
const GLYPH_WIDTH: f32 = 6.0;
/// Height of one glyph cell at text size 1
const GLYPH_HEIGHT: f32 = 8.0;
/// Glyph printed once per remaining life
const LIFE_GLYPH: &str = "A";

#[derive(Debug, Clone, Copy)]
struct Label {
    text: &'static str,
    size: u8,
    /// Vertical offset of the label's top edge from the playfield center
    offset_y: f32,
}

pub const TITLE_TEXT: &str = "ROCK DRIFT";
pub const TOUCH_TEXT: &str = "TOUCH TO PLAY";
pub const GAME_OVER_TEXT: &str = "GAME OVER";
pub const PLAY_AGAIN_TEXT: &str = "TOUCH TO PLAY AGAIN";

const TITLE: Label = Label {
    text: TITLE_TEXT,
    size: 5,
    offset_y: -52.0,
};
const TOUCH: Label = Label {
    text: TOUCH_TEXT,
    size: 3,
    offset_y: 15.0,
};
const GAME_OVER: Label = Label {
    text: GAME_OVER_TEXT,
    size: 4,
    offset_y: -52.0,
};
const PLAY_AGAIN: Label = Label {
    text: PLAY_AGAIN_TEXT,
    size: 2,
    offset_y: 15.0,
};

const HUD_SIZE: u8 = 2;
const SCORE_POS: Vec2 = Vec2::new(2.0, 2.0);
const LIVES_POS: Vec2 = Vec2::new(2.0, 2.0 + (GLYPH_HEIGHT + 1.0) * HUD_SIZE as f32);

fn print_at(display: &mut dyn Display, pos: Vec2, size: u8, text: &str, draw: bool) {
    display.set_text_color(Color::pen(draw));
    display.set_cursor(pos);
    display.set_text_size(size);
    display.print(text);
}

/// Score and lives strings as they were last drawn
#[derive(Debug, Clone, PartialEq, Eq)]
struct Hud {
    score: String,
    lives: String,
}

impl Hud {
    fn new(score: u32, lives: u8) -> Self {
        Self {
            score: score.to_string(),
            lives: LIFE_GLYPH.repeat(lives as usize),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Overlays {
    center: Vec2,
    welcome: bool,
    game_over: bool,
    play_again: bool,
    hud: Option<Hud>,
}

impl Overlays {
    pub fn new(extent: Vec2) -> Self {
        Self {
            center: extent / 2.0,
            welcome: false,
            game_over: false,
            play_again: false,
            hud: None,
        }
    }

    /// Forget everything on screen without drawing (display was cleared)
    pub fn reset(&mut self) {
        *self = Self::new(self.center * 2.0);
    }

    fn label(&self, display: &mut dyn Display, label: Label, draw: bool) {
        let width = label.text.len() as f32 * GLYPH_WIDTH * label.size as f32;
        let pos = Vec2::new(self.center.x - width / 2.0, self.center.y + label.offset_y);
        print_at(display, pos.max(Vec2::ZERO), label.size, label.text, draw);
    }

    pub fn show_welcome(&mut self, display: &mut dyn Display) {
        if !self.welcome {
            self.label(display, TITLE, true);
            self.label(display, TOUCH, true);
            self.welcome = true;
        }
    }

    pub fn hide_welcome(&mut self, display: &mut dyn Display) {
        if self.welcome {
            self.label(display, TITLE, false);
            self.label(display, TOUCH, false);
            self.welcome = false;
        }
    }

    pub fn show_game_over(&mut self, display: &mut dyn Display) {
        if !self.game_over {
            self.label(display, GAME_OVER, true);
            self.game_over = true;
        }
    }

    pub fn hide_game_over(&mut self, display: &mut dyn Display) {
        if self.game_over {
            self.label(display, GAME_OVER, false);
            self.game_over = false;
        }
    }

    pub fn show_play_again(&mut self, display: &mut dyn Display) {
        if !self.play_again {
            self.label(display, PLAY_AGAIN, true);
            self.play_again = true;
        }
    }

    pub fn hide_play_again(&mut self, display: &mut dyn Display) {
        if self.play_again {
            self.label(display, PLAY_AGAIN, false);
            self.play_again = false;
        }
    }

    /// Draw score and lives, touching only the strings that changed
    pub fn show_hud(&mut self, display: &mut dyn Display, score: u32, lives: u8) {
        let next = Hud::new(score, lives);
        match self.hud.take() {
            Some(old) => {
                if old.score != next.score {
                    print_at(display, SCORE_POS, HUD_SIZE, &old.score, false);
                    print_at(display, SCORE_POS, HUD_SIZE, &next.score, true);
                }
                if old.lives != next.lives {
                    print_at(display, LIVES_POS, HUD_SIZE, &old.lives, false);
                    print_at(display, LIVES_POS, HUD_SIZE, &next.lives, true);
                }
            }
            None => {
                print_at(display, SCORE_POS, HUD_SIZE, &next.score, true);
                print_at(display, LIVES_POS, HUD_SIZE, &next.lives, true);
            }
        }
        self.hud = Some(next);
    }

    pub fn hide_hud(&mut self, display: &mut dyn Display) {
        if let Some(old) = self.hud.take() {
            print_at(display, SCORE_POS, HUD_SIZE, &old.score, false);
            print_at(display, LIVES_POS, HUD_SIZE, &old.lives, false);
        }
    }

    pub fn hide_all(&mut self, display: &mut dyn Display) {
        self.hide_welcome(display);
        self.hide_hud(display);
        self.hide_game_over(display);
        self.hide_play_again(display);
    }

    pub fn welcome_shown(&self) -> bool {
        self.welcome
    }

    pub fn hud_shown(&self) -> bool {
        self.hud.is_some()
    }

    pub fn game_over_shown(&self) -> bool {
        self.game_over
    }

    pub fn play_again_shown(&self) -> bool {
        self.play_again
    }
}
