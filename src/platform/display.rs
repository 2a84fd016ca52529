//! Drawing seam
//!
//! The playfield is a retained framebuffer: anything drawn stays until it is
//! drawn again in `Color::Background`. Every subsystem therefore erases an
//! entity at its old pose before moving it.

use glam::Vec2;

/// The two pens of a monochrome vector display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Foreground,
    /// Drawing in the background color erases
    Background,
}

impl Color {
    /// Pen for a draw (`true`) or erase (`false`) pass
    #[inline]
    pub fn pen(draw: bool) -> Self {
        if draw { Color::Foreground } else { Color::Background }
    }
}

/// Drawing primitives provided by the host
pub trait Display {
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn set_cursor(&mut self, pos: Vec2);
    fn set_text_size(&mut self, size: u8);
    fn set_text_color(&mut self, color: Color);
    fn print(&mut self, text: &str);
}

/// Discards everything (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl Display for NullDisplay {
    fn draw_line(&mut self, _from: Vec2, _to: Vec2, _color: Color) {}
    fn draw_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
    fn set_cursor(&mut self, _pos: Vec2) {}
    fn set_text_size(&mut self, _size: u8) {}
    fn set_text_color(&mut self, _color: Color) {}
    fn print(&mut self, _text: &str) {}
}

/// A single recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line { from: Vec2, to: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    FilledCircle { center: Vec2, radius: f32, color: Color },
    /// Text printed with the cursor, size and color in effect at the time
    Text { pos: Vec2, size: u8, color: Color, text: String },
}

impl DrawCommand {
    pub fn color(&self) -> Color {
        match self {
            DrawCommand::Line { color, .. }
            | DrawCommand::Circle { color, .. }
            | DrawCommand::FilledCircle { color, .. }
            | DrawCommand::Text { color, .. } => *color,
        }
    }
}

/// Records every call so tests can inspect output
#[derive(Debug, Clone)]
pub struct CommandLog {
    pub commands: Vec<DrawCommand>,
    cursor: Vec2,
    text_size: u8,
    text_color: Color,
}

impl Default for CommandLog {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            cursor: Vec2::ZERO,
            text_size: 1,
            text_color: Color::Foreground,
        }
    }
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of times `text` was printed in `color`
    pub fn text_count(&self, text: &str, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { text: t, color: c, .. } if t == text && *c == color))
            .count()
    }

    /// Number of commands drawn with `color`
    pub fn count(&self, color: Color) -> usize {
        self.commands.iter().filter(|c| c.color() == color).count()
    }
}

impl Display for CommandLog {
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FilledCircle {
            center,
            radius,
            color,
        });
    }

    fn set_cursor(&mut self, pos: Vec2) {
        self.cursor = pos;
    }

    fn set_text_size(&mut self, size: u8) {
        self.text_size = size;
    }

    fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    fn print(&mut self, text: &str) {
        self.commands.push(DrawCommand::Text {
            pos: self.cursor,
            size: self.text_size,
            color: self.text_color,
            text: text.to_string(),
        });
    }
}
