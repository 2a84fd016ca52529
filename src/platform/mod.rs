//! Platform abstraction layer
//!
//! The simulation never touches hardware directly. It consumes:
//! - `Display`: line/circle primitives and a text cursor
//! - `InputSource`: one bitmask of active controls per tick

pub mod display;
pub mod input;

pub use display::{Color, CommandLog, Display, DrawCommand, NullDisplay};
pub use input::{Controls, InputSource, ScriptedInput};
