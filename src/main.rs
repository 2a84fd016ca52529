//! Rock Drift headless runner
//!
//! Usage: `rock-drift [settings.json] [ticks]`
//!
//! Replays a scripted control tape through the simulation at the configured
//! tick period (without sleeping), logs state transitions and prints the final
//! session as JSON. Set `RUST_LOG=debug` to see subsystem activity.

use rock_drift::Settings;
use glam::Vec2;
use rock_drift::platform::{Color, Controls, Display, ScriptedInput};
use rock_drift::sim::Game;

const DEFAULT_TICKS: usize = 600;

/// Tallies draw and erase calls without keeping them
#[derive(Debug, Default)]
struct DrawTally {
    draws: u64,
    erases: u64,
    pen: Option<Color>,
}

impl DrawTally {
    fn record(&mut self, color: Color) {
        match color {
            Color::Foreground => self.draws += 1,
            Color::Background => self.erases += 1,
        }
    }
}

impl Display for DrawTally {
    fn draw_line(&mut self, _from: Vec2, _to: Vec2, color: Color) {
        self.record(color);
    }

    fn draw_circle(&mut self, _center: Vec2, _radius: f32, color: Color) {
        self.record(color);
    }

    fn fill_circle(&mut self, _center: Vec2, _radius: f32, color: Color) {
        self.record(color);
    }

    fn set_cursor(&mut self, _pos: Vec2) {}

    fn set_text_size(&mut self, _size: u8) {}

    fn set_text_color(&mut self, color: Color) {
        self.pen = Some(color);
    }

    fn print(&mut self, _text: &str) {
        self.record(self.pen.unwrap_or(Color::Foreground));
    }
}

/// Confirm the title screen, then alternate turning, thrusting and firing
fn demo_tape(ticks: usize) -> ScriptedInput {
    let mut tape = ScriptedInput::default()
        .hold(Controls::NONE, 2)
        .hold(Controls::TOUCH, 2);
    let pattern = [
        (Controls::FIRE, 6),
        (Controls::TURN_LEFT | Controls::FIRE, 4),
        (Controls::THRUST, 3),
        (Controls::TURN_RIGHT | Controls::FIRE, 8),
        (Controls::NONE, 4),
    ];
    while tape.remaining() < ticks {
        for &(controls, hold) in &pattern {
            tape = tape.hold(controls, hold);
        }
    }
    tape
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let ticks = match args.next() {
        Some(n) => n.parse()?,
        None => DEFAULT_TICKS,
    };

    let mut game = Game::new(&settings)?;
    let mut display = DrawTally::default();
    let mut input = demo_tape(ticks);

    log::info!(
        "Running {} ticks ({} ms simulated)",
        ticks,
        ticks as u64 * game.ms_per_tick() as u64
    );
    game.enable();
    for _ in 0..ticks {
        game.frame(&mut display, &mut input);
    }

    log::info!(
        "Finished in {:?} after {} draws and {} erases",
        game.state(),
        display.draws,
        display.erases
    );
    println!("{}", serde_json::to_string_pretty(game.session())?);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rock Drift (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    if run().is_err() {
        std::process::exit(1);
    }
}
