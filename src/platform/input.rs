//! Input sampling seam

use serde::{Deserialize, Serialize};

/// Bitmask of controls active during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Controls(pub u8);

impl Controls {
    pub const NONE: Controls = Controls(0);
    pub const TURN_LEFT: Controls = Controls(0x01);
    pub const THRUST: Controls = Controls(0x02);
    pub const TURN_RIGHT: Controls = Controls(0x04);
    pub const FIRE: Controls = Controls(0x08);
    /// Screen touch, used to confirm menus
    pub const TOUCH: Controls = Controls(0x10);

    #[inline]
    pub fn contains(self, other: Controls) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    #[inline]
    pub fn union(self, other: Controls) -> Controls {
        Controls(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for Controls {
    type Output = Controls;

    fn bitor(self, rhs: Controls) -> Controls {
        self.union(rhs)
    }
}

/// Host-provided control sampling, called once per orchestrator tick
pub trait InputSource {
    fn sample(&mut self) -> Controls;
}

impl InputSource for Controls {
    fn sample(&mut self) -> Controls {
        *self
    }
}

/// Replays a recorded tape of control masks, then reports no input
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    tape: Vec<Controls>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(tape: Vec<Controls>) -> Self {
        Self { tape, cursor: 0 }
    }

    /// Append `controls` held for `ticks` consecutive ticks
    pub fn hold(mut self, controls: Controls, ticks: usize) -> Self {
        self.tape.extend(std::iter::repeat_n(controls, ticks));
        self
    }

    pub fn remaining(&self) -> usize {
        self.tape.len() - self.cursor
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self) -> Controls {
        let controls = self.tape.get(self.cursor).copied().unwrap_or_default();
        self.cursor = (self.cursor + 1).min(self.tape.len());
        controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let c = Controls::THRUST | Controls::FIRE;
        assert!(c.contains(Controls::THRUST));
        assert!(c.contains(Controls::FIRE));
        assert!(!c.contains(Controls::TURN_LEFT));
        assert!(!c.contains(Controls::NONE));
    }

    #[test]
    fn test_scripted_input_runs_out() {
        let mut input = ScriptedInput::default()
            .hold(Controls::TOUCH, 2)
            .hold(Controls::NONE, 1);
        assert_eq!(input.remaining(), 3);
        assert_eq!(input.sample(), Controls::TOUCH);
        assert_eq!(input.sample(), Controls::TOUCH);
        assert_eq!(input.sample(), Controls::NONE);
        assert_eq!(input.sample(), Controls::NONE);
        assert_eq!(input.remaining(), 0);
    }
}
