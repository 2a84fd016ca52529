//! The player's craft: a rigid polygon with drag-limited thrust

use glam::Vec2;

use super::SubsystemPhase;
use super::projectile::ProjectileSubsystem;
use super::vector::{
    FIXED_SCALE, FixedMat2, FixedVec2, NumericPolicy, RotationPair, magnitude, normalize, rotate,
};
use crate::platform::{Color, Controls, Display};
use crate::settings::{CraftSettings, Settings};

/// Control state latched by the orchestrator, applied on the next craft tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CraftControls {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
}

impl From<Controls> for CraftControls {
    fn from(c: Controls) -> Self {
        Self {
            turn_left: c.contains(Controls::TURN_LEFT),
            turn_right: c.contains(Controls::TURN_RIGHT),
            thrust: c.contains(Controls::THRUST),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Craft {
    pub center: Vec2,
    /// Offsets from `center`; vertex 0 is the nose
    pub vertices: Vec<Vec2>,
    pub velocity: Vec2,
}

impl Craft {
    /// Nose offset from the center; the center itself for an empty polygon
    pub fn nose_offset(&self) -> Vec2 {
        self.vertices.first().copied().unwrap_or(Vec2::ZERO)
    }

    pub fn nose(&self) -> Vec2 {
        self.center + self.nose_offset()
    }
}

/// Limits how often and how many projectiles the craft can have in flight
#[derive(Debug, Clone)]
pub struct FireControl {
    cooldown_ticks: u32,
    max_live: usize,
    remaining: u32,
}

impl FireControl {
    pub fn new(cooldown_ticks: u32, max_live: usize) -> Self {
        Self {
            cooldown_ticks,
            max_live,
            remaining: 0,
        }
    }

    pub fn cool(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn ready(&self, live: usize) -> bool {
        self.remaining == 0 && live < self.max_live
    }

    pub fn reset(&mut self) {
        self.remaining = 0;
    }

    fn arm(&mut self) {
        self.remaining = self.cooldown_ticks;
    }
}

pub struct CraftSubsystem {
    settings: CraftSettings,
    extent: Vec2,
    spawn: Vec2,
    craft: Craft,
    heading_magnitude: f32,
    rotation: RotationPair,
    fixed_ccw: FixedMat2<FIXED_SCALE>,
    fixed_cw: FixedMat2<FIXED_SCALE>,
    controls: CraftControls,
    fire: FireControl,
    phase: SubsystemPhase,
    enabled: bool,
    drawn: bool,
}

impl CraftSubsystem {
    pub fn new(settings: &Settings) -> Self {
        let rotation = RotationPair::from_degrees(settings.craft.rotation_step_degrees);
        let mut subsystem = Self {
            settings: settings.craft.clone(),
            extent: settings.playfield.extent(),
            spawn: settings.playfield.center(),
            craft: Craft {
                center: Vec2::ZERO,
                vertices: Vec::new(),
                velocity: Vec2::ZERO,
            },
            heading_magnitude: 0.0,
            fixed_ccw: FixedMat2::from_mat2(&rotation.ccw),
            fixed_cw: FixedMat2::from_mat2(&rotation.cw),
            rotation,
            controls: CraftControls::default(),
            fire: FireControl::new(
                settings.craft.fire_cooldown_ticks,
                settings.craft.max_live_projectiles,
            ),
            phase: SubsystemPhase::Init,
            enabled: false,
            drawn: false,
        };
        subsystem.init();
        subsystem
    }

    /// Centered, pointing along the configured nose, at rest
    pub fn init(&mut self) {
        self.reset_pose();
        self.phase = SubsystemPhase::Init;
        self.enabled = false;
        self.drawn = false;
    }

    fn reset_pose(&mut self) {
        self.craft = Craft {
            center: self.spawn,
            vertices: self
                .settings
                .vertices
                .iter()
                .map(|&v| Vec2::from_array(v))
                .collect(),
            velocity: Vec2::ZERO,
        };
        self.heading_magnitude = magnitude(self.craft.nose_offset());
        self.controls = CraftControls::default();
        self.fire.reset();
    }

    /// Put a halted craft back at the spawn pose. Ignored while shown.
    pub fn respawn(&mut self) {
        if self.drawn {
            log::warn!("respawn ignored while craft is on screen");
            return;
        }
        self.reset_pose();
        self.phase = SubsystemPhase::Init;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
        log::debug!("craft enabled");
    }

    /// Erase the shape if shown and halt. Safe to call repeatedly.
    pub fn disable(&mut self, display: &mut dyn Display) {
        self.erase(display);
        self.enabled = false;
        self.phase = SubsystemPhase::Init;
        log::debug!("craft disabled");
    }

    pub fn set_controls(&mut self, controls: impl Into<CraftControls>) {
        self.controls = controls.into();
    }

    pub fn tick(&mut self, display: &mut dyn Display) {
        if self.enabled {
            log::trace!("craft state: {:?}", self.phase);
        }
        match self.phase {
            SubsystemPhase::Init => {
                if self.enabled {
                    self.phase = SubsystemPhase::Play;
                }
            }
            SubsystemPhase::Play => {
                if !self.enabled {
                    self.disable(display);
                    return;
                }
                self.fire.cool();
                self.erase(display);
                self.translate(self.controls.thrust);
                self.wrap();
                match (self.controls.turn_left, self.controls.turn_right) {
                    (true, false) => self.rotate(true),
                    (false, true) => self.rotate(false),
                    _ => {}
                }
                self.draw(display);
            }
        }
    }

    /// Unit vector from the center toward the nose
    pub fn heading(&self) -> Vec2 {
        let nose = self.craft.nose_offset();
        match self.settings.numeric {
            NumericPolicy::Float => normalize(nose, self.heading_magnitude),
            NumericPolicy::Fixed => {
                let scaled = (self.heading_magnitude * FIXED_SCALE as f32).round() as i32;
                FixedVec2::<FIXED_SCALE>::from_vec2(nose)
                    .normalize(scaled)
                    .to_vec2()
            }
        }
    }

    /// Apply quadratic drag, then thrust along the heading when requested,
    /// then move the center by the new velocity.
    pub fn translate(&mut self, thrust: bool) {
        let v = self.craft.velocity;
        let speed = magnitude(v);
        let drag = -normalize(v, speed) * (speed * speed / self.settings.max_velocity);
        let mut next = v + drag;
        if thrust {
            next += self.heading() * self.settings.thrust;
        }
        self.craft.velocity = next;
        self.craft.center += next;
    }

    /// Toroidal wrap of the center with a margin beyond each edge
    pub fn wrap(&mut self) {
        let m = self.settings.wrap_margin;
        let c = &mut self.craft.center;
        if c.x < -m {
            c.x = self.extent.x + m;
        } else if c.x > self.extent.x + m {
            c.x = -m;
        }
        if c.y < -m {
            c.y = self.extent.y + m;
        } else if c.y > self.extent.y + m {
            c.y = -m;
        }
    }

    /// Rotate every vertex one step; `ccw` turns left on screen
    pub fn rotate(&mut self, ccw: bool) {
        match self.settings.numeric {
            NumericPolicy::Float => {
                let m = *self.rotation.matrix(ccw);
                for v in &mut self.craft.vertices {
                    *v = rotate(&m, *v);
                }
            }
            NumericPolicy::Fixed => {
                let m = if ccw { self.fixed_ccw } else { self.fixed_cw };
                for v in &mut self.craft.vertices {
                    *v = m.rotate(FixedVec2::from_vec2(*v)).to_vec2();
                }
            }
        }
    }

    fn outline(&self, display: &mut dyn Display, color: Color) {
        let c = self.craft.center;
        let verts = &self.craft.vertices;
        for (i, &v) in verts.iter().enumerate() {
            let next = verts[(i + 1) % verts.len()];
            display.draw_line(c + v, c + next, color);
        }
    }

    fn draw(&mut self, display: &mut dyn Display) {
        self.outline(display, Color::Foreground);
        self.drawn = true;
    }

    fn erase(&mut self, display: &mut dyn Display) {
        if self.drawn {
            self.outline(display, Color::Background);
            self.drawn = false;
        }
    }

    /// Fire one projectile from the nose if the cooldown and live limit allow
    pub fn fire(&mut self, projectiles: &mut ProjectileSubsystem) -> bool {
        if !self.enabled || !self.fire.ready(projectiles.count()) {
            return false;
        }
        match projectiles.fire(self.craft.nose(), self.heading()) {
            Ok(_) => {
                self.fire.arm();
                true
            }
            Err(_) => false,
        }
    }

    /// Absolute vertex positions followed by the center
    pub fn principal_points(&self) -> Vec<Vec2> {
        let c = self.craft.center;
        self.craft
            .vertices
            .iter()
            .map(|&v| c + v)
            .chain(std::iter::once(c))
            .collect()
    }

    pub fn craft(&self) -> &Craft {
        &self.craft
    }

    /// Place the craft directly (tests and scripted scenarios)
    pub fn set_motion(&mut self, center: Vec2, velocity: Vec2) {
        self.craft.center = center;
        self.craft.velocity = velocity;
    }

    pub fn phase(&self) -> SubsystemPhase {
        self.phase
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_drawn(&self) -> bool {
        self.drawn
    }
}
