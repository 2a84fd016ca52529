//! Asteroid field: spawning, drift and fragmentation

use glam::Vec2;
use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::SubsystemPhase;
use super::entity::{EntityId, EntityList, Mobile, MobileCircle};
use crate::error::EntityError;
use crate::platform::{Color, Display};
use crate::settings::{AsteroidSettings, Settings};

/// Radius classes, strictly ordered Large > Medium > Small
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    Large,
    Medium,
    Small,
}

impl SizeClass {
    /// Class of the two fragments a collision produces, one step down
    pub fn child(self) -> Option<SizeClass> {
        match self {
            SizeClass::Large => Some(SizeClass::Medium),
            SizeClass::Medium => Some(SizeClass::Small),
            SizeClass::Small => None,
        }
    }
}

/// When the fragmentation generator is reseeded.
///
/// The two reseeding schemes are inconsistent with each other: a constant seed
/// at enable makes every wave reproducible, a clock seed per fragmentation
/// makes fragment velocities unpredictable. Both are kept selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReseedPolicy {
    /// Reseed with a fixed constant each time the subsystem is enabled
    OnEnable { seed: u64 },
    /// Reseed from the wall clock before every fragmentation
    PerFragmentation,
    /// Never reseed after construction
    Never,
}

impl Default for ReseedPolicy {
    fn default() -> Self {
        ReseedPolicy::OnEnable { seed: 0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub body: MobileCircle,
    pub class: SizeClass,
}

impl Mobile for Asteroid {
    fn body(&self) -> &MobileCircle {
        &self.body
    }

    fn body_mut(&mut self) -> &mut MobileCircle {
        &mut self.body
    }
}

fn draw_asteroid(display: &mut dyn Display, asteroid: &Asteroid, draw: bool) {
    display.draw_circle(asteroid.body.pos, asteroid.body.radius, Color::pen(draw));
}

pub struct AsteroidSubsystem<R = Pcg32> {
    settings: AsteroidSettings,
    extent: Vec2,
    list: EntityList<Asteroid>,
    phase: SubsystemPhase,
    enabled: bool,
    rng: R,
}

impl AsteroidSubsystem<Pcg32> {
    pub fn new(settings: &Settings) -> Self {
        Self::with_rng(settings, Pcg32::seed_from_u64(0))
    }
}

impl<R: RngCore + SeedableRng> AsteroidSubsystem<R> {
    /// Build with an injected generator
    pub fn with_rng(settings: &Settings, rng: R) -> Self {
        Self {
            settings: settings.asteroids.clone(),
            extent: settings.playfield.extent(),
            list: EntityList::with_capacity(settings.asteroids.capacity),
            phase: SubsystemPhase::Init,
            enabled: false,
            rng,
        }
    }

    /// Return to the power-on state, dropping every asteroid without drawing
    pub fn init(&mut self) {
        self.list = EntityList::with_capacity(self.settings.capacity);
        self.phase = SubsystemPhase::Init;
        self.enabled = false;
    }

    /// Leave `Init` on the next tick
    pub fn enable(&mut self) {
        self.enabled = true;
        if let ReseedPolicy::OnEnable { seed } = self.settings.reseed {
            self.rng = R::seed_from_u64(seed);
        }
        log::debug!("asteroids enabled");
    }

    /// Erase and free every asteroid and halt. Safe to call repeatedly.
    pub fn disable(&mut self, display: &mut dyn Display) {
        self.list.erase_all(|a| draw_asteroid(display, a, false));
        self.enabled = false;
        self.phase = SubsystemPhase::Init;
        log::debug!("asteroids disabled");
    }

    pub fn radius(&self, class: SizeClass) -> f32 {
        match class {
            SizeClass::Large => self.settings.large_radius,
            SizeClass::Medium => self.settings.medium_radius,
            SizeClass::Small => self.settings.small_radius,
        }
    }

    pub fn spawn(&mut self, pos: Vec2, vel: Vec2, class: SizeClass) -> Result<EntityId, EntityError> {
        let body = MobileCircle::new(pos, vel, self.radius(class));
        self.list.add(Asteroid { body, class }).inspect_err(|err| {
            log::warn!("asteroid spawn skipped: {err}");
        })
    }

    /// Spawn `n` large asteroids on the top or left edge with random drift.
    ///
    /// Returns how many were actually added.
    pub fn generate(&mut self, n: u32) -> u32 {
        let half = (self.settings.velocity_variance / 2).max(1);
        let mut spawned = 0;
        for _ in 0..n {
            let vx = self.signed_speed(half);
            let vy = self.signed_speed(half);
            let pos = if self.rng.random_bool(0.5) {
                Vec2::new(self.rng.random_range(0..(self.extent.x as i32).max(1)) as f32, 0.0)
            } else {
                Vec2::new(0.0, self.rng.random_range(0..(self.extent.y as i32).max(1)) as f32)
            };
            if self.spawn(pos, Vec2::new(vx, vy), SizeClass::Large).is_ok() {
                spawned += 1;
            }
        }
        log::debug!("generated {spawned}/{n} asteroids");
        spawned
    }

    fn signed_speed(&mut self, half: i32) -> f32 {
        let speed = self.rng.random_range(1..=half) as f32;
        if self.rng.random_bool(0.5) { -speed } else { speed }
    }

    fn jitter(&mut self) -> f32 {
        let half = self.settings.fragment_variance / 2;
        self.rng.random_range(-half..=half) as f32
    }

    pub fn tick(&mut self, display: &mut dyn Display) {
        if self.enabled {
            log::trace!("asteroid state: {:?}", self.phase);
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
                let mut pass = self.list.traversal();
                while let Some(id) = pass.advance(&self.list) {
                    let collided = self.list.get(id).is_some_and(|a| a.body.collided);
                    if collided {
                        self.fragment(id, display);
                    } else if let Some(asteroid) = self.list.get_mut(id) {
                        draw_asteroid(display, asteroid, false);
                        asteroid.body.advance_wrapped(self.extent);
                        draw_asteroid(display, asteroid, true);
                    }
                }
            }
        }
    }

    /// Erase and destroy a collided asteroid, leaving two fragments one class
    /// down at the same position. Small asteroids leave nothing.
    fn fragment(&mut self, id: EntityId, display: &mut dyn Display) {
        let Some(parent) = self.list.remove(id) else {
            log::warn!("fragment on stale asteroid handle");
            return;
        };
        draw_asteroid(display, &parent, false);

        let Some(child) = parent.class.child() else {
            return;
        };
        if self.settings.reseed == ReseedPolicy::PerFragmentation {
            self.rng = R::seed_from_u64(clock_seed());
        }
        for _ in 0..2 {
            let vel = parent.body.vel + Vec2::new(self.jitter(), self.jitter());
            let _ = self.spawn(parent.body.pos, vel, child);
        }
    }

    pub fn mark_collided(&mut self, id: EntityId) -> bool {
        let marked = self.list.mark_collided(id);
        if !marked {
            log::warn!("ignoring collision on stale asteroid handle {id:?}");
        }
        marked
    }

    pub fn count(&self) -> usize {
        self.list.len()
    }

    pub fn list(&self) -> &EntityList<Asteroid> {
        &self.list
    }

    pub fn head(&self) -> Option<EntityId> {
        self.list.head()
    }

    pub fn tail(&self) -> Option<EntityId> {
        self.list.tail()
    }

    pub fn phase(&self) -> SubsystemPhase {
        self.phase
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
