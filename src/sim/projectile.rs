//! Projectiles fired by the craft

use glam::Vec2;

use super::SubsystemPhase;
use super::entity::{EntityId, EntityList, Mobile, MobileCircle};
use crate::error::EntityError;
use crate::platform::{Color, Display};
use crate::settings::{ProjectileSettings, Settings};

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub body: MobileCircle,
    /// Ticks survived so far
    pub age: u32,
}

impl Mobile for Projectile {
    fn body(&self) -> &MobileCircle {
        &self.body
    }

    fn body_mut(&mut self) -> &mut MobileCircle {
        &mut self.body
    }
}

fn draw_projectile(display: &mut dyn Display, projectile: &Projectile, draw: bool) {
    display.fill_circle(projectile.body.pos, projectile.body.radius, Color::pen(draw));
}

pub struct ProjectileSubsystem {
    settings: ProjectileSettings,
    extent: Vec2,
    list: EntityList<Projectile>,
    phase: SubsystemPhase,
    enabled: bool,
}

impl ProjectileSubsystem {
    pub fn new(settings: &Settings) -> Self {
        Self {
            settings: settings.projectiles.clone(),
            extent: settings.playfield.extent(),
            list: EntityList::with_capacity(settings.projectiles.capacity),
            phase: SubsystemPhase::Init,
            enabled: false,
        }
    }

    pub fn init(&mut self) {
        self.list = EntityList::with_capacity(self.settings.capacity);
        self.phase = SubsystemPhase::Init;
        self.enabled = false;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
        log::debug!("projectiles enabled");
    }

    /// Erase and free every projectile and halt. Safe to call repeatedly.
    pub fn disable(&mut self, display: &mut dyn Display) {
        self.list.erase_all(|p| draw_projectile(display, p, false));
        self.enabled = false;
        self.phase = SubsystemPhase::Init;
        log::debug!("projectiles disabled");
    }

    /// Add a projectile at `pos` with an explicit velocity
    pub fn add(&mut self, pos: Vec2, vel: Vec2) -> Result<EntityId, EntityError> {
        let body = MobileCircle::new(pos, vel, self.settings.radius);
        self.list.add(Projectile { body, age: 0 }).inspect_err(|err| {
            log::warn!("projectile dropped: {err}");
        })
    }

    /// Launch from `origin` along a unit `direction` at the configured speed
    pub fn fire(&mut self, origin: Vec2, direction: Vec2) -> Result<EntityId, EntityError> {
        self.add(origin, direction * self.settings.speed)
    }

    pub fn tick(&mut self, display: &mut dyn Display) {
        if self.enabled {
            log::trace!("projectile state: {:?}", self.phase);
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
                let lifetime = self.settings.lifetime_ticks;
                let mut pass = self.list.traversal();
                while let Some(id) = pass.advance(&self.list) {
                    let Some(projectile) = self.list.get_mut(id) else {
                        continue;
                    };
                    draw_projectile(display, projectile, false);
                    if projectile.body.collided || projectile.age >= lifetime {
                        self.list.remove(id);
                        continue;
                    }
                    projectile.body.advance_wrapped(self.extent);
                    projectile.age += 1;
                    draw_projectile(display, projectile, true);
                }
            }
        }
    }

    pub fn mark_collided(&mut self, id: EntityId) -> bool {
        let marked = self.list.mark_collided(id);
        if !marked {
            log::warn!("ignoring collision on stale projectile handle {id:?}");
        }
        marked
    }

    pub fn count(&self) -> usize {
        self.list.len()
    }

    pub fn list(&self) -> &EntityList<Projectile> {
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
