//! Collision detection between projectiles, asteroids and the craft
//!
//! Detection only flags entities; destruction and fragmentation happen in the
//! owning subsystem's next tick.

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use super::asteroid::AsteroidSubsystem;
use super::entity::EntityId;
use super::projectile::ProjectileSubsystem;
use super::session::GameSession;
use crate::settings::CollisionSettings;

/// Proximity test used against an asteroid's radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionShape {
    /// Per-axis test: a square of half-width `radius`
    #[default]
    AxisAligned,
    /// Euclidean distance test
    Circular,
}

impl CollisionShape {
    /// Whether `point` lies strictly inside the shape around `center`
    #[inline]
    pub fn contains(self, center: Vec2, radius: f32, point: Vec2) -> bool {
        let d = point - center;
        let r2 = radius * radius;
        match self {
            CollisionShape::AxisAligned => d.x * d.x < r2 && d.y * d.y < r2,
            CollisionShape::Circular => d.length_squared() < r2,
        }
    }
}

/// Flag asteroids struck by projectiles, awarding points once per asteroid.
///
/// Asteroids already flagged this tick are skipped. With
/// `consume_projectile`, a projectile is flagged on its first hit and cannot
/// strike a second asteroid. Returns the number of asteroids hit.
pub fn check_projectile_hits<R: RngCore + SeedableRng>(
    asteroids: &mut AsteroidSubsystem<R>,
    projectiles: &mut ProjectileSubsystem,
    session: &mut GameSession,
    settings: &CollisionSettings,
) -> u32 {
    let mut hits: Vec<(EntityId, EntityId)> = Vec::new();
    let mut spent: Vec<EntityId> = Vec::new();

    for (aid, asteroid) in asteroids.list().iter() {
        if asteroid.body.collided {
            continue;
        }
        let struck = projectiles.list().iter().find(|(pid, p)| {
            !(p.body.collided || (settings.consume_projectile && spent.contains(pid)))
                && settings
                    .shape
                    .contains(asteroid.body.pos, asteroid.body.radius, p.body.pos)
        });
        if let Some((pid, _)) = struck {
            hits.push((aid, pid));
            if settings.consume_projectile {
                spent.push(pid);
            }
        }
    }

    for &(aid, pid) in &hits {
        asteroids.mark_collided(aid);
        if settings.consume_projectile {
            projectiles.mark_collided(pid);
        }
        session.award(settings.asteroid_points);
        log::debug!("projectile {pid:?} hit asteroid {aid:?}");
    }
    hits.len() as u32
}

/// Test the craft's principal points against every live asteroid.
///
/// Points are tried in order; the first asteroid touching the earliest point
/// is flagged and one life is lost. Returns
/// whether the craft was hit.
pub fn check_craft_hit<R: RngCore + SeedableRng>(
    points: &[Vec2],
    asteroids: &mut AsteroidSubsystem<R>,
    session: &mut GameSession,
    settings: &CollisionSettings,
) -> bool {
    let hit = points.iter().find_map(|&p| {
        asteroids.list().iter().find_map(|(aid, asteroid)| {
            let touching = !asteroid.body.collided
                && settings
                    .shape
                    .contains(asteroid.body.pos, asteroid.body.radius, p);
            touching.then_some(aid)
        })
    });

    match hit {
        Some(aid) => {
            asteroids.mark_collided(aid);
            let lives = session.lose_life();
            log::debug!("craft hit by asteroid {aid:?}, {lives} lives left");
            true
        }
        None => false,
    }
}
