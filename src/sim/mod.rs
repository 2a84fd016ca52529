//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - One external tick drives every subsystem once, in a fixed order
//! - Seeded RNG only (unless a clock reseed policy is selected)
//! - Stable iteration order (list insertion order)
//! - Drawing goes through `platform::Display`, never a concrete renderer

pub mod asteroid;
pub mod collision;
pub mod craft;
pub mod entity;
pub mod game;
pub mod projectile;
pub mod session;
pub mod vector;

pub use asteroid::{Asteroid, AsteroidSubsystem, ReseedPolicy, SizeClass};
pub use collision::{CollisionShape, check_craft_hit, check_projectile_hits};
pub use craft::{Craft, CraftControls, CraftSubsystem, FireControl};
pub use entity::{EntityId, EntityList, Mobile, MobileCircle, Traversal};
pub use game::{Action, Game, GameState, Guards, Orchestrator, Transition, World, transition};
pub use projectile::{Projectile, ProjectileSubsystem};
pub use session::{Counters, GameSession};
pub use vector::{FIXED_SCALE, FixedMat2, FixedVec2, NumericPolicy, RotationPair};

/// Lifecycle shared by the asteroid, projectile and craft subsystems.
///
/// `enable` takes effect on the next tick (`Init` -> `Play`); clearing the
/// enable flag while in `Play` erases and frees everything and returns to
/// `Init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubsystemPhase {
    #[default]
    Init,
    Play,
}
