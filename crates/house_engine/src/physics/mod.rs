//! Physics module for collision detection
//!
//! Collision is a hard block: a candidate player box either overlaps a
//! registered volume or it does not. There is no response, sliding or
//! integration.

pub mod collision;
pub mod collision_registry;

pub use collision::Aabb;
pub use collision_registry::{CollisionRegistry, VolumeOwner};
