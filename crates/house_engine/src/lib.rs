//! # House Engine
//!
//! World-state core for a first-person exploration game. The player walks
//! between discrete regions (the yard, the house, an endless corridor)
//! connected by proximity-triggered doors, inspects and trades items, and
//! opens a combination lock to progress.
//!
//! Rendering, audio playback, HUD drawing and asset decoding are external
//! collaborators. This crate owns:
//!
//! - **Collision**: axis-aligned volumes keyed by scene node
//! - **Movement**: block-or-commit camera movement against the registry
//! - **Regions**: the door state machine with asynchronous loads
//! - **Corridor**: two recycled segments simulating unbounded travel
//! - **Triggers**: inspectors, pickup/give exchanges and one-shot props
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use house_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GameConfig::default();
//!     let assets = RonAssetSource::new("assets/regions");
//!     let mut session = Session::new(config, Box::new(assets))?;
//!
//!     session.input.press(Actions::CONFIRM);
//!     for event in session.tick(1.0 / 60.0) {
//!         println!("{event:?}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod events;
pub mod hud;
pub mod audio;
pub mod animation;
pub mod input;
pub mod physics;
pub mod scene;
pub mod assets;
pub mod player;
pub mod world;
pub mod puzzle;
pub mod items;

mod session;

pub use session::{Session, SessionContext, SessionError, SessionPhase};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Session, SessionContext, SessionError, SessionPhase,
        assets::{AssetError, AssetSource, MemoryAssetSource, RegionAsset, RonAssetSource},
        config::{Config, ConfigError, GameConfig},
        events::{EventBus, EventHandler, EventKind, GameEvent},
        foundation::math::Vec3,
        hud::HudCommand,
        audio::{AudioCue, SoundEffect},
        input::{Actions, InputState, KeyCode},
        physics::{Aabb, CollisionRegistry},
        world::{Region, RegionPhase},
    };
}
