//! Items and interactables
//!
//! Inspectable notes, pickup/give exchanges and one-shot props. Each binds
//! a node name from config and resolves it lazily, so a trigger simply
//! stays dormant while its region is not loaded.

pub mod inspection;
pub mod interaction;
pub mod inventory;

pub use inspection::{InspectOutcome, ItemInspector};
pub use interaction::{InteractionTrigger, TriggerOutcome};
pub use inventory::Inventory;

use crate::scene::{NodeId, SceneGraph};

/// Re-resolve `cached` by name if it is unset or its node was despawned
fn resolve(cached: &mut Option<NodeId>, target: &str, scene: &SceneGraph) -> Option<NodeId> {
    match *cached {
        Some(id) if scene.contains(id) => Some(id),
        _ => {
            *cached = scene.find_by_name(target);
            *cached
        }
    }
}
