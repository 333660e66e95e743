//! Doors between regions

use crate::assets::AnchorRole;
use crate::config::DoorConfig;
use crate::foundation::math::Vec3;
use crate::scene::NodeId;
use crate::world::{ProximityTrigger, Region};

/// What confirming at a portal does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalAction {
    /// Leave for another region
    Travel(Region),
    /// Open the combination lock overlay
    OpenLock,
}

/// An active door discovered from a region's manifest
#[derive(Debug, Clone, PartialEq)]
pub struct Portal {
    /// Manifest role that produced the portal
    pub role: AnchorRole,
    /// Anchor node
    pub node: NodeId,
    /// Anchor world position at load time
    pub position: Vec3,
    /// Activation area
    pub trigger: ProximityTrigger,
    /// Prompt shown within range
    pub prompt: String,
    /// Effect of confirming
    pub action: PortalAction,
}

impl Portal {
    /// Build the portal for `role` anchored at `node`
    pub fn for_role(role: AnchorRole, node: NodeId, position: Vec3, doors: &DoorConfig) -> Self {
        let (radius, prompt, action) = match role {
            AnchorRole::ExteriorDoor => {
                (doors.exterior_radius, &doors.enter_prompt, PortalAction::Travel(Region::Interior))
            }
            AnchorRole::InteriorDoor => {
                (doors.interior_radius, &doors.exit_prompt, PortalAction::Travel(Region::Exterior))
            }
            AnchorRole::LivingDoor => (doors.living_radius, &doors.unlock_prompt, PortalAction::OpenLock),
        };
        Self {
            role,
            node,
            position,
            trigger: ProximityTrigger::new(radius),
            prompt: prompt.clone(),
            action,
        }
    }

    /// Horizontal distance from the player if within range
    pub fn distance_if_in_range(&self, player: &Vec3) -> Option<f32> {
        self.trigger
            .contains(player, &self.position)
            .then(|| ProximityTrigger::distance(player, &self.position))
    }
}
