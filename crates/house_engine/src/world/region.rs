//! The discrete regions the player moves between

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assets::AnchorRole;
use crate::audio::FootstepCategory;
use crate::config::{RegionEntry, RegionsConfig};

/// A discrete world state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// The yard in front of the house
    Exterior,
    /// Inside the house
    Interior,
    /// The endless corridor behind the locked door
    Corridor,
}

impl Region {
    /// Anchor roles a region's manifest must bind
    pub fn required_anchors(self) -> &'static [AnchorRole] {
        match self {
            Self::Exterior => &[AnchorRole::ExteriorDoor],
            Self::Interior => &[AnchorRole::InteriorDoor, AnchorRole::LivingDoor],
            Self::Corridor => &[],
        }
    }

    /// Footstep loop for walking in this region
    pub fn footsteps(self) -> FootstepCategory {
        match self {
            Self::Exterior => FootstepCategory::Outside,
            Self::Interior => FootstepCategory::Inside,
            Self::Corridor => FootstepCategory::Hallway,
        }
    }

    /// Asset and spawn configuration for this region
    pub fn entry(self, regions: &RegionsConfig) -> &RegionEntry {
        match self {
            Self::Exterior => &regions.exterior,
            Self::Interior => &regions.interior,
            Self::Corridor => &regions.corridor,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Exterior => "exterior",
            Self::Interior => "interior",
            Self::Corridor => "corridor",
        };
        f.write_str(name)
    }
}
