//! World state
//!
//! Regions, the doors between them, and the corridor that never ends. The
//! [`World`] owns the spatial state (scene graph, collision registry,
//! corridor segments) that region transitions tear down and rebuild.

pub mod corridor;
pub mod doors;
pub mod end_door;
pub mod portal;
pub mod proximity;
pub mod region;

pub use corridor::{CorridorRecycler, CorridorSegment, SegmentRole};
pub use doors::{PortalOutcome, RegionController, RegionPhase, TransitionResult};
pub use end_door::{EndDoor, EndDoorState, EndSequence};
pub use portal::{Portal, PortalAction};
pub use proximity::ProximityTrigger;
pub use region::Region;

use crate::assets::{ManifestError, RegionAsset, RegionInstance};
use crate::config::GameConfig;
use crate::physics::CollisionRegistry;
use crate::scene::SceneGraph;

/// Spatial state of the loaded regions
#[derive(Debug, Default)]
pub struct World {
    /// Dynamic nodes of every loaded region
    pub scene: SceneGraph,
    /// Collision volumes derived from collidable nodes
    pub registry: CollisionRegistry,
    /// Segment pair while the corridor is loaded
    pub corridor: Option<CorridorRecycler>,
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a region's nodes and volumes
    pub fn teardown(&mut self, region: Region) {
        let nodes = self.scene.despawn_region(region);
        let volumes = self.registry.purge_region(region);
        if region == Region::Corridor {
            self.corridor = None;
        }
        log::info!("Tore down {region}: {nodes} nodes, {volumes} volumes");
    }

    /// Spawn a region's geometry and register its collidable volumes
    ///
    /// The corridor is spawned as a recycled segment pair; the returned
    /// instance is its front segment.
    pub fn build_region(
        &mut self,
        region: Region,
        asset: &RegionAsset,
        config: &GameConfig,
    ) -> Result<RegionInstance, ManifestError> {
        let entry = region.entry(&config.regions);
        let naming = &config.regions.collidable;

        if region == Region::Corridor {
            let corridor = CorridorRecycler::build(
                &mut self.scene,
                &mut self.registry,
                asset,
                entry.origin,
                &config.corridor,
                naming,
            )?;
            let front = corridor.front().instance.clone();
            self.corridor = Some(corridor);
            return Ok(front);
        }

        let instance = asset.instantiate(&mut self.scene, region, entry.origin, naming)?;
        self.registry.refresh(&self.scene, instance.root);
        Ok(instance)
    }
}
