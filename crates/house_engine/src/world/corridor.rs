//! Endless corridor
//!
//! Two copies of one finite segment sit end to end along -Z. Whenever the
//! player passes the recycle threshold, the segment behind is moved one
//! length ahead of the front segment and the two swap roles, so the
//! corridor never runs out.

use crate::assets::{ManifestError, RegionAsset, RegionInstance};
use crate::config::{CollidableNaming, CorridorConfig};
use crate::foundation::math::Vec3;
use crate::physics::CollisionRegistry;
use crate::scene::{NodeId, SceneGraph};
use crate::world::Region;

/// Which end of the corridor a segment currently forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRole {
    /// The segment the player is walking into
    Front,
    /// The segment behind the player
    Back,
}

/// One spawned copy of the corridor asset
#[derive(Debug, Clone)]
pub struct CorridorSegment {
    /// Spawned nodes
    pub instance: RegionInstance,
    /// Z offset of the segment root
    pub z: f32,
}

impl CorridorSegment {
    /// Root node of the segment
    pub fn root(&self) -> NodeId {
        self.instance.root
    }
}

/// Front/back segment pair
#[derive(Debug, Clone)]
pub struct CorridorRecycler {
    segments: [CorridorSegment; 2],
    front: usize,
    length: f32,
    lead: f32,
    origin: Vec3,
    recycled: u32,
}

impl CorridorRecycler {
    /// Spawn both segments and register their volumes
    ///
    /// The first copy sits at `origin`, the second one length further down
    /// -Z and starts as the front.
    pub fn build(
        scene: &mut SceneGraph,
        registry: &mut CollisionRegistry,
        asset: &RegionAsset,
        origin: Vec3,
        config: &CorridorConfig,
        naming: &CollidableNaming,
    ) -> Result<Self, ManifestError> {
        let length = config.segment_length;
        let back_origin = origin;
        let front_origin = origin - Vec3::new(0.0, 0.0, length);

        let back = asset.instantiate(scene, Region::Corridor, back_origin, naming)?;
        let front = asset.instantiate(scene, Region::Corridor, front_origin, naming)?;
        registry.refresh(scene, back.root);
        registry.refresh(scene, front.root);

        log::debug!("Corridor built: segments at z={} and z={}", back_origin.z, front_origin.z);
        Ok(Self {
            segments: [
                CorridorSegment { instance: back, z: back_origin.z },
                CorridorSegment { instance: front, z: front_origin.z },
            ],
            front: 1,
            length,
            lead: config.recycle_lead(),
            origin,
            recycled: 0,
        })
    }

    /// Segment the player walks into
    pub fn front(&self) -> &CorridorSegment {
        &self.segments[self.front]
    }

    /// Segment behind the player
    pub fn back(&self) -> &CorridorSegment {
        &self.segments[1 - self.front]
    }

    /// Role of segment `index` (0 or 1, in spawn order)
    pub fn role(&self, index: usize) -> SegmentRole {
        if index == self.front {
            SegmentRole::Front
        } else {
            SegmentRole::Back
        }
    }

    /// Both segments in spawn order
    pub fn segments(&self) -> &[CorridorSegment; 2] {
        &self.segments
    }

    /// Player Z at or below which the back segment is moved ahead
    pub fn threshold(&self) -> f32 {
        self.front().z - self.lead
    }

    /// Segment length
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Number of recycles so far
    pub fn recycled(&self) -> u32 {
        self.recycled
    }

    /// Recycle the back segment if the player has passed the threshold
    ///
    /// Returns true if a segment moved this tick.
    pub fn update(&mut self, player_z: f32, scene: &mut SceneGraph, registry: &mut CollisionRegistry) -> bool {
        if player_z > self.threshold() {
            return false;
        }

        let new_z = self.front().z - self.length;
        let back = 1 - self.front;
        let root = self.segments[back].root();
        scene.set_local_position(root, Vec3::new(self.origin.x, self.origin.y, new_z));
        self.segments[back].z = new_z;
        self.front = back;
        self.recycled += 1;
        let refreshed = registry.refresh(scene, root);

        log::debug!(
            "Corridor recycled at player z={player_z:.3}: segment {back} moved to z={new_z:.3} ({refreshed} volumes)"
        );
        true
    }
}
