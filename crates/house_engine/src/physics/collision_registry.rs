//! Collision registry
//!
//! Flat list of world-space boxes keyed by the scene node that owns them.
//! Region code writes it when geometry loads, moves or unloads; the
//! movement controller reads it once per tick. A linear scan is plenty for
//! the few dozen walls a region carries.

use crate::foundation::math::Vec3;
use crate::physics::Aabb;
use crate::scene::{NodeId, SceneGraph};
use crate::world::Region;

/// Identity of a registered volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VolumeOwner {
    /// Scene node the box was derived from
    pub node: NodeId,
    /// Region whose unload purges the box
    pub region: Region,
}

/// Registered collision volumes, at most one per owner
#[derive(Debug, Default)]
pub struct CollisionRegistry {
    volumes: Vec<(VolumeOwner, Aabb)>,
}

impl CollisionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the box for `owner`
    pub fn register(&mut self, owner: VolumeOwner, bounds: Aabb) {
        match self.volumes.iter_mut().find(|(existing, _)| existing.node == owner.node) {
            Some(entry) => *entry = (owner, bounds),
            None => self.volumes.push((owner, bounds)),
        }
    }

    /// Remove the box registered for a node
    pub fn unregister(&mut self, node: NodeId) -> bool {
        let before = self.volumes.len();
        self.volumes.retain(|(owner, _)| owner.node != node);
        self.volumes.len() != before
    }

    /// Whether a box at `center` with `half_extents` would overlap any volume
    pub fn query(&self, center: Vec3, half_extents: Vec3) -> bool {
        self.query_box(&Aabb::from_center_half_extents(center, half_extents))
    }

    /// Whether `candidate` overlaps any volume
    pub fn query_box(&self, candidate: &Aabb) -> bool {
        self.volumes.iter().any(|(_, bounds)| bounds.intersects(candidate))
    }

    /// Re-derive world boxes for every collidable node under `root`
    ///
    /// Returns the number of volumes registered.
    pub fn refresh(&mut self, scene: &SceneGraph, root: NodeId) -> usize {
        let mut registered = 0;
        for id in scene.descendants(root) {
            let Some(node) = scene.get(id) else { continue };
            if !node.collidable {
                continue;
            }
            if let Some(bounds) = scene.world_bounds(id) {
                self.register(VolumeOwner { node: id, region: node.owner }, bounds);
                registered += 1;
            }
        }
        log::trace!("Refreshed {registered} collision volumes");
        registered
    }

    /// Drop every volume owned by `region`, returning the number removed
    pub fn purge_region(&mut self, region: Region) -> usize {
        let before = self.volumes.len();
        self.volumes.retain(|(owner, _)| owner.region != region);
        before - self.volumes.len()
    }

    /// Drop volumes whose node no longer exists in `scene`
    pub fn purge_missing(&mut self, scene: &SceneGraph) -> usize {
        let before = self.volumes.len();
        self.volumes.retain(|(owner, _)| scene.contains(owner.node));
        before - self.volumes.len()
    }

    /// Whether any volume belongs to `region`
    pub fn contains_region(&self, region: Region) -> bool {
        self.volumes.iter().any(|(owner, _)| owner.region == region)
    }

    /// Box currently registered for a node
    pub fn bounds_of(&self, node: NodeId) -> Option<Aabb> {
        self.volumes
            .iter()
            .find(|(owner, _)| owner.node == node)
            .map(|(_, bounds)| *bounds)
    }

    /// Iterate registered volumes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &(VolumeOwner, Aabb)> {
        self.volumes.iter()
    }

    /// Number of registered volumes
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    /// Whether no volumes are registered
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.volumes.clear();
    }
}
