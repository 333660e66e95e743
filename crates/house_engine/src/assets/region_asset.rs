//! Region asset format and anchor manifest
//!
//! A region asset lists named nodes with optional local boxes, plus an
//! explicit manifest binding semantic roles (which node is the front door)
//! to node names. Roles are validated when the region loads instead of
//! being guessed from naming at interaction time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::CollidableNaming;
use crate::foundation::math::Vec3;
use crate::physics::Aabb;
use crate::scene::{NodeId, SceneGraph};
use crate::world::Region;

/// Semantic role a node can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorRole {
    /// Front door seen from the yard
    ExteriorDoor,
    /// Front door seen from inside
    InteriorDoor,
    /// Locked living-room door leading to the corridor
    LivingDoor,
}

/// Binding of a role to a node name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorBinding {
    /// Role
    pub role: AnchorRole,
    /// Node name carrying the role
    pub node: String,
}

/// One node of a region asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Node name
    pub name: String,
    /// Position relative to the parent (or the region root)
    #[serde(default = "Vec3::zeros")]
    pub position: Vec3,
    /// Box relative to the node origin
    #[serde(default)]
    pub bounds: Option<Aabb>,
    /// Name of an earlier node to parent under; the region root otherwise
    #[serde(default)]
    pub parent: Option<String>,
}

/// Serialisable region description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionAsset {
    /// Name given to the spawned root node
    pub name: String,
    /// Nodes in spawn order
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    /// Role bindings
    #[serde(default)]
    pub anchors: Vec<AnchorBinding>,
}

/// Region authoring defects
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    /// A role the region needs is not bound
    #[error("{asset}: no node bound to anchor role {role:?}")]
    MissingRole {
        /// Asset name
        asset: String,
        /// Unbound role
        role: AnchorRole,
    },

    /// A binding names a node the asset does not contain
    #[error("{asset}: anchor role {role:?} names unknown node '{node}'")]
    UnknownNode {
        /// Asset name
        asset: String,
        /// Role
        role: AnchorRole,
        /// Missing node name
        node: String,
    },

    /// A node names a parent that is not declared before it
    #[error("{asset}: node '{node}' has unknown parent '{parent}'")]
    UnknownParent {
        /// Asset name
        asset: String,
        /// Child node
        node: String,
        /// Missing parent name
        parent: String,
    },
}

/// Nodes spawned from one asset
#[derive(Debug, Clone)]
pub struct RegionInstance {
    /// Root node; its position is the region origin
    pub root: NodeId,
    named: HashMap<String, NodeId>,
}

impl RegionInstance {
    /// Spawned node with this name
    pub fn node(&self, name: &str) -> Option<NodeId> {
        self.named.get(name).copied()
    }
}

impl RegionAsset {
    /// Node name bound to `role`
    pub fn anchor_node(&self, role: AnchorRole) -> Option<&str> {
        self.anchors
            .iter()
            .find(|binding| binding.role == role)
            .map(|binding| binding.node.as_str())
    }

    /// Check that every role `region` needs is bound to a node that exists
    pub fn manifest_problems(&self, region: Region) -> Vec<ManifestError> {
        region
            .required_anchors()
            .iter()
            .filter_map(|role| match self.anchor_node(*role) {
                None => Some(ManifestError::MissingRole { asset: self.name.clone(), role: *role }),
                Some(node) if !self.nodes.iter().any(|spec| spec.name == node) => {
                    Some(ManifestError::UnknownNode {
                        asset: self.name.clone(),
                        role: *role,
                        node: node.to_string(),
                    })
                }
                Some(_) => None,
            })
            .collect()
    }

    /// Check that every parent reference points at an earlier node
    pub fn validate_hierarchy(&self) -> Result<(), ManifestError> {
        for (index, spec) in self.nodes.iter().enumerate() {
            if let Some(parent) = &spec.parent {
                if !self.nodes[..index].iter().any(|earlier| &earlier.name == parent) {
                    return Err(ManifestError::UnknownParent {
                        asset: self.name.clone(),
                        node: spec.name.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Spawn the asset into `scene` under a new root at `origin`
    ///
    /// Every node is tagged with `owner`; nodes whose names match the
    /// collidable convention and carry a box are flagged collidable.
    pub fn instantiate(
        &self,
        scene: &mut SceneGraph,
        owner: Region,
        origin: Vec3,
        naming: &CollidableNaming,
    ) -> Result<RegionInstance, ManifestError> {
        self.validate_hierarchy()?;

        let root = scene.spawn_root(self.name.clone(), owner, origin);
        let mut named = HashMap::with_capacity(self.nodes.len());
        for spec in &self.nodes {
            let parent = spec
                .parent
                .as_deref()
                .and_then(|name| named.get(name).copied())
                .unwrap_or(root);
            let Some(id) = scene.spawn_child(parent, spec.name.clone(), spec.position) else {
                continue;
            };
            if let Some(node) = scene.get_mut(id) {
                node.local_bounds = spec.bounds;
                node.collidable = spec.bounds.is_some() && naming.matches(&spec.name);
            }
            named.entry(spec.name.clone()).or_insert(id);
        }

        log::debug!("Spawned {} nodes of '{}' for {owner}", named.len(), self.name);
        Ok(RegionInstance { root, named })
    }
}
