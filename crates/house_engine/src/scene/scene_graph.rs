//! Slotmap-backed node store

use slotmap::{new_key_type, SlotMap};

use crate::foundation::math::Vec3;
use crate::physics::Aabb;
use crate::world::Region;

new_key_type! {
    /// Generational handle to a scene node
    pub struct NodeId;
}

/// A node in the scene graph
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Node name as authored in the region asset
    pub name: String,
    /// Region whose teardown removes this node
    pub owner: Region,
    /// Parent node, if any
    pub parent: Option<NodeId>,
    /// Direct children
    pub children: Vec<NodeId>,
    /// Translation relative to the parent
    pub local_position: Vec3,
    /// Rotation about +Y (radians); visual only, never affects bounds
    pub yaw: f32,
    /// Box relative to the node origin
    pub local_bounds: Option<Aabb>,
    /// Whether the node's box blocks movement
    pub collidable: bool,
}

impl SceneNode {
    fn new(name: String, owner: Region, parent: Option<NodeId>, local_position: Vec3) -> Self {
        Self {
            name,
            owner,
            parent,
            children: Vec::new(),
            local_position,
            yaw: 0.0,
            local_bounds: None,
            collidable: false,
        }
    }
}

/// Scene graph holding every dynamic node of the loaded regions
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, SceneNode>,
}

impl SceneGraph {
    /// Create an empty scene graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a node without a parent
    pub fn spawn_root(&mut self, name: impl Into<String>, owner: Region, position: Vec3) -> NodeId {
        self.nodes.insert(SceneNode::new(name.into(), owner, None, position))
    }

    /// Spawn a node under `parent`, inheriting its owning region
    ///
    /// Returns `None` if the parent no longer exists.
    pub fn spawn_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        position: Vec3,
    ) -> Option<NodeId> {
        let owner = self.nodes.get(parent)?.owner;
        let id = self.nodes.insert(SceneNode::new(name.into(), owner, Some(parent), position));
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(id);
        }
        Some(id)
    }

    /// Get a node
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Get a node mutably
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    /// Whether the handle still refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate all live nodes
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter()
    }

    /// Move a node relative to its parent
    pub fn set_local_position(&mut self, id: NodeId, position: Vec3) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.local_position = position;
                true
            }
            None => false,
        }
    }

    /// World-space position: the node's translation composed with its ancestors'
    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        let mut node = self.nodes.get(id)?;
        let mut position = node.local_position;
        while let Some(parent) = node.parent {
            match self.nodes.get(parent) {
                Some(parent_node) => {
                    position += parent_node.local_position;
                    node = parent_node;
                }
                None => break,
            }
        }
        Some(position)
    }

    /// World-space box of a node that has one
    pub fn world_bounds(&self, id: NodeId) -> Option<Aabb> {
        let local = self.nodes.get(id)?.local_bounds?;
        Some(local.translated(self.world_position(id)?))
    }

    /// First node with exactly this name
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
    }

    /// First node owned by `region` with exactly this name
    pub fn find_in_region(&self, region: Region, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.owner == region && node.name == name)
            .map(|(id, _)| id)
    }

    /// The subtree rooted at `root`, root first
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.nodes.contains_key(root) {
            return out;
        }
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                out.push(id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Remove a node and everything below it, returning the number removed
    pub fn despawn_subtree(&mut self, root: NodeId) -> usize {
        let doomed = self.descendants(root);
        if let Some(parent) = self.nodes.get(root).and_then(|node| node.parent) {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.retain(|child| *child != root);
            }
        }
        for id in &doomed {
            self.nodes.remove(*id);
        }
        doomed.len()
    }

    /// Remove every node owned by `region`, returning the number removed
    pub fn despawn_region(&mut self, region: Region) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|_, node| node.owner != region);

        // Survivors may still point at removed parents or children
        let fixes: Vec<(NodeId, bool, Vec<NodeId>)> = self
            .nodes
            .iter()
            .map(|(id, node)| {
                let orphaned = node.parent.is_some_and(|parent| !self.nodes.contains_key(parent));
                let children = node
                    .children
                    .iter()
                    .copied()
                    .filter(|child| self.nodes.contains_key(*child))
                    .collect();
                (id, orphaned, children)
            })
            .collect();
        for (id, orphaned, children) in fixes {
            if let Some(node) = self.nodes.get_mut(id) {
                if orphaned {
                    node.parent = None;
                }
                node.children = children;
            }
        }

        before - self.nodes.len()
    }

    /// Number of nodes owned by `region`
    pub fn count_owned(&self, region: Region) -> usize {
        self.nodes.values().filter(|node| node.owner == region).count()
    }
}
