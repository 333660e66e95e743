//! Scene graph
//!
//! The world-state core's view of the scene: named nodes with a translation
//! hierarchy, optional local boxes, and the region that owns them. Meshes
//! and materials belong to the renderer and never appear here.

pub mod scene_graph;

pub use scene_graph::{NodeId, SceneGraph, SceneNode};
