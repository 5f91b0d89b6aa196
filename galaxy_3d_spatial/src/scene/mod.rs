//! Scene module
//!
//! Provides the arena scene graph, node transforms, spatial indexing
//! (octree and brute force) and per-camera visibility.

mod transform;
mod scene_node;
mod visibility;
mod scene_index;
mod octree;
mod scene;

pub use transform::Transform;
pub use scene_node::{SceneNode, SceneNodeKey, ObjectFlags, Component, ComponentKind};
pub use visibility::{CameraKey, CameraSlot, VisibilitySet, MAX_CAMERA_SLOTS};
pub use scene_index::{SceneIndex, IndexNodeInfo, BruteForceIndex, dedup_keys};
pub use octree::{Octree, OctreeConfig, OctreeStats, DEFAULT_MAX_DEPTH, DEFAULT_MAX_OBJECTS};
pub use scene::{Scene, SceneConfig, PickHit, FrameReport, ROOT_NAME};
