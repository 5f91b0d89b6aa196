/// RenderView: result of culling one camera against a scene.
///
/// Created by `Scene::render_view()`. Holds a snapshot of the camera at
/// culling time and the visible scene nodes, each listed once, in
/// scene-graph depth-first order.
///
/// Ephemeral: lives for one frame.

use crate::scene::{CameraKey, SceneNodeKey};
use super::camera::Camera;

#[derive(Debug, Clone)]
pub struct RenderView {
    camera_key: CameraKey,
    camera: Camera,
    visible_nodes: Vec<SceneNodeKey>,
}

impl RenderView {
    /// Create a new RenderView (crate-internal: only Scene creates these).
    pub(crate) fn new(camera_key: CameraKey, camera: Camera, visible_nodes: Vec<SceneNodeKey>) -> Self {
        Self {
            camera_key,
            camera,
            visible_nodes,
        }
    }

    /// Key of the camera this view was culled for.
    pub fn camera_key(&self) -> CameraKey {
        self.camera_key
    }

    /// Camera snapshot at the time of culling.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Visible scene nodes, without duplicates.
    pub fn visible_nodes(&self) -> &[SceneNodeKey] {
        &self.visible_nodes
    }

    pub fn visible_count(&self) -> usize {
        self.visible_nodes.len()
    }

    pub fn is_visible(&self, key: SceneNodeKey) -> bool {
        self.visible_nodes.contains(&key)
    }
}

#[cfg(test)]
#[path = "render_view_tests.rs"]
mod tests;
