/// Scene: arena scene graph, spatial index and registered cameras.
///
/// Nodes live in a SlotMap and reference each other by `SceneNodeKey`, so
/// handles stay valid while other nodes come and go, and destroyed handles
/// are detected instead of dangling. Exactly one node has no parent: the
/// root created with the scene.
///
/// Per frame (`update_frame`):
/// 1. propagate dirty transforms top-down
/// 2. point node-attached cameras along their node
/// 3. rebuild the spatial index if anything moved or the graph changed
/// 4. re-cull each camera whose frustum changed or whose last pass predates
///    the current index build
///
/// Picking and `render_view` read the results of the last culling pass.

use glam::{Mat4, Quat, Vec2, Vec3};
use slotmap::SlotMap;
use crate::camera::{Camera, RenderView};
use crate::error::{Error, Result};
use crate::math::{AABB, OBB, Ray};
use crate::utils::SlotAllocator;
use crate::{engine_bail, engine_debug, engine_error, engine_info, engine_trace};
use super::octree::{Octree, OctreeConfig};
use super::scene_index::{dedup_keys, IndexNodeInfo, SceneIndex};
use super::scene_node::{Component, ComponentKind, ObjectFlags, SceneNode, SceneNodeKey};
use super::visibility::{CameraKey, CameraSlot, VisibilitySet, MAX_CAMERA_SLOTS};

/// Name given to the root node of a new scene
pub const ROOT_NAME: &str = "Untitled Scene";

// ============================================================================
// CONFIG / REPORTS
// ============================================================================

/// Scene construction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    /// Index bounds used while the scene has no object with geometry
    pub initial_bounds: AABB,
    /// Subdivision limits of the default octree index
    pub octree: OctreeConfig,
    /// Margin added around the union of object bounds on rebuild
    pub padding: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            initial_bounds: AABB::new(Vec3::splat(-20.0), Vec3::splat(20.0)),
            octree: OctreeConfig::default().with_max_depth(3).with_max_objects(4),
            padding: 0.0,
        }
    }
}

impl SceneConfig {
    pub fn with_initial_bounds(mut self, bounds: AABB) -> Self {
        self.initial_bounds = bounds;
        self
    }

    pub fn with_octree(mut self, octree: OctreeConfig) -> Self {
        self.octree = octree;
        self
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }
}

/// Nearest object under a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub node: SceneNodeKey,
    /// Ray parameter of the hit (world units for a unit-length direction)
    pub distance: f32,
}

/// What one `update_frame` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Nodes whose matrices were recomputed
    pub transforms_updated: usize,
    pub index_rebuilt: bool,
    /// Distinct objects in the index after the frame
    pub indexed_objects: usize,
    /// Cameras whose visibility slot was recomputed
    pub cameras_culled: usize,
}

struct CameraEntry {
    name: String,
    camera: Camera,
    slot: CameraSlot,
    /// Index build the slot's visibility bits were computed against
    culled_build: Option<u64>,
}

// ============================================================================
// SCENE
// ============================================================================

pub struct Scene {
    config: SceneConfig,
    nodes: SlotMap<SceneNodeKey, SceneNode>,
    root: SceneNodeKey,
    index: Box<dyn SceneIndex>,
    /// Set by any change that affects world bounds; cleared by `rebuild_index`
    index_dirty: bool,
    /// Incremented by every `rebuild_index` (which wipes visibility bits)
    index_build: u64,
    cameras: SlotMap<CameraKey, CameraEntry>,
    camera_slots: SlotAllocator,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}

fn invalid_node(operation: &str, key: SceneNodeKey) -> Error {
    let message = format!("{}: unknown node {:?}", operation, key);
    engine_error!("galaxy3d::Scene", "{}", message);
    Error::InvalidNode(message)
}

fn invalid_camera(operation: &str, key: CameraKey) -> Error {
    let message = format!("{}: unknown camera {:?}", operation, key);
    engine_error!("galaxy3d::Scene", "{}", message);
    Error::InvalidCamera(message)
}

impl Scene {
    /// Create a scene with a root node and an octree index.
    pub fn new(config: SceneConfig) -> Self {
        let index = Box::new(Octree::new(config.initial_bounds, config.octree));
        Self::with_index(config, index)
    }

    /// Create a scene using a caller-provided spatial index.
    pub fn with_index(config: SceneConfig, mut index: Box<dyn SceneIndex>) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(SceneNode::new(ROOT_NAME, None));
        index.set_bounds(config.initial_bounds);
        index.clear();

        Self {
            config,
            nodes,
            root,
            index,
            index_dirty: false,
            index_build: 0,
            cameras: SlotMap::with_key(),
            camera_slots: SlotAllocator::with_capacity(MAX_CAMERA_SLOTS),
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    // ===== GRAPH ACCESS =====

    /// The only parentless node.
    pub fn root(&self) -> SceneNodeKey {
        self.root
    }

    pub fn node(&self, key: SceneNodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    pub fn contains(&self, key: SceneNodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = (SceneNodeKey, &SceneNode)> {
        self.nodes.iter()
    }

    pub fn find_by_uuid(&self, uuid: &str) -> Option<SceneNodeKey> {
        self.nodes
            .iter()
            .find(|(_, node)| node.uuid() == uuid)
            .map(|(key, _)| key)
    }

    /// True if `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: SceneNodeKey, node: SceneNodeKey) -> bool {
        let mut current = Some(node);
        while let Some(key) = current {
            if key == ancestor {
                return true;
            }
            current = self.nodes.get(key).and_then(|n| n.parent());
        }
        false
    }

    /// `key` and all its descendants, parents before children.
    pub fn subtree(&self, key: SceneNodeKey) -> Vec<SceneNodeKey> {
        let mut result = Vec::new();
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else { continue };
            result.push(current);
            stack.extend(node.children().iter().rev());
        }
        result
    }

    /// Active nodes reachable from the root through active parents,
    /// depth-first, root included.
    pub fn collect_objects(&self) -> Vec<SceneNodeKey> {
        let mut result = Vec::new();
        let mut stack = vec![self.root];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else { continue };
            if !node.is_active() {
                continue;
            }
            result.push(current);
            stack.extend(node.children().iter().rev());
        }
        result
    }

    // ===== GRAPH MUTATION =====

    /// Create a node under `parent` (`None` attaches it under the root).
    ///
    /// The node starts with an identity local transform, so its world matrix
    /// equals its parent's.
    pub fn create_object(&mut self, name: &str, parent: Option<SceneNodeKey>) -> Result<SceneNodeKey> {
        let parent = parent.unwrap_or(self.root);
        let parent_global = match self.nodes.get(parent) {
            Some(p) => *p.transform().global_matrix(),
            None => return Err(invalid_node("create_object", parent)),
        };

        let mut node = SceneNode::new(name, Some(parent));
        node.transform_mut().update_transform(&parent_global);
        let key = self.nodes.insert(node);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.push_child(key);
        }

        self.index_dirty = true;
        engine_debug!("galaxy3d::Scene", "Created '{}' {:?} under {:?}", name, key, parent);
        Ok(key)
    }

    /// Destroy a node and its whole subtree. Returns the number of nodes removed.
    ///
    /// Cameras referenced by destroyed nodes stay registered.
    pub fn destroy_object(&mut self, key: SceneNodeKey) -> Result<usize> {
        if key == self.root {
            engine_bail!("galaxy3d::Scene", "Cannot destroy the scene root");
        }
        let parent = self
            .nodes
            .get(key)
            .ok_or_else(|| invalid_node("destroy_object", key))?
            .parent();

        let subtree = self.subtree(key);
        for &k in subtree.iter().rev() {
            self.nodes.remove(k);
        }
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(p)) {
            p.remove_child(key);
        }

        self.index_dirty = true;
        engine_debug!("galaxy3d::Scene", "Destroyed {:?} ({} nodes)", key, subtree.len());
        Ok(subtree.len())
    }

    /// Move `key` (with its subtree) under `new_parent`.
    ///
    /// The local transform is kept, so the subtree moves with its new parent.
    /// Rejected for the root and when `new_parent` lies inside `key`'s subtree.
    pub fn reparent(&mut self, key: SceneNodeKey, new_parent: SceneNodeKey) -> Result<()> {
        if key == self.root {
            engine_bail!("galaxy3d::Scene", "Cannot reparent the scene root");
        }
        let old_parent = self
            .nodes
            .get(key)
            .ok_or_else(|| invalid_node("reparent", key))?
            .parent();
        if !self.nodes.contains_key(new_parent) {
            return Err(invalid_node("reparent", new_parent));
        }
        if self.is_ancestor_or_self(key, new_parent) {
            engine_bail!("galaxy3d::Scene",
                "Reparenting {:?} under {:?} would create a cycle", key, new_parent);
        }
        if old_parent == Some(new_parent) {
            return Ok(());
        }

        if let Some(p) = old_parent.and_then(|p| self.nodes.get_mut(p)) {
            p.remove_child(key);
        }
        if let Some(p) = self.nodes.get_mut(new_parent) {
            p.push_child(key);
        }
        if let Some(node) = self.nodes.get_mut(key) {
            node.set_parent(Some(new_parent));
        }

        let moved = self.refresh_subtree(key);
        self.index_dirty = true;
        engine_debug!("galaxy3d::Scene", "Reparented {:?} under {:?} ({} nodes)", key, new_parent, moved);
        Ok(())
    }

    pub fn rename(&mut self, key: SceneNodeKey, name: &str) -> Result<()> {
        let node = self.nodes.get_mut(key).ok_or_else(|| invalid_node("rename", key))?;
        node.set_name(name);
        Ok(())
    }

    /// Enable or disable a node. Inactive subtrees are not indexed.
    pub fn set_active(&mut self, key: SceneNodeKey, active: bool) -> Result<()> {
        let node = self.nodes.get_mut(key).ok_or_else(|| invalid_node("set_active", key))?;
        if node.is_active() != active {
            node.set_flag(ObjectFlags::ACTIVE, active);
            self.index_dirty = true;
        }
        Ok(())
    }

    pub fn set_static(&mut self, key: SceneNodeKey, is_static: bool) -> Result<()> {
        let node = self.nodes.get_mut(key).ok_or_else(|| invalid_node("set_static", key))?;
        node.set_flag(ObjectFlags::STATIC, is_static);
        Ok(())
    }

    // ===== COMPONENTS =====

    /// Attach a component, replacing any existing one of the same kind.
    pub fn add_component(&mut self, key: SceneNodeKey, component: Component) -> Result<Option<Component>> {
        if let Component::Camera(camera) = &component {
            if !self.cameras.contains_key(*camera) {
                return Err(invalid_camera("add_component", *camera));
            }
        }
        let kind = component.kind();
        let node = self.nodes.get_mut(key).ok_or_else(|| invalid_node("add_component", key))?;
        let replaced = node.insert_component(component);
        if kind == ComponentKind::Geometry {
            self.index_dirty = true;
        }
        Ok(replaced)
    }

    pub fn remove_component(&mut self, key: SceneNodeKey, kind: ComponentKind) -> Result<Option<Component>> {
        let node = self.nodes.get_mut(key).ok_or_else(|| invalid_node("remove_component", key))?;
        let removed = node.take_component(kind);
        if kind == ComponentKind::Geometry && removed.is_some() {
            self.index_dirty = true;
        }
        Ok(removed)
    }

    // ===== TRANSFORMS =====

    /// Set the local TRS and recompute the subtree's matrices immediately.
    pub fn set_local_transform(
        &mut self,
        key: SceneNodeKey,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
    ) -> Result<()> {
        let node = self.nodes.get_mut(key).ok_or_else(|| invalid_node("set_local_transform", key))?;
        let transform = node.transform_mut();
        transform.set_position(position);
        transform.set_rotation(rotation);
        transform.set_scale(scale);
        self.refresh_subtree(key);
        self.index_dirty = true;
        Ok(())
    }

    /// Set the local matrix (decomposed into TRS) and recompute the subtree.
    pub fn set_local_matrix(&mut self, key: SceneNodeKey, local: &Mat4) -> Result<()> {
        let (position, rotation, scale) = super::transform::Transform::decompose(local);
        self.set_local_transform(key, position, rotation, scale)
    }

    /// Deferred: applied by the next `update_transforms`.
    pub fn set_position(&mut self, key: SceneNodeKey, position: Vec3) -> Result<()> {
        let node = self.nodes.get_mut(key).ok_or_else(|| invalid_node("set_position", key))?;
        node.transform_mut().set_position(position);
        self.index_dirty = true;
        Ok(())
    }

    /// Deferred: applied by the next `update_transforms`.
    pub fn set_rotation(&mut self, key: SceneNodeKey, rotation: Quat) -> Result<()> {
        let node = self.nodes.get_mut(key).ok_or_else(|| invalid_node("set_rotation", key))?;
        node.transform_mut().set_rotation(rotation);
        self.index_dirty = true;
        Ok(())
    }

    /// Deferred: applied by the next `update_transforms`.
    pub fn set_scale(&mut self, key: SceneNodeKey, scale: Vec3) -> Result<()> {
        let node = self.nodes.get_mut(key).ok_or_else(|| invalid_node("set_scale", key))?;
        node.transform_mut().set_scale(scale);
        self.index_dirty = true;
        Ok(())
    }

    /// Recompute matrices top-down for every flagged node and its descendants.
    ///
    /// Returns the number of nodes recomputed. Inactive nodes are updated
    /// too, so their matrices are current when they are re-enabled.
    pub fn update_transforms(&mut self) -> usize {
        let mut updated = 0;
        let mut stack = vec![(self.root, Mat4::IDENTITY, false)];

        while let Some((key, parent_global, parent_changed)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(key) else { continue };
            let changed = parent_changed || node.transform().needs_update();
            if changed {
                node.transform_mut().update_transform(&parent_global);
                updated += 1;
            }
            let global = *node.transform().global_matrix();
            stack.extend(node.children().iter().map(|&c| (c, global, changed)));
        }

        if updated > 0 {
            self.index_dirty = true;
            engine_trace!("galaxy3d::Scene", "Updated {} transforms", updated);
        }
        updated
    }

    /// Recompute `key`'s matrices from its parent and propagate to descendants.
    fn refresh_subtree(&mut self, key: SceneNodeKey) -> usize {
        let parent_global = self
            .nodes
            .get(key)
            .and_then(|n| n.parent())
            .and_then(|p| self.nodes.get(p))
            .map(|p| *p.transform().global_matrix())
            .unwrap_or(Mat4::IDENTITY);

        let mut updated = 0;
        let mut stack = vec![(key, parent_global)];
        while let Some((current, parent_global)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(current) else { continue };
            node.transform_mut().update_transform(&parent_global);
            updated += 1;
            let global = *node.transform().global_matrix();
            stack.extend(node.children().iter().map(|&c| (c, global)));
        }
        updated
    }

    // ===== BOUNDS AND RAYS =====

    /// World-space AABB of the node's geometry, `None` without geometry.
    ///
    /// Reads the world matrix as of the last `update_transforms`.
    pub fn compute_world_aabb(&self, key: SceneNodeKey) -> Option<AABB> {
        let node = self.nodes.get(key)?;
        let geometry = node.geometry()?;
        let aabb = geometry.local_aabb().transformed(node.transform().global_matrix());
        (!aabb.is_empty()).then_some(aabb)
    }

    /// World-space oriented box of the node's geometry.
    pub fn compute_world_obb(&self, key: SceneNodeKey) -> Option<OBB> {
        let node = self.nodes.get(key)?;
        let geometry = node.geometry()?;
        OBB::from_aabb(geometry.local_aabb(), node.transform().global_matrix())
    }

    /// Nearest hit of `ray` against the node's triangles, in world space.
    pub fn intersects_ray(&self, key: SceneNodeKey, ray: &Ray) -> Option<f32> {
        let node = self.nodes.get(key)?;
        node.geometry()?.intersect_ray(ray, node.transform().global_matrix())
    }

    // ===== SPATIAL INDEX =====

    pub fn index(&self) -> &dyn SceneIndex {
        self.index.as_ref()
    }

    pub fn is_index_dirty(&self) -> bool {
        self.index_dirty
    }

    /// Force the next `update_frame` to rebuild the index.
    pub fn mark_index_dirty(&mut self) {
        self.index_dirty = true;
    }

    /// Rebuild the index from every active object with geometry.
    ///
    /// Root bounds become the union of world AABBs grown by the configured
    /// padding, or `initial_bounds` if no object has bounds. Clears all
    /// cameras' visibility. Pending transform edits are applied first.
    /// Returns the number of objects inserted.
    pub fn rebuild_index(&mut self) -> usize {
        self.update_transforms();
        let boxes: Vec<(SceneNodeKey, AABB)> = self
            .collect_objects()
            .into_iter()
            .filter_map(|key| self.compute_world_aabb(key).map(|aabb| (key, aabb)))
            .collect();

        let union = boxes.iter().fold(AABB::EMPTY, |acc, (_, aabb)| acc.merged(aabb));
        let bounds = if union.is_empty() {
            self.config.initial_bounds
        } else {
            union.padded(self.config.padding)
        };

        self.index.set_bounds(bounds);
        self.index.clear();
        for (key, aabb) in &boxes {
            self.index.insert(*key, aabb);
        }
        self.index_dirty = false;
        self.index_build += 1;

        let mut node_count = 0;
        let mut deepest = 0;
        self.index.visit_nodes(&mut |info: &IndexNodeInfo| {
            node_count += 1;
            deepest = deepest.max(info.depth);
        });
        engine_debug!(
            "galaxy3d::Scene",
            "Rebuilt index: {} objects, {} nodes, depth {}", boxes.len(), node_count, deepest
        );
        boxes.len()
    }

    /// Distinct objects whose world AABB overlaps `region`.
    pub fn query_region(&self, region: &AABB) -> Vec<SceneNodeKey> {
        let mut results = Vec::new();
        self.index.query(region, &mut results);
        dedup_keys(&mut results);
        results
    }

    // ===== CAMERAS =====

    /// Register a camera and give it a visibility slot.
    ///
    /// Fails once `MAX_CAMERA_SLOTS` cameras are registered.
    pub fn add_camera(&mut self, name: &str, camera: Camera) -> Result<CameraKey> {
        let slot = match self.camera_slots.try_alloc().and_then(CameraSlot::new) {
            Some(slot) => slot,
            None => engine_bail!("galaxy3d::Scene",
                "Cannot add camera '{}': all {} visibility slots in use", name, MAX_CAMERA_SLOTS),
        };

        let key = self.cameras.insert(CameraEntry {
            name: name.to_string(),
            camera,
            slot,
            culled_build: None,
        });
        engine_info!("galaxy3d::Scene", "Camera '{}' registered in slot {}", name, slot.index());
        Ok(key)
    }

    /// Unregister a camera, releasing its slot and detaching it from nodes.
    pub fn remove_camera(&mut self, key: CameraKey) -> Result<Camera> {
        let entry = self.cameras.remove(key).ok_or_else(|| invalid_camera("remove_camera", key))?;
        self.index.release_slot(entry.slot);
        self.camera_slots.free(entry.slot.index());

        for (_, node) in self.nodes.iter_mut() {
            if node.camera() == Some(key) {
                node.take_component(ComponentKind::Camera);
            }
        }

        engine_info!("galaxy3d::Scene", "Camera '{}' removed", entry.name);
        Ok(entry.camera)
    }

    pub fn camera(&self, key: CameraKey) -> Option<&Camera> {
        self.cameras.get(key).map(|e| &e.camera)
    }

    /// Mutable access; setters on the camera mark its frustum dirty.
    pub fn camera_mut(&mut self, key: CameraKey) -> Option<&mut Camera> {
        self.cameras.get_mut(key).map(|e| &mut e.camera)
    }

    pub fn camera_name(&self, key: CameraKey) -> Option<&str> {
        self.cameras.get(key).map(|e| e.name.as_str())
    }

    pub fn camera_slot(&self, key: CameraKey) -> Option<CameraSlot> {
        self.cameras.get(key).map(|e| e.slot)
    }

    pub fn camera_count(&self) -> usize {
        self.cameras.len()
    }

    pub fn camera_keys(&self) -> impl Iterator<Item = CameraKey> + '_ {
        self.cameras.keys()
    }

    /// Point cameras attached to active nodes along their node's world matrix.
    ///
    /// Nodes under an inactive ancestor do not drive their camera.
    fn sync_attached_cameras(&mut self) {
        for key in self.collect_objects() {
            let Some(node) = self.nodes.get(key) else { continue };
            let Some(camera_key) = node.camera() else { continue };
            let Some(entry) = self.cameras.get_mut(camera_key) else { continue };
            let view = node.transform().global_matrix().inverse();
            if *entry.camera.view_matrix() != view {
                entry.camera.set_view(view);
            }
        }
    }

    // ===== CULLING AND PICKING =====

    /// Refresh the camera's frustum if needed and recompute its visibility slot.
    pub fn update_visibility(&mut self, camera: CameraKey) -> Result<VisibilitySet> {
        let entry = self
            .cameras
            .get_mut(camera)
            .ok_or_else(|| invalid_camera("update_visibility", camera))?;
        entry.camera.update_frustum();
        entry.culled_build = Some(self.index_build);
        Ok(self.index.update_visibility(entry.slot, entry.camera.frustum()))
    }

    /// Whether the last culling pass of `camera` found `node` visible.
    pub fn is_visible(&self, node: SceneNodeKey, camera: CameraKey) -> bool {
        self.camera_slot(camera)
            .is_some_and(|slot| self.index.is_visible(node, slot))
    }

    /// Visible objects of `camera`, each once, in depth-first order.
    pub fn render_view(&self, camera: CameraKey) -> Result<RenderView> {
        let entry = self
            .cameras
            .get(camera)
            .ok_or_else(|| invalid_camera("render_view", camera))?;
        let visible: Vec<SceneNodeKey> = self
            .collect_objects()
            .into_iter()
            .filter(|&key| self.index.is_visible(key, entry.slot))
            .collect();
        Ok(RenderView::new(camera, entry.camera.clone(), visible))
    }

    /// Nearest object hit by `ray` among those `camera` last found visible.
    ///
    /// Equal distances resolve to the node with the smaller UUID, so the
    /// result does not depend on index layout.
    pub fn pick(&self, ray: &Ray, camera: CameraKey) -> Result<Option<PickHit>> {
        let slot = self
            .camera_slot(camera)
            .ok_or_else(|| invalid_camera("pick", camera))?;

        let mut candidates = Vec::new();
        self.index.collect_along_ray(ray, slot, &mut candidates);
        dedup_keys(&mut candidates);

        let mut best: Option<(PickHit, &str)> = None;
        for key in candidates {
            let Some(distance) = self.intersects_ray(key, ray) else { continue };
            let Some(node) = self.nodes.get(key) else { continue };
            let better = match &best {
                None => true,
                Some((hit, uuid)) => {
                    distance < hit.distance || (distance == hit.distance && node.uuid() < *uuid)
                }
            };
            if better {
                best = Some((PickHit { node: key, distance }, node.uuid()));
            }
        }
        Ok(best.map(|(hit, _)| hit))
    }

    /// `pick` with a ray through normalized device coordinates of `camera`.
    pub fn pick_screen(&self, ndc: Vec2, camera: CameraKey) -> Result<Option<PickHit>> {
        let entry = self
            .cameras
            .get(camera)
            .ok_or_else(|| invalid_camera("pick_screen", camera))?;
        match entry.camera.screen_ray(ndc) {
            Some(ray) => self.pick(&ray, camera),
            None => Ok(None),
        }
    }

    // ===== FRAME =====

    /// Run one frame of spatial maintenance. See the module docs for the steps.
    pub fn update_frame(&mut self) -> FrameReport {
        let transforms_updated = self.update_transforms();
        self.sync_attached_cameras();

        let index_rebuilt = self.index_dirty;
        if index_rebuilt {
            self.rebuild_index();
        }

        let mut cameras_culled = 0;
        for entry in self.cameras.values_mut() {
            let frustum_changed = entry.camera.update_frustum();
            if frustum_changed || entry.culled_build != Some(self.index_build) {
                self.index.update_visibility(entry.slot, entry.camera.frustum());
                entry.culled_build = Some(self.index_build);
                cameras_culled += 1;
            }
        }

        FrameReport {
            transforms_updated,
            index_rebuilt,
            indexed_objects: self.index.object_count(),
            cameras_culled,
        }
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
