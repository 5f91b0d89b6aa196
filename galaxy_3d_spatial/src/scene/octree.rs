/// Octree: dynamic octree for culling and picking.
///
/// Multi-reference placement: an object is stored in **every** leaf whose
/// bounds overlap its world AABB, so a box straddling a split plane is
/// referenced from several nodes. Queries may therefore return duplicates.
///
/// Nodes subdivide lazily: a leaf accepts objects until it holds
/// `max_objects`, then (below `max_depth`) splits into 8 octants and pushes
/// its objects down. Leaves at `max_depth` grow without limit. There is no
/// removal: the Scene rebuilds the tree whenever the graph changes.
///
/// Each node carries a `u32` visibility mask (one bit per camera slot) set by
/// `update_visibility`; objects get a mask too, the OR over the nodes that
/// reference them.

use rustc_hash::{FxHashMap, FxHashSet};
use crate::camera::{Frustum, FrustumTest};
use crate::engine_trace;
use crate::math::{AABB, Ray};
use super::scene_index::{IndexNodeInfo, SceneIndex};
use super::scene_node::SceneNodeKey;
use super::visibility::{CameraSlot, VisibilitySet};

/// Default subdivision depth limit (root = depth 0)
pub const DEFAULT_MAX_DEPTH: u32 = 5;
/// Default leaf capacity before subdividing
pub const DEFAULT_MAX_OBJECTS: usize = 5;

// ============================================================================
// CONFIG / STATS
// ============================================================================

/// Subdivision limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OctreeConfig {
    /// Depth at which leaves stop subdividing
    pub max_depth: u32,
    /// Objects a leaf holds before it subdivides
    pub max_objects: usize,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_objects: DEFAULT_MAX_OBJECTS,
        }
    }
}

impl OctreeConfig {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_objects(mut self, max_objects: usize) -> Self {
        self.max_objects = max_objects;
        self
    }
}

/// Tree shape summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OctreeStats {
    pub node_count: usize,
    pub leaf_count: usize,
    /// Total object references (an object straddling k leaves counts k times)
    pub reference_count: usize,
    /// Distinct objects
    pub object_count: usize,
    pub deepest_level: u32,
}

// ============================================================================
// NODE
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct OctreeEntry {
    key: SceneNodeKey,
    bounds: AABB,
}

struct OctreeNode {
    bounds: AABB,
    /// Objects referenced by this node (only leaves hold objects)
    objects: Vec<OctreeEntry>,
    /// All 8 octants, or none (leaf)
    children: Option<Box<[OctreeNode; 8]>>,
    visibility_mask: u32,
}

impl OctreeNode {
    fn new(bounds: AABB) -> Self {
        Self {
            bounds,
            objects: Vec::new(),
            children: None,
            visibility_mask: 0,
        }
    }

    fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Insert into this node or, if it is (or becomes) internal, its children.
    fn insert(&mut self, entry: OctreeEntry, depth: u32, config: &OctreeConfig) {
        if !self.bounds.overlaps(&entry.bounds) {
            return;
        }

        if self.is_leaf() {
            if self.objects.len() < config.max_objects || depth >= config.max_depth {
                self.objects.push(entry);
                return;
            }
            self.subdivide(depth, config);
        }

        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                child.insert(entry, depth + 1, config);
            }
        }
    }

    /// Split into 8 octants and redistribute the objects held so far.
    fn subdivide(&mut self, depth: u32, config: &OctreeConfig) {
        let bounds = self.bounds;
        let mut children: Box<[OctreeNode; 8]> =
            Box::new(std::array::from_fn(|i| OctreeNode::new(bounds.octant(i as u8))));

        engine_trace!(
            "galaxy3d::Octree",
            "Subdividing node at depth {} ({} objects)", depth, self.objects.len()
        );

        for entry in std::mem::take(&mut self.objects) {
            for child in children.iter_mut() {
                child.insert(entry, depth + 1, config);
            }
        }
        self.children = Some(children);
    }

    fn query(&self, region: &AABB, results: &mut Vec<SceneNodeKey>) {
        if !self.bounds.overlaps(region) {
            return;
        }
        results.extend(
            self.objects
                .iter()
                .filter(|e| e.bounds.overlaps(region))
                .map(|e| e.key),
        );
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query(region, results);
            }
        }
    }

    fn collect_along_ray(&self, ray: &Ray, bit: u32, results: &mut Vec<SceneNodeKey>) {
        if !ray.intersects_aabb(&self.bounds) {
            return;
        }
        if self.visibility_mask & bit != 0 {
            results.extend(self.objects.iter().map(|e| e.key));
        }
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_along_ray(ray, bit, results);
            }
        }
    }

    /// Tag this subtree for one camera bit.
    ///
    /// `inherited` short-circuits the plane test: children of a node fully
    /// outside (or fully inside) the frustum share its classification.
    fn update_visibility(
        &mut self,
        frustum: &Frustum,
        bit: u32,
        inherited: Option<FrustumTest>,
        visible: &mut FxHashSet<SceneNodeKey>,
    ) {
        let class = inherited.unwrap_or_else(|| frustum.classify_aabb(&self.bounds));

        if class == FrustumTest::Outside {
            self.visibility_mask &= !bit;
        } else {
            self.visibility_mask |= bit;
            visible.extend(self.objects.iter().map(|e| e.key));
        }

        let child_inherited = match class {
            FrustumTest::Partial => None,
            other => Some(other),
        };
        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                child.update_visibility(frustum, bit, child_inherited, visible);
            }
        }
    }

    fn clear_bit(&mut self, bit: u32) {
        self.visibility_mask &= !bit;
        if let Some(children) = self.children.as_mut() {
            for child in children.iter_mut() {
                child.clear_bit(bit);
            }
        }
    }

    fn visit(&self, depth: u32, visitor: &mut dyn FnMut(&IndexNodeInfo)) {
        visitor(&IndexNodeInfo {
            bounds: self.bounds,
            depth,
            object_count: self.objects.len(),
            is_leaf: self.is_leaf(),
            visibility_mask: self.visibility_mask,
        });
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.visit(depth + 1, visitor);
            }
        }
    }
}

// ============================================================================
// OCTREE
// ============================================================================

/// Dynamic octree spatial index.
pub struct Octree {
    root: OctreeNode,
    config: OctreeConfig,
    /// Per-object visibility masks; also the set of distinct stored objects
    object_masks: FxHashMap<SceneNodeKey, u32>,
}

impl Octree {
    pub fn new(bounds: AABB, config: OctreeConfig) -> Self {
        Self {
            root: OctreeNode::new(bounds),
            config,
            object_masks: FxHashMap::default(),
        }
    }

    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    /// Change the depth limit. Applies to subsequent insertions only.
    pub fn set_max_depth(&mut self, max_depth: u32) {
        self.config.max_depth = max_depth;
    }

    /// Change the leaf capacity. Applies to subsequent insertions only.
    pub fn set_max_objects(&mut self, max_objects: usize) {
        self.config.max_objects = max_objects;
    }

    /// Walk the tree and summarize its shape.
    pub fn stats(&self) -> OctreeStats {
        let mut stats = OctreeStats {
            object_count: self.object_masks.len(),
            ..OctreeStats::default()
        };
        self.root.visit(0, &mut |info: &IndexNodeInfo| {
            stats.node_count += 1;
            stats.reference_count += info.object_count;
            if info.is_leaf {
                stats.leaf_count += 1;
            }
            stats.deepest_level = stats.deepest_level.max(info.depth);
        });
        stats
    }

    /// Snapshot of every node, parents before children.
    pub fn node_infos(&self) -> Vec<IndexNodeInfo> {
        let mut infos = Vec::new();
        self.root.visit(0, &mut |info: &IndexNodeInfo| infos.push(*info));
        infos
    }
}

impl SceneIndex for Octree {
    fn insert(&mut self, key: SceneNodeKey, world_aabb: &AABB) {
        if world_aabb.is_empty() {
            engine_trace!("galaxy3d::Octree", "Ignoring empty bounds for {:?}", key);
            return;
        }

        if !self.root.bounds.overlaps(world_aabb) {
            engine_trace!("galaxy3d::Octree", "{:?} lies outside the root bounds", key);
            return;
        }

        let entry = OctreeEntry { key, bounds: *world_aabb };
        self.root.insert(entry, 0, &self.config);
        self.object_masks.entry(key).or_insert(0);
    }

    fn clear(&mut self) {
        self.root = OctreeNode::new(self.root.bounds);
        self.object_masks.clear();
    }

    fn set_bounds(&mut self, bounds: AABB) {
        self.root.bounds = bounds;
    }

    fn bounds(&self) -> AABB {
        self.root.bounds
    }

    fn object_count(&self) -> usize {
        self.object_masks.len()
    }

    fn query(&self, region: &AABB, results: &mut Vec<SceneNodeKey>) {
        if region.is_empty() {
            return;
        }
        self.root.query(region, results);
    }

    fn collect_along_ray(&self, ray: &Ray, slot: CameraSlot, results: &mut Vec<SceneNodeKey>) {
        self.root.collect_along_ray(ray, slot.mask(), results);
    }

    fn update_visibility(&mut self, slot: CameraSlot, frustum: &Frustum) -> VisibilitySet {
        let bit = slot.mask();
        let mut visible = FxHashSet::default();
        self.root.update_visibility(frustum, bit, None, &mut visible);

        for (key, mask) in self.object_masks.iter_mut() {
            if visible.contains(key) {
                *mask |= bit;
            } else {
                *mask &= !bit;
            }
        }

        VisibilitySet::new(slot, visible)
    }

    fn is_visible(&self, key: SceneNodeKey, slot: CameraSlot) -> bool {
        self.object_masks
            .get(&key)
            .is_some_and(|mask| mask & slot.mask() != 0)
    }

    fn release_slot(&mut self, slot: CameraSlot) {
        let bit = slot.mask();
        self.root.clear_bit(bit);
        for mask in self.object_masks.values_mut() {
            *mask &= !bit;
        }
    }

    fn visit_nodes(&self, visitor: &mut dyn FnMut(&IndexNodeInfo)) {
        self.root.visit(0, visitor);
    }
}

#[cfg(test)]
#[path = "octree_tests.rs"]
mod tests;
