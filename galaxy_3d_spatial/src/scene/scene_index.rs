/// Spatial acceleration structures for scene queries.
///
/// A SceneIndex stores scene node keys by world-space AABB and answers
/// region queries, ray candidate collection and per-camera visibility.
/// The Scene rebuilds it from scratch when the graph changes
/// (`set_bounds` + `clear` + `insert` for every active object).
///
/// Query results are candidate lists: an implementation may reference one
/// object from several places, so `query` and `collect_along_ray` can return
/// duplicates. Use `dedup_keys` before acting on them.

use rustc_hash::{FxHashMap, FxHashSet};
use crate::camera::Frustum;
use crate::math::{AABB, Ray};
use super::scene_node::SceneNodeKey;
use super::visibility::{CameraSlot, VisibilitySet};

/// Snapshot of one index node, for debug drawing and statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexNodeInfo {
    pub bounds: AABB,
    /// Root = 0
    pub depth: u32,
    /// Direct object references held by this node
    pub object_count: usize,
    pub is_leaf: bool,
    /// One bit per camera slot that found this node in its frustum
    pub visibility_mask: u32,
}

/// Trait for spatial indexing of scene nodes.
pub trait SceneIndex: Send + Sync {
    /// Insert an object with its world-space AABB. Empty boxes are ignored.
    fn insert(&mut self, key: SceneNodeKey, world_aabb: &AABB);

    /// Remove all objects (and any internal structure).
    fn clear(&mut self);

    /// Replace the root bounds. Meant to be followed by `clear`.
    fn set_bounds(&mut self, bounds: AABB);

    /// Current root bounds.
    fn bounds(&self) -> AABB;

    /// Number of distinct objects stored.
    fn object_count(&self) -> usize;

    /// Append every stored reference whose AABB overlaps `region`.
    fn query(&self, region: &AABB, results: &mut Vec<SceneNodeKey>);

    /// Append references reachable along `ray` that `slot` last found visible.
    fn collect_along_ray(&self, ray: &Ray, slot: CameraSlot, results: &mut Vec<SceneNodeKey>);

    /// Recompute `slot`'s visibility bits against `frustum`.
    ///
    /// Only the bit of `slot` changes; other cameras' results are preserved.
    fn update_visibility(&mut self, slot: CameraSlot, frustum: &Frustum) -> VisibilitySet;

    /// Whether `key` was found visible by the last `update_visibility` for `slot`.
    fn is_visible(&self, key: SceneNodeKey, slot: CameraSlot) -> bool;

    /// Clear `slot`'s bit everywhere (camera unregistered).
    fn release_slot(&mut self, slot: CameraSlot);

    /// Visit every index node, parents before children.
    fn visit_nodes(&self, visitor: &mut dyn FnMut(&IndexNodeInfo));
}

/// Remove duplicate keys, keeping the first occurrence of each.
pub fn dedup_keys(keys: &mut Vec<SceneNodeKey>) {
    let mut seen = FxHashSet::default();
    keys.retain(|k| seen.insert(*k));
}

// ===== BRUTE FORCE =====

/// Flat list index: every object is tested individually.
///
/// Suitable for small scenes or as a baseline for comparison. Reports a
/// single leaf node covering its bounds, and never duplicates references.
pub struct BruteForceIndex {
    bounds: AABB,
    objects: Vec<(SceneNodeKey, AABB)>,
    masks: FxHashMap<SceneNodeKey, u32>,
}

impl BruteForceIndex {
    pub fn new(bounds: AABB) -> Self {
        Self {
            bounds,
            objects: Vec::new(),
            masks: FxHashMap::default(),
        }
    }
}

impl SceneIndex for BruteForceIndex {
    fn insert(&mut self, key: SceneNodeKey, world_aabb: &AABB) {
        if world_aabb.is_empty() {
            return;
        }
        if self.masks.insert(key, 0).is_none() {
            self.objects.push((key, *world_aabb));
        } else if let Some(entry) = self.objects.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = *world_aabb;
        }
    }

    fn clear(&mut self) {
        self.objects.clear();
        self.masks.clear();
    }

    fn set_bounds(&mut self, bounds: AABB) {
        self.bounds = bounds;
    }

    fn bounds(&self) -> AABB {
        self.bounds
    }

    fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn query(&self, region: &AABB, results: &mut Vec<SceneNodeKey>) {
        results.extend(
            self.objects
                .iter()
                .filter(|(_, aabb)| aabb.overlaps(region))
                .map(|(key, _)| *key),
        );
    }

    fn collect_along_ray(&self, ray: &Ray, slot: CameraSlot, results: &mut Vec<SceneNodeKey>) {
        results.extend(
            self.objects
                .iter()
                .filter(|(key, aabb)| self.is_visible(*key, slot) && ray.intersects_aabb(aabb))
                .map(|(key, _)| *key),
        );
    }

    fn update_visibility(&mut self, slot: CameraSlot, frustum: &Frustum) -> VisibilitySet {
        let bit = slot.mask();
        let mut visible = FxHashSet::default();
        for (key, aabb) in &self.objects {
            let mask = self.masks.entry(*key).or_insert(0);
            if frustum.is_aabb_in_frustum(aabb) {
                *mask |= bit;
                visible.insert(*key);
            } else {
                *mask &= !bit;
            }
        }
        VisibilitySet::new(slot, visible)
    }

    fn is_visible(&self, key: SceneNodeKey, slot: CameraSlot) -> bool {
        self.masks.get(&key).is_some_and(|m| m & slot.mask() != 0)
    }

    fn release_slot(&mut self, slot: CameraSlot) {
        let bit = slot.mask();
        for mask in self.masks.values_mut() {
            *mask &= !bit;
        }
    }

    fn visit_nodes(&self, visitor: &mut dyn FnMut(&IndexNodeInfo)) {
        let visibility_mask = self.masks.values().fold(0, |acc, m| acc | m);
        visitor(&IndexNodeInfo {
            bounds: self.bounds,
            depth: 0,
            object_count: self.objects.len(),
            is_leaf: true,
            visibility_mask,
        });
    }
}

#[cfg(test)]
#[path = "scene_index_tests.rs"]
mod tests;
