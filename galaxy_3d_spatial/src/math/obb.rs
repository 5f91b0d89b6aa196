/// Oriented bounding box, kept as its 8 world-space corners.
///
/// Produced by transforming a local AABB with a world matrix. Used for debug
/// drawing and as a tighter alternative to the re-enveloped world AABB.

use glam::{Mat4, Vec3};
use super::AABB;

/// Pairs of corner indices forming the 12 box edges (same bit layout as `AABB::corners`).
const EDGES: [(usize, usize); 12] = [
    (0, 1), (2, 3), (4, 5), (6, 7), // along X
    (0, 2), (1, 3), (4, 6), (5, 7), // along Y
    (0, 4), (1, 5), (2, 6), (3, 7), // along Z
];

/// Oriented Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OBB {
    /// World-space corners, corner `i` derived from `AABB::corners()[i]`
    pub corners: [Vec3; 8],
}

impl OBB {
    /// Transform each corner of `local` by `matrix`.
    ///
    /// Returns `None` for an empty local box.
    pub fn from_aabb(local: &AABB, matrix: &Mat4) -> Option<Self> {
        if local.is_empty() {
            return None;
        }
        let corners = local.corners().map(|c| matrix.transform_point3(c));
        Some(Self { corners })
    }

    /// Mean of the 8 corners.
    pub fn center(&self) -> Vec3 {
        self.corners.iter().copied().sum::<Vec3>() / 8.0
    }

    /// Axis-aligned envelope of the corners.
    pub fn to_aabb(&self) -> AABB {
        AABB::from_points(self.corners.iter().copied())
    }

    /// The 12 edges as corner pairs, for line drawing.
    pub fn edges(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        EDGES.iter().map(move |&(a, b)| (self.corners[a], self.corners[b]))
    }
}

#[cfg(test)]
#[path = "obb_tests.rs"]
mod tests;
