/// Frustum: six inward-facing planes extracted from a view-projection matrix.
///
/// A point P is inside when `plane.signed_distance(P) >= 0` for all six
/// planes. Box tests are conservative: a box may be reported visible while
/// being outside (near frustum corners), never the opposite.

use glam::{Mat4, Vec3, Vec4};
use crate::engine_warn;
use crate::math::AABB;

/// Result of a 3-way frustum/AABB classification.
///
/// Used by the octree for hierarchical culling:
/// - `Outside` → every descendant is outside too
/// - `Inside` → every descendant is inside too
/// - `Partial` → children must be tested individually
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// AABB is entirely outside the frustum
    Outside,
    /// AABB is entirely inside the frustum
    Inside,
    /// AABB partially overlaps the frustum
    Partial,
}

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Plane `dot(normal, P) + distance = 0`, normal pointing inward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    /// Plane that excludes nothing (zero normal, zero distance).
    pub const INERT: Plane = Plane { normal: Vec3::ZERO, distance: 0.0 };

    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Build a unit-normal plane from raw `(A, B, C, D)` coefficients.
    ///
    /// Returns `None` when the normal has zero (or non-finite) length.
    pub fn from_coefficients(coefficients: Vec4) -> Option<Self> {
        let normal = coefficients.truncate();
        let length = normal.length();
        if length <= f32::EPSILON || !length.is_finite() {
            return None;
        }
        Some(Self {
            normal: normal / length,
            distance: coefficients.w / length,
        })
    }

    /// Signed distance of `point` (positive on the inner side).
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    pub fn is_inert(&self) -> bool {
        self.normal == Vec3::ZERO
    }

    /// Box corner farthest along the normal
    fn positive_vertex(&self, aabb: &AABB) -> Vec3 {
        Vec3::new(
            if self.normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
            if self.normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
            if self.normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
        )
    }

    /// Box corner farthest against the normal
    fn negative_vertex(&self, aabb: &AABB) -> Vec3 {
        Vec3::new(
            if self.normal.x >= 0.0 { aabb.min.x } else { aabb.max.x },
            if self.normal.y >= 0.0 { aabb.min.y } else { aabb.max.y },
            if self.normal.z >= 0.0 { aabb.min.z } else { aabb.max.z },
        )
    }
}

/// Six frustum planes: left, right, bottom, top, near, far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub planes: [Plane; 6],
}

impl Default for Frustum {
    /// Frustum of inert planes: everything is inside.
    fn default() -> Self {
        Self { planes: [Plane::INERT; 6] }
    }
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Gribb & Hartmann, OpenGL clip convention (`-w <= z <= w`), matching
    /// `Mat4::perspective_rh_gl`. Each plane is normalized; a plane whose
    /// normal has zero length is left inert and a warning is logged.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let row = |i: usize| vp.row(i);
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));

        let raw = [
            r3 + r0, // left
            r3 - r0, // right
            r3 + r1, // bottom
            r3 - r1, // top
            r3 + r2, // near
            r3 - r2, // far
        ];

        let mut planes = [Plane::INERT; 6];
        for (i, coefficients) in raw.iter().enumerate() {
            match Plane::from_coefficients(*coefficients) {
                Some(plane) => planes[i] = plane,
                None => engine_warn!(
                    "galaxy3d::Frustum",
                    "Plane {} has a degenerate normal, left inert", i
                ),
            }
        }

        Self { planes }
    }

    /// True if `point` is on the inner side of every plane.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|p| p.signed_distance(point) >= 0.0)
    }

    /// Corner test: the box is rejected only if, for some plane, all 8 corners
    /// lie strictly on its outer side. Empty boxes are never in the frustum.
    pub fn is_aabb_in_frustum(&self, aabb: &AABB) -> bool {
        if aabb.is_empty() {
            return false;
        }
        let corners = aabb.corners();
        self.planes.iter().all(|plane| {
            corners.iter().any(|&c| plane.signed_distance(c) >= 0.0)
        })
    }

    /// Classify an AABB against the frustum (3-way test).
    ///
    /// Agrees with `is_aabb_in_frustum` on what counts as outside: the
    /// positive vertex is outside a plane exactly when all 8 corners are.
    pub fn classify_aabb(&self, aabb: &AABB) -> FrustumTest {
        if aabb.is_empty() {
            return FrustumTest::Outside;
        }

        let mut all_inside = true;
        for plane in &self.planes {
            if plane.signed_distance(plane.positive_vertex(aabb)) < 0.0 {
                return FrustumTest::Outside;
            }
            if plane.signed_distance(plane.negative_vertex(aabb)) < 0.0 {
                all_inside = false;
            }
        }

        if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
