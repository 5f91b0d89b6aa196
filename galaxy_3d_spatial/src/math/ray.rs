/// Ray with origin and direction, plus box and triangle tests.

use glam::Vec3;
use super::AABB;

/// Parallel-ray threshold on the Möller–Trumbore determinant, and minimum
/// accepted hit distance (self-intersection guard).
pub const TRIANGLE_EPSILON: f32 = 0.0001;

/// Half-line `origin + t * direction`, `t >= 0`.
///
/// The direction is not required to be normalized; distances returned by the
/// tests are in units of `direction`'s length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// See `AABB::ray_intersection`.
    pub fn intersect_aabb(&self, aabb: &AABB) -> Option<(f32, f32)> {
        aabb.ray_intersection(self.origin, self.direction)
    }

    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        aabb.intersects_ray(self.origin, self.direction)
    }

    /// Möller–Trumbore ray/triangle test, double-sided.
    ///
    /// Returns the hit distance `t` when the ray crosses the triangle strictly
    /// in front of the origin (`t > TRIANGLE_EPSILON`). Rays parallel to the
    /// triangle plane (|det| < `TRIANGLE_EPSILON`) never hit.
    pub fn intersect_triangle(&self, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;
        let h = self.direction.cross(edge2);
        let det = edge1.dot(h);

        if det.abs() < TRIANGLE_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = self.origin - v0;
        let u = inv_det * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = inv_det * self.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = inv_det * edge2.dot(q);
        (t > TRIANGLE_EPSILON).then_some(t)
    }
}

#[cfg(test)]
#[path = "ray_tests.rs"]
mod tests;
