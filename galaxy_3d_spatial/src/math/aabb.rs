/// Axis-aligned bounding box.
///
/// The empty box (`min = +inf`, `max = -inf`) is a first-class value: it is the
/// identity for `union`/`merged`, overlaps nothing, and is what a scene object
/// without geometry reports. Every predicate treats it as "excludable".

use glam::{Mat4, Vec3};

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// The empty box. Identity element for `union` and `merged`.
    pub const EMPTY: AABB = AABB {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create a box from its corners (not reordered).
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a box from a center and half-extents.
    pub fn from_center_half_extent(center: Vec3, half_extent: Vec3) -> Self {
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// Smallest box enclosing every point. Empty if the iterator is empty.
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        let mut aabb = Self::EMPTY;
        for point in points {
            aabb.union(point);
        }
        aabb
    }

    /// True if the box encloses no point (any `min > max`, or NaN corners).
    pub fn is_empty(&self) -> bool {
        !(self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z)
    }

    /// Expand the box to include `point`.
    ///
    /// Starting from `AABB::EMPTY` the first call collapses the box onto the
    /// point, so no origin bias is introduced.
    pub fn union(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Smallest box enclosing both boxes. Empty boxes are ignored.
    pub fn merged(&self, other: &AABB) -> AABB {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grow the box by `amount` on every side. Empty boxes stay empty.
    pub fn padded(&self, amount: f32) -> AABB {
        if self.is_empty() {
            return *self;
        }
        AABB {
            min: self.min - Vec3::splat(amount),
            max: self.max + Vec3::splat(amount),
        }
    }

    /// Center point.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Size along each axis (max - min).
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Half of `size()`.
    pub fn half_extent(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Closed-interval overlap test on all three axes.
    ///
    /// Boxes touching on a face (or edge, or corner) overlap: an object lying
    /// exactly on an octree split plane lands in both children.
    pub fn overlaps(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x
        && self.min.y <= other.max.y && self.max.y >= other.min.y
        && self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// True if `other` lies entirely within `self` (boundaries included).
    pub fn contains(&self, other: &AABB) -> bool {
        !other.is_empty()
        && self.min.x <= other.min.x && self.max.x >= other.max.x
        && self.min.y <= other.min.y && self.max.y >= other.max.y
        && self.min.z <= other.min.z && self.max.z >= other.max.z
    }

    /// True if `point` lies inside or on the box.
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x
        && point.y >= self.min.y && point.y <= self.max.y
        && point.z >= self.min.z && point.z <= self.max.z
    }

    /// The 8 corners. Corner `i` takes `max` on X if bit 0 is set,
    /// on Y if bit 1 is set, on Z if bit 2 is set.
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| {
            Vec3::new(
                if i & 1 != 0 { self.max.x } else { self.min.x },
                if i & 2 != 0 { self.max.y } else { self.min.y },
                if i & 4 != 0 { self.max.z } else { self.min.z },
            )
        })
    }

    /// Envelope of the 8 corners after transformation by `matrix`.
    ///
    /// Exact for any affine (and projective) transform; no center/extents shortcut.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        if self.is_empty() {
            return AABB::EMPTY;
        }
        AABB::from_points(self.corners().iter().map(|c| matrix.transform_point3(*c)))
    }

    /// Child octant `index` (0–7) obtained by bisecting every axis at the center.
    ///
    /// Bit layout matches `corners()`: bit0 = X, bit1 = Y, bit2 = Z (0 = low half).
    pub fn octant(&self, index: u8) -> AABB {
        let center = self.center();
        AABB {
            min: Vec3::new(
                if index & 1 == 0 { self.min.x } else { center.x },
                if index & 2 == 0 { self.min.y } else { center.y },
                if index & 4 == 0 { self.min.z } else { center.z },
            ),
            max: Vec3::new(
                if index & 1 == 0 { center.x } else { self.max.x },
                if index & 2 == 0 { center.y } else { self.max.y },
                if index & 4 == 0 { center.z } else { self.max.z },
            ),
        }
    }

    /// Slab-method ray test. Returns `(t_min, t_max)` along `direction`.
    ///
    /// Zero direction components are handled per axis: the ray is parallel to
    /// that slab and hits only if the origin lies between its planes. A hit is
    /// reported when `t_max >= t_min && t_max >= 0`; `t_min` is negative when
    /// the origin is inside the box.
    pub fn ray_intersection(&self, origin: Vec3, direction: Vec3) -> Option<(f32, f32)> {
        if self.is_empty() {
            return None;
        }

        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let lo = self.min[axis];
            let hi = self.max[axis];

            if d == 0.0 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let t0 = (lo - o) * inv;
            let t1 = (hi - o) * inv;
            t_min = t_min.max(t0.min(t1));
            t_max = t_max.min(t0.max(t1));
        }

        if t_max >= t_min && t_max >= 0.0 {
            Some((t_min, t_max))
        } else {
            None
        }
    }

    /// Boolean form of `ray_intersection`.
    pub fn intersects_ray(&self, origin: Vec3, direction: Vec3) -> bool {
        self.ray_intersection(origin, direction).is_some()
    }
}

impl Default for AABB {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
