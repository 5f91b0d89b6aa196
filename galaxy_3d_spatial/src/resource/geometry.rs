/// Resource-level geometry type.
///
/// A Geometry is CPU-side triangle data: vertex positions plus a flat
/// `u32` index list (three indices per triangle). Its local-space AABB is
/// computed once at creation. Scene nodes share geometries through `Arc`.
///
/// Two construction paths:
/// - `from_desc` validates indices and fails on malformed data
/// - `new` accepts anything; malformed geometry is then tolerated at query
///   time (the ray test reports no hit for it)

use glam::{Mat4, Vec3};
use crate::error::{Error, Result};
use crate::engine_error;
use crate::engine_warn;
use crate::math::{AABB, Ray};

// ============================================================================
// DESCRIPTOR
// ============================================================================

/// Geometry creation descriptor
pub struct GeometryDesc {
    /// Name used in logs
    pub name: String,
    /// Vertex positions (local space)
    pub positions: Vec<Vec3>,
    /// Triangle list indices into `positions`
    pub indices: Vec<u32>,
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// Triangle geometry with a cached local bounding box
#[derive(Debug, Clone)]
pub struct Geometry {
    name: String,
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    /// Envelope of `positions` (empty if there are none)
    local_aabb: AABB,
}

impl Geometry {
    /// Create a geometry without validating indices
    pub fn new(name: impl Into<String>, positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let local_aabb = AABB::from_points(positions.iter().copied());
        Self {
            name: name.into(),
            positions,
            indices,
            local_aabb,
        }
    }

    /// Create a geometry from tightly packed `xyz` floats
    ///
    /// Trailing floats that do not form a full vertex are ignored.
    pub fn from_flat(name: impl Into<String>, vertices: &[f32], indices: Vec<u32>) -> Self {
        let positions = vertices
            .chunks_exact(3)
            .map(|v| Vec3::new(v[0], v[1], v[2]))
            .collect();
        Self::new(name, positions, indices)
    }

    /// Create a validated geometry from a descriptor
    pub fn from_desc(desc: GeometryDesc) -> Result<Self> {
        let geometry = Self::new(desc.name, desc.positions, desc.indices);
        geometry.validate()?;
        Ok(geometry)
    }

    /// Check that indices form whole triangles and stay within `positions`
    pub fn validate(&self) -> Result<()> {
        if self.indices.len() % 3 != 0 {
            let message = format!(
                "'{}': index count {} is not a multiple of 3",
                self.name, self.indices.len()
            );
            engine_error!("galaxy3d::Geometry", "{}", message);
            return Err(Error::InvalidGeometry(message));
        }

        let vertex_count = self.positions.len();
        if let Some((slot, index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, i)| **i as usize >= vertex_count)
        {
            let message = format!(
                "'{}': index {} at position {} is out of range ({} vertices)",
                self.name, index, slot, vertex_count
            );
            engine_error!("galaxy3d::Geometry", "{}", message);
            return Err(Error::InvalidGeometry(message));
        }

        Ok(())
    }

    /// True if `validate` would succeed
    pub fn is_valid(&self) -> bool {
        self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as usize) < self.positions.len())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of complete triangles in the index list
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Local-space bounding box of all positions
    pub fn local_aabb(&self) -> &AABB {
        &self.local_aabb
    }

    /// Nearest hit distance of `ray` (world space) against the triangles
    /// transformed by `world`.
    ///
    /// Malformed geometry reports no hit as a whole: a single out-of-range
    /// index or a trailing partial triangle disables the test for this
    /// geometry, with a warning.
    pub fn intersect_ray(&self, ray: &Ray, world: &Mat4) -> Option<f32> {
        if !self.is_valid() {
            engine_warn!(
                "galaxy3d::Geometry",
                "'{}': malformed index list, skipped by ray test",
                self.name
            );
            return None;
        }

        self.indices
            .chunks_exact(3)
            .filter_map(|tri| {
                let v0 = world.transform_point3(self.positions[tri[0] as usize]);
                let v1 = world.transform_point3(self.positions[tri[1] as usize]);
                let v2 = world.transform_point3(self.positions[tri[2] as usize]);
                ray.intersect_triangle(v0, v1, v2)
            })
            .min_by(|a, b| a.total_cmp(b))
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
