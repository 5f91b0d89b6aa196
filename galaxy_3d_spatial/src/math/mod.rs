//! Geometry primitives
//!
//! Pure value types and predicates shared by the scene graph, the spatial
//! index and the camera: axis-aligned boxes, oriented boxes and rays.

mod aabb;
mod obb;
mod ray;

pub use aabb::AABB;
pub use obb::OBB;
pub use ray::{Ray, TRIANGLE_EPSILON};
