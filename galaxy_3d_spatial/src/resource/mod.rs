//! Resource types attached to scene nodes
//!
//! Geometry carries the triangle data used for bounds and ray picking;
//! Material is opaque surface data carried alongside it.

pub mod geometry;
pub mod material;

pub use geometry::{Geometry, GeometryDesc};
pub use material::{Material, MaterialDesc, ParamValue};
