//! Unit tests for obb.rs

use super::*;
use glam::{Mat4, Vec3};

#[test]
fn test_obb_from_empty_is_none() {
    assert!(OBB::from_aabb(&AABB::EMPTY, &Mat4::IDENTITY).is_none());
}

#[test]
fn test_obb_identity_matches_corners() {
    let local = AABB::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
    let obb = OBB::from_aabb(&local, &Mat4::IDENTITY).unwrap();
    assert_eq!(obb.corners, local.corners());
    assert_eq!(obb.to_aabb(), local);
    assert_eq!(obb.center(), Vec3::new(0.5, 1.0, 1.5));
}

#[test]
fn test_obb_rotation_keeps_edge_lengths() {
    let local = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let m = Mat4::from_rotation_z(0.7) * Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0));
    let obb = OBB::from_aabb(&local, &m).unwrap();

    let edges: Vec<_> = obb.edges().collect();
    assert_eq!(edges.len(), 12);
    for (a, b) in edges {
        assert!(((a - b).length() - 2.0).abs() < 1e-4);
    }
}

#[test]
fn test_obb_envelope_contains_corners() {
    let local = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let m = Mat4::from_rotation_x(0.3) * Mat4::from_rotation_y(1.1);
    let obb = OBB::from_aabb(&local, &m).unwrap();
    let envelope = obb.to_aabb();
    assert_eq!(envelope, local.transformed(&m));
}
