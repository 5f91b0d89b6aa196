//! Unit tests for ray.rs

use super::*;
use glam::Vec3;

fn xy_triangle() -> (Vec3, Vec3, Vec3) {
    (Vec3::ZERO, Vec3::X, Vec3::Y)
}

// ============================================================================
// Tests: Triangle
// ============================================================================

#[test]
fn test_diagonal_ray_hits_triangle_vertex() {
    let ray = Ray::new(Vec3::new(0.0, 5.0, 5.0), Vec3::new(0.0, -1.0, -1.0).normalize());
    let (v0, v1, v2) = xy_triangle();
    let t = ray.intersect_triangle(v0, v1, v2).unwrap();
    assert!((t - 5.0 * std::f32::consts::SQRT_2).abs() < 1e-3);
    assert!(ray.at(t).length() < 1e-3);
}

#[test]
fn test_ray_hits_triangle_interior() {
    let ray = Ray::new(Vec3::new(0.25, 0.25, 3.0), Vec3::NEG_Z);
    let (v0, v1, v2) = xy_triangle();
    let t = ray.intersect_triangle(v0, v1, v2).unwrap();
    assert!((t - 3.0).abs() < 1e-5);
}

#[test]
fn test_triangle_is_double_sided() {
    let ray = Ray::new(Vec3::new(0.25, 0.25, -3.0), Vec3::Z);
    let (v0, v1, v2) = xy_triangle();
    assert!(ray.intersect_triangle(v0, v1, v2).is_some());
}

#[test]
fn test_ray_misses_outside_barycentric_range() {
    let (v0, v1, v2) = xy_triangle();
    let ray = Ray::new(Vec3::new(0.8, 0.8, 3.0), Vec3::NEG_Z);
    assert!(ray.intersect_triangle(v0, v1, v2).is_none());
    let ray = Ray::new(Vec3::new(-0.1, 0.5, 3.0), Vec3::NEG_Z);
    assert!(ray.intersect_triangle(v0, v1, v2).is_none());
}

#[test]
fn test_parallel_ray_misses() {
    let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::X);
    let (v0, v1, v2) = xy_triangle();
    assert!(ray.intersect_triangle(v0, v1, v2).is_none());
}

#[test]
fn test_triangle_behind_origin_misses() {
    let ray = Ray::new(Vec3::new(0.25, 0.25, 3.0), Vec3::Z);
    let (v0, v1, v2) = xy_triangle();
    assert!(ray.intersect_triangle(v0, v1, v2).is_none());
}

#[test]
fn test_origin_on_triangle_is_rejected() {
    // t == 0 fails the t > epsilon guard
    let ray = Ray::new(Vec3::new(0.25, 0.25, 0.0), Vec3::NEG_Z);
    let (v0, v1, v2) = xy_triangle();
    assert!(ray.intersect_triangle(v0, v1, v2).is_none());
}

// ============================================================================
// Tests: Box delegation
// ============================================================================

#[test]
fn test_ray_box_delegation() {
    let aabb = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
    assert!(ray.intersects_aabb(&aabb));
    let (t0, _) = ray.intersect_aabb(&aabb).unwrap();
    assert_eq!(ray.at(t0), Vec3::new(0.0, 0.0, 1.0));
}
