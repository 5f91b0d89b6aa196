//! Unit tests for aabb.rs

use super::*;
use glam::{Mat4, Quat, Vec3};

fn unit_box() -> AABB {
    AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0))
}

fn approx_vec(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < 1e-4
}

// ============================================================================
// Tests: Empty box and union
// ============================================================================

#[test]
fn test_empty_box_is_empty() {
    assert!(AABB::EMPTY.is_empty());
    assert!(AABB::default().is_empty());
    assert!(!unit_box().is_empty());
}

#[test]
fn test_degenerate_point_box_is_not_empty() {
    let p = AABB::new(Vec3::ONE, Vec3::ONE);
    assert!(!p.is_empty());
    assert_eq!(p.size(), Vec3::ZERO);
}

#[test]
fn test_union_from_empty_has_no_origin_bias() {
    let mut aabb = AABB::EMPTY;
    aabb.union(Vec3::new(5.0, 6.0, 7.0));
    assert_eq!(aabb.min, Vec3::new(5.0, 6.0, 7.0));
    assert_eq!(aabb.max, Vec3::new(5.0, 6.0, 7.0));

    aabb.union(Vec3::new(8.0, 4.0, 7.5));
    assert_eq!(aabb.min, Vec3::new(5.0, 4.0, 7.0));
    assert_eq!(aabb.max, Vec3::new(8.0, 6.0, 7.5));
}

#[test]
fn test_from_points_empty_iterator() {
    let aabb = AABB::from_points(std::iter::empty());
    assert!(aabb.is_empty());
}

#[test]
fn test_merged_ignores_empty() {
    let a = unit_box();
    assert_eq!(a.merged(&AABB::EMPTY), a);
    assert_eq!(AABB::EMPTY.merged(&a), a);

    let b = AABB::new(Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 1.0, 1.0));
    let m = a.merged(&b);
    assert_eq!(m.min, Vec3::new(-1.0, -1.0, -1.0));
    assert_eq!(m.max, Vec3::new(3.0, 1.0, 1.0));
}

#[test]
fn test_padded() {
    let p = unit_box().padded(0.5);
    assert_eq!(p.min, Vec3::splat(-1.5));
    assert_eq!(p.max, Vec3::splat(1.5));
    assert!(AABB::EMPTY.padded(1.0).is_empty());
}

// ============================================================================
// Tests: Overlap and containment
// ============================================================================

#[test]
fn test_overlaps_is_reflexive_for_non_empty() {
    let a = unit_box();
    assert!(a.overlaps(&a));
}

#[test]
fn test_overlaps_touching_faces() {
    let a = AABB::new(Vec3::ZERO, Vec3::ONE);
    let b = AABB::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn test_overlaps_disjoint_on_one_axis() {
    let a = AABB::new(Vec3::ZERO, Vec3::ONE);
    let b = AABB::new(Vec3::new(0.0, 0.0, 1.01), Vec3::new(1.0, 1.0, 2.0));
    assert!(!a.overlaps(&b));
}

#[test]
fn test_empty_overlaps_nothing() {
    let a = unit_box();
    assert!(!a.overlaps(&AABB::EMPTY));
    assert!(!AABB::EMPTY.overlaps(&a));
    assert!(!AABB::EMPTY.overlaps(&AABB::EMPTY));
}

#[test]
fn test_contains() {
    let outer = AABB::new(Vec3::splat(-10.0), Vec3::splat(10.0));
    assert!(outer.contains(&unit_box()));
    assert!(outer.contains(&outer));
    assert!(!unit_box().contains(&outer));
    assert!(!outer.contains(&AABB::EMPTY));
    assert!(outer.contains_point(Vec3::new(10.0, 0.0, -10.0)));
    assert!(!outer.contains_point(Vec3::new(10.1, 0.0, 0.0)));
}

// ============================================================================
// Tests: Corners, octants, transform
// ============================================================================

#[test]
fn test_corner_bit_layout() {
    let aabb = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 3.0));
    let c = aabb.corners();
    assert_eq!(c[0], Vec3::new(0.0, 0.0, 0.0));
    assert_eq!(c[1], Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(c[2], Vec3::new(0.0, 2.0, 0.0));
    assert_eq!(c[4], Vec3::new(0.0, 0.0, 3.0));
    assert_eq!(c[7], Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_octants_tile_parent() {
    let parent = AABB::new(Vec3::splat(-10.0), Vec3::splat(10.0));
    let mut merged = AABB::EMPTY;
    for i in 0..8u8 {
        let child = parent.octant(i);
        assert_eq!(child.size(), Vec3::splat(10.0));
        assert!(parent.contains(&child));
        merged = merged.merged(&child);
    }
    assert_eq!(merged, parent);

    assert_eq!(parent.octant(0).min, Vec3::splat(-10.0));
    assert_eq!(parent.octant(7).max, Vec3::splat(10.0));
    assert_eq!(parent.octant(1).min, Vec3::new(0.0, -10.0, -10.0));
}

#[test]
fn test_transformed_identity_is_unchanged() {
    let a = unit_box();
    assert_eq!(a.transformed(&Mat4::IDENTITY), a);
}

#[test]
fn test_transformed_translation_and_scale() {
    let m = Mat4::from_scale_rotation_translation(
        Vec3::new(2.0, 1.0, 1.0),
        Quat::IDENTITY,
        Vec3::new(10.0, 0.0, 0.0),
    );
    let t = unit_box().transformed(&m);
    assert!(approx_vec(t.min, Vec3::new(8.0, -1.0, -1.0)));
    assert!(approx_vec(t.max, Vec3::new(12.0, 1.0, 1.0)));
}

#[test]
fn test_transformed_rotation_encloses_all_corners() {
    let m = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_4);
    let a = unit_box();
    let t = a.transformed(&m);
    let r = std::f32::consts::SQRT_2;
    assert!(approx_vec(t.min, Vec3::new(-r, -1.0, -r)));
    assert!(approx_vec(t.max, Vec3::new(r, 1.0, r)));
    for c in a.corners() {
        let p = m.transform_point3(c);
        assert!(t.padded(1e-4).contains_point(p));
    }
}

#[test]
fn test_transformed_empty_stays_empty() {
    let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
    assert!(AABB::EMPTY.transformed(&m).is_empty());
}

// ============================================================================
// Tests: Ray slab test
// ============================================================================

#[test]
fn test_ray_hits_box_in_front() {
    let hit = unit_box().ray_intersection(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
    let (t_min, t_max) = hit.unwrap();
    assert!((t_min - 4.0).abs() < 1e-5);
    assert!((t_max - 6.0).abs() < 1e-5);
}

#[test]
fn test_ray_misses_box_behind() {
    assert!(!unit_box().intersects_ray(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0)));
}

#[test]
fn test_ray_from_inside_hits() {
    let (t_min, t_max) = unit_box().ray_intersection(Vec3::ZERO, Vec3::X).unwrap();
    assert!(t_min < 0.0);
    assert!((t_max - 1.0).abs() < 1e-5);
}

#[test]
fn test_ray_parallel_to_slab() {
    // Direction has zero X and Y components
    let dir = Vec3::new(0.0, 0.0, -1.0);
    assert!(unit_box().intersects_ray(Vec3::new(0.5, -0.5, 5.0), dir));
    assert!(!unit_box().intersects_ray(Vec3::new(1.5, 0.0, 5.0), dir));
    // Origin exactly on a slab plane
    assert!(unit_box().intersects_ray(Vec3::new(1.0, 1.0, 5.0), dir));
}

#[test]
fn test_ray_misses_empty_box() {
    assert!(!AABB::EMPTY.intersects_ray(Vec3::ZERO, Vec3::X));
}
