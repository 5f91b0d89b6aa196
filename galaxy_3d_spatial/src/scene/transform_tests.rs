/// Tests for Transform

use super::*;
use glam::{Mat4, Quat, Vec3};

fn approx_mat(a: &Mat4, b: &Mat4) -> bool {
    a.abs_diff_eq(*b, 1e-4)
}

// ============================================================================
// Tests: Construction
// ============================================================================

#[test]
fn test_new_is_identity() {
    let t = Transform::new();
    assert_eq!(t.position(), Vec3::ZERO);
    assert_eq!(t.rotation(), Quat::IDENTITY);
    assert_eq!(t.scale(), Vec3::ONE);
    assert_eq!(*t.local_matrix(), Mat4::IDENTITY);
    assert_eq!(*t.global_matrix(), Mat4::IDENTITY);
    assert!(!t.needs_update());
}

// ============================================================================
// Tests: Compose / decompose
// ============================================================================

#[test]
fn test_decompose_identity() {
    let (p, r, s) = Transform::decompose(&Mat4::IDENTITY);
    assert_eq!(p, Vec3::ZERO);
    assert!(r.abs_diff_eq(Quat::IDENTITY, 1e-6));
    assert!(s.abs_diff_eq(Vec3::ONE, 1e-6));
}

#[test]
fn test_compose_decompose_roundtrip() {
    let position = Vec3::new(1.0, -2.0, 3.5);
    let rotation = Quat::from_euler(glam::EulerRot::YXZ, 0.4, -0.3, 1.2);
    let scale = Vec3::new(2.0, 0.5, 1.5);

    let m = Transform::compose(position, rotation, scale);
    let (p, r, s) = Transform::decompose(&m);
    assert!(p.abs_diff_eq(position, 1e-4));
    assert!(s.abs_diff_eq(scale, 1e-4));
    // q and -q are the same rotation
    assert!(r.dot(rotation).abs() > 0.9999);
}

#[test]
fn test_decompose_zero_scale_axis_yields_identity_rotation() {
    let (p, r, s) = Transform::decompose(&Mat4::from_scale(Vec3::new(1.0, 1.0, 0.0)));
    assert_eq!(p, Vec3::ZERO);
    assert_eq!(r, Quat::IDENTITY);
    assert!(s.abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), 1e-6));

    let mut t = Transform::new();
    t.set_local_matrix(&Mat4::from_scale(Vec3::ZERO), &Mat4::IDENTITY);
    t.set_scale(Vec3::ONE);
    t.update_transform(&Mat4::IDENTITY);
    assert!(t.global_matrix().is_finite());
    assert!(approx_mat(t.global_matrix(), &Mat4::IDENTITY));
}

#[test]
fn test_compose_applies_scale_then_rotation_then_translation() {
    let m = Transform::compose(
        Vec3::new(10.0, 0.0, 0.0),
        Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
        Vec3::splat(2.0),
    );
    // X axis scaled to 2, rotated onto +Y, then translated
    let p = m.transform_point3(Vec3::X);
    assert!(p.abs_diff_eq(Vec3::new(10.0, 2.0, 0.0), 1e-4));
}

// ============================================================================
// Tests: Dirty flag and propagation
// ============================================================================

#[test]
fn test_deferred_setters_flag_only() {
    let mut t = Transform::new();
    t.set_position(Vec3::new(1.0, 2.0, 3.0));
    assert!(t.needs_update());
    // Matrices are stale until update
    assert_eq!(*t.local_matrix(), Mat4::IDENTITY);

    t.update_transform(&Mat4::IDENTITY);
    assert!(!t.needs_update());
    assert_eq!(*t.local_matrix(), Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
}

#[test]
fn test_rotation_and_scale_setters_flag() {
    let mut t = Transform::new();
    t.set_rotation(Quat::from_rotation_x(0.5));
    assert!(t.needs_update());
    t.update_transform(&Mat4::IDENTITY);
    t.set_scale(Vec3::splat(3.0));
    assert!(t.needs_update());
}

#[test]
fn test_global_is_parent_times_local() {
    let parent = Mat4::from_translation(Vec3::new(0.0, 5.0, 0.0)) * Mat4::from_rotation_y(0.8);
    let mut t = Transform::new();
    t.set_local(Vec3::new(1.0, 0.0, 0.0), Quat::IDENTITY, Vec3::ONE, &parent);
    assert!(!t.needs_update());
    assert!(approx_mat(t.global_matrix(), &(parent * *t.local_matrix())));
}

#[test]
fn test_set_local_matrix_decomposes() {
    let local = Transform::compose(Vec3::new(4.0, 5.0, 6.0), Quat::from_rotation_z(0.25), Vec3::splat(2.0));
    let mut t = Transform::new();
    t.set_local_matrix(&local, &Mat4::IDENTITY);
    assert!(t.position().abs_diff_eq(Vec3::new(4.0, 5.0, 6.0), 1e-4));
    assert!(t.scale().abs_diff_eq(Vec3::splat(2.0), 1e-4));
    assert!(approx_mat(t.local_matrix(), &local));
    assert!(approx_mat(t.global_matrix(), &local));
}

#[test]
fn test_mark_dirty() {
    let mut t = Transform::new();
    t.mark_dirty();
    assert!(t.needs_update());
}
