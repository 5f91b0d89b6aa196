/// Camera: perspective projection, view matrix and a lazily extracted frustum.
///
/// Every setter marks the frustum dirty; `update_frustum()` re-extracts the
/// planes only when needed. Projection follows the OpenGL clip convention
/// (`perspective_rh_gl`) so the six Gribb & Hartmann planes are exact.

use glam::{Mat4, Vec2, Vec3};
use crate::engine_trace;
use crate::engine_warn;
use crate::math::Ray;
use super::frustum::Frustum;

/// Default vertical field of view, in degrees
pub const DEFAULT_FOV_Y_DEGREES: f32 = 60.0;
/// Default near clip distance
pub const DEFAULT_NEAR: f32 = 0.125;
/// Default far clip distance
pub const DEFAULT_FAR: f32 = 512.0;
/// Default aspect ratio (width / height)
pub const DEFAULT_ASPECT: f32 = 16.0 / 9.0;

// ============================================================================
// CONFIG
// ============================================================================

/// Projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: DEFAULT_FOV_Y_DEGREES,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            aspect: DEFAULT_ASPECT,
        }
    }
}

impl CameraConfig {
    pub fn with_fov(mut self, fov_y_degrees: f32) -> Self {
        self.fov_y_degrees = fov_y_degrees;
        self
    }

    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    /// True if the parameters describe a usable perspective projection
    pub fn is_valid(&self) -> bool {
        self.near > 0.0
            && self.far > self.near
            && self.aspect > 0.0
            && self.fov_y_degrees > 0.0
            && self.fov_y_degrees < 180.0
    }
}

// ============================================================================
// CAMERA
// ============================================================================

#[derive(Debug, Clone)]
pub struct Camera {
    config: CameraConfig,
    view_matrix: Mat4,
    frustum: Frustum,
    /// Set by every setter, cleared by `update_frustum`
    frustum_dirty: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl Camera {
    /// Create a camera at the origin looking down -Z.
    ///
    /// The frustum starts dirty and all-inclusive until the first update.
    pub fn new(config: CameraConfig) -> Self {
        if !config.is_valid() {
            engine_warn!("galaxy3d::Camera", "Degenerate projection parameters {:?}", config);
        }
        Self {
            config,
            view_matrix: Mat4::IDENTITY,
            frustum: Frustum::default(),
            frustum_dirty: true,
        }
    }

    // ===== GETTERS =====

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// View matrix (world → camera).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Perspective projection built from the config.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.config.fov_y_degrees.to_radians(),
            self.config.aspect,
            self.config.near,
            self.config.far,
        )
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix
    }

    /// Eye position in world space.
    pub fn position(&self) -> Vec3 {
        self.view_matrix.inverse().w_axis.truncate()
    }

    /// Frustum as of the last `update_frustum` (may be stale if dirty).
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn is_frustum_dirty(&self) -> bool {
        self.frustum_dirty
    }

    // ===== SETTERS (mark the frustum dirty) =====

    /// Place the camera at `eye` looking at `target`.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.set_view(Mat4::look_at_rh(eye, target, up));
    }

    /// Set the view matrix directly, e.g. the inverse of a node's global matrix.
    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
        self.frustum_dirty = true;
    }

    pub fn set_fov(&mut self, fov_y_degrees: f32) {
        self.set_config(self.config.with_fov(fov_y_degrees));
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.set_config(self.config.with_clip_planes(near, far));
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.set_config(self.config.with_aspect(aspect));
    }

    pub fn set_config(&mut self, config: CameraConfig) {
        if !config.is_valid() {
            engine_warn!("galaxy3d::Camera", "Degenerate projection parameters {:?}", config);
        }
        self.config = config;
        self.frustum_dirty = true;
    }

    /// Re-extract the frustum planes if any parameter changed.
    ///
    /// Returns `true` if the planes were recomputed.
    pub fn update_frustum(&mut self) -> bool {
        if !self.frustum_dirty {
            return false;
        }
        self.frustum = Frustum::from_view_projection(&self.view_projection_matrix());
        self.frustum_dirty = false;
        engine_trace!("galaxy3d::Camera", "Frustum planes re-extracted");
        true
    }

    /// World-space ray through a point in normalized device coordinates
    /// (`x`, `y` in [-1, 1], +Y up).
    ///
    /// The ray starts on the near plane and points towards the far plane.
    /// Returns `None` if the view-projection matrix cannot be inverted.
    pub fn screen_ray(&self, ndc: Vec2) -> Option<Ray> {
        let vp = self.view_projection_matrix();
        let det = vp.determinant();
        if det == 0.0 || !det.is_finite() {
            engine_warn!("galaxy3d::Camera", "View-projection matrix is not invertible");
            return None;
        }

        let inverse = vp.inverse();
        let near = inverse.project_point3(Vec3::new(ndc.x, ndc.y, -1.0));
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        let direction = (far - near).try_normalize()?;
        Some(Ray::new(near, direction))
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
