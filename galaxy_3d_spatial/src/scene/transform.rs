/// Transform: local TRS of a scene node plus its cached matrices.
///
/// `local = T * R * S`, `global = parent_global * local`. TRS setters only
/// flag the transform; `update_transform` recomputes both matrices from the
/// parent's global. `set_local` and `set_local_matrix` recompute immediately.

use glam::{Mat4, Quat, Vec3};

#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
    local_matrix: Mat4,
    global_matrix: Mat4,
    /// Local TRS changed since the last matrix recompute
    needs_update: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Identity transform, up to date.
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            local_matrix: Mat4::IDENTITY,
            global_matrix: Mat4::IDENTITY,
            needs_update: false,
        }
    }

    /// `T * R * S`
    pub fn compose(position: Vec3, rotation: Quat, scale: Vec3) -> Mat4 {
        Mat4::from_scale_rotation_translation(scale, rotation, position)
    }

    /// Split an affine matrix into `(position, rotation, scale)`.
    ///
    /// Exact for matrices built by `compose` with positive scale; shear is
    /// discarded. The rotation is normalized. A degenerate axis (zero scale)
    /// leaves no recoverable rotation, so identity is returned instead.
    pub fn decompose(matrix: &Mat4) -> (Vec3, Quat, Vec3) {
        let (scale, rotation, position) = matrix.to_scale_rotation_translation();
        let rotation = rotation.normalize();
        let rotation = if rotation.is_finite() { rotation } else { Quat::IDENTITY };
        (position, rotation, scale)
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Local matrix as of the last recompute.
    pub fn local_matrix(&self) -> &Mat4 {
        &self.local_matrix
    }

    /// World matrix as of the last recompute.
    pub fn global_matrix(&self) -> &Mat4 {
        &self.global_matrix
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    // ===== DEFERRED SETTERS =====

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.needs_update = true;
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.needs_update = true;
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.needs_update = true;
    }

    /// Force a recompute on the next `update_transform` (e.g. parent moved).
    pub fn mark_dirty(&mut self) {
        self.needs_update = true;
    }

    // ===== IMMEDIATE SETTERS =====

    /// Replace the local TRS and recompute both matrices.
    pub fn set_local(&mut self, position: Vec3, rotation: Quat, scale: Vec3, parent_global: &Mat4) {
        self.position = position;
        self.rotation = rotation;
        self.scale = scale;
        self.update_transform(parent_global);
    }

    /// Replace the local matrix, decomposing it into TRS.
    pub fn set_local_matrix(&mut self, local: &Mat4, parent_global: &Mat4) {
        let (position, rotation, scale) = Self::decompose(local);
        self.set_local(position, rotation, scale, parent_global);
    }

    /// Recompute `local` from TRS and `global = parent_global * local`.
    pub fn update_transform(&mut self, parent_global: &Mat4) {
        self.local_matrix = Self::compose(self.position, self.rotation, self.scale);
        self.global_matrix = *parent_global * self.local_matrix;
        self.needs_update = false;
    }
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
