//! Camera module: projection, frustum extraction and render views
//!
//! Cameras are plain values. A `Scene` owns registered cameras and gives
//! each one a visibility slot; `Frustum` can also be used on its own.

mod camera;
mod frustum;
mod render_view;

pub use camera::{
    Camera, CameraConfig,
    DEFAULT_FOV_Y_DEGREES, DEFAULT_NEAR, DEFAULT_FAR, DEFAULT_ASPECT,
};
pub use frustum::{
    Frustum, FrustumTest, Plane,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use render_view::RenderView;
