//! Render-side state types shared with frontends.
//!
//! These types avoid referencing platform-specific APIs. A render adapter
//! uses them to build camera matrices and per-layer model transforms from a
//! [`FrameView`](crate::FrameView).

use crate::constants::{
    camera_eye_vec3, CAMERA_FOVY_DEGREES, CAMERA_ZFAR, CAMERA_ZNEAR,
};
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera looking at the cloud from the default distance.
    pub fn for_aspect(aspect: f32) -> Self {
        Self {
            eye: camera_eye_vec3(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 },
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Corners of a camera-facing square `size` world units across, as two
/// triangles centered on the point.
pub fn sprite_quad(size: f32) -> [[f32; 2]; 6] {
    let h = size * 0.5;
    [[-h, -h], [h, -h], [h, h], [-h, -h], [h, h], [-h, h]]
}

/// Fold an accumulated angle back into \[0, 2π).
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    angle.rem_euclid(std::f64::consts::TAU)
}

/// Model transform for a point layer rotated about Y by `angle` radians.
#[inline]
pub fn layer_model_matrix(angle: f32) -> Mat4 {
    Mat4::from_rotation_y(angle)
}
