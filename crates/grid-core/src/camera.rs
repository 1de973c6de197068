use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::constants::{CAMERA_EYE, CAMERA_FAR, CAMERA_NEAR, FRUSTUM_HEIGHT};

/// Orthographic camera with a fixed look-at on the scene origin.
#[derive(Clone, Copy, Debug)]
pub struct OrthoCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub half_height: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl OrthoCamera {
    /// The homepage camera: elevated three-quarter view onto the grid.
    pub fn homepage(aspect: f32) -> Self {
        Self {
            eye: CAMERA_EYE,
            target: Vec3::ZERO,
            half_height: FRUSTUM_HEIGHT / 2.0,
            aspect,
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let half_width = self.half_height * self.aspect;
        Mat4::orthographic_rh(
            -half_width,
            half_width,
            -self.half_height,
            self.half_height,
            self.znear,
            self.zfar,
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Compute a world-space ray through a normalized device coordinate.
    ///
    /// Unprojects the near- and far-plane points behind `ndc`; with an
    /// orthographic projection the direction is constant and the origin
    /// slides across the near plane.
    ///
    /// Returns `(ray_origin, ray_direction)`.
    pub fn screen_ray(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_proj().inverse();
        let p_near = inv * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p0: Vec3 = p_near.truncate() / p_near.w;
        let p1: Vec3 = p_far.truncate() / p_far.w;
        (p0, (p1 - p0).normalize())
    }
}
