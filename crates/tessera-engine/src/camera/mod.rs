//! Perspective camera, its GPU uniform, and a keyboard orbit controller.

mod controller;

pub use controller::CameraController;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Maps OpenGL clip-space depth (-1..1) onto wgpu's (0..1).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
]);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Eye at (0, 1, 2) looking at the origin, 45° fov.
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 1.0, 2.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }

    /// Keeps the projection undistorted after a resize. Zero sizes are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let proj = Mat4::perspective_rh_gl(self.fovy.to_radians(), self.aspect, self.znear, self.zfar);
        proj * view
    }
}

/// Uniform block consumed by the vertex shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }
}

impl CameraUniform {
    /// Stores `OPENGL_TO_WGPU * proj * view * model`.
    pub fn update(&mut self, camera: &Camera, model: Mat4) {
        self.view_proj = (OPENGL_TO_WGPU_MATRIX * camera.view_projection() * model).to_cols_array_2d();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn target_projects_to_the_center_inside_depth_range() {
        let camera = Camera::new(1.0);
        let mut uniform = CameraUniform::default();
        uniform.update(&camera, Mat4::IDENTITY);

        let clip = Mat4::from_cols_array_2d(&uniform.view_proj) * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0, "depth {} out of range", ndc.z);
    }

    #[test]
    fn zero_viewport_keeps_aspect() {
        let mut camera = Camera::new(1.5);
        camera.set_viewport(0, 600);
        assert_eq!(camera.aspect, 1.5);
        camera.set_viewport(800, 400);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn default_uniform_is_identity() {
        assert_eq!(CameraUniform::default().view_proj, Mat4::IDENTITY.to_cols_array_2d());
    }
}
