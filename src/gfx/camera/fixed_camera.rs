use cgmath::{perspective, Deg, EuclideanSpace, Matrix4, Point3, Vector3};

use super::camera_utils::{Camera, OPENGL_TO_WGPU_MATRIX};
use crate::config::{CameraConfig, ProjectionConfig};

/// Stationary perspective camera
///
/// The viewer moves the object, never the camera. Only the aspect ratio changes after
/// startup, when the window is resized.
#[derive(Debug, Clone, Copy)]
pub struct FixedCamera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera for FixedCamera {
    fn build_view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.target, self.up)
    }

    fn build_projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

impl FixedCamera {
    pub fn new(camera: &CameraConfig, projection: &ProjectionConfig, aspect: f32) -> Self {
        Self {
            eye: camera.eye,
            target: camera.target,
            up: camera.up,
            aspect,
            fovy: Deg(projection.fovy),
            znear: projection.znear,
            zfar: projection.zfar,
        }
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    /// Eye position in homogeneous coordinates, padded for the uniform buffer
    pub fn view_position(&self) -> [f32; 4] {
        self.eye.to_vec().extend(1.0).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{SquareMatrix, Vector4};

    fn camera() -> FixedCamera {
        FixedCamera::new(
            &CameraConfig::default(),
            &ProjectionConfig::default(),
            800.0 / 600.0,
        )
    }

    #[test]
    fn test_default_view_is_identity() {
        let view = camera().build_view_matrix();
        let identity = Matrix4::<f32>::identity();
        let actual: &[f32; 16] = view.as_ref();
        let expected: &[f32; 16] = identity.as_ref();
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-6, "{:?}", view);
        }
    }

    #[test]
    fn test_projected_depth_in_wgpu_range() {
        let cam = camera();
        let view_proj = cam.build_view_projection_matrix();
        for z in [-0.1f32, -5.0, -50.0] {
            let clip = view_proj * Vector4::new(0.0, 0.0, z, 1.0);
            let ndc_z = clip.z / clip.w;
            assert!((-1e-4..=1.0 + 1e-4).contains(&ndc_z), "z {} -> {}", z, ndc_z);
        }
    }

    #[test]
    fn test_projection_matches_gl_perspective() {
        // gluPerspective(45, 4/3, 0.1, 50): x_ndc = x / (-z) * cot(22.5°) / aspect
        let cam = camera();
        let clip = cam.build_view_projection_matrix() * Vector4::new(1.0, 0.0, -5.0, 1.0);
        let focal = 1.0 / 22.5f32.to_radians().tan();
        let expected = focal / (800.0 / 600.0) / 5.0;

        assert!((clip.w - 5.0).abs() < 1e-5, "w {}", clip.w);
        assert!((clip.x / clip.w - expected).abs() < 1e-5);

        let near = cam.build_view_projection_matrix() * Vector4::new(0.0, 0.0, -0.1, 1.0);
        let far = cam.build_view_projection_matrix() * Vector4::new(0.0, 0.0, -50.0, 1.0);
        assert!((near.z / near.w).abs() < 1e-4);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_resize_updates_aspect_and_ignores_zero() {
        let mut cam = camera();
        cam.resize_projection(1000, 500);
        assert_eq!(cam.aspect, 2.0);
        cam.resize_projection(0, 500);
        assert_eq!(cam.aspect, 2.0);
    }
}
