//! Startup configuration for the viewer
//!
//! Every parameter is a startup-time constant. [`ViewerConfig::default`] holds the
//! values the viewer ships with; there are no CLI flags or config files.

use cgmath::{Point3, Vector3};

use crate::gfx::resources::global_bindings::LightConfig;

/// Window creation parameters
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "3D Interactive Object Viewer".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Perspective projection parameters
#[derive(Debug, Clone, Copy)]
pub struct ProjectionConfig {
    /// Vertical field of view in degrees
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 50.0,
        }
    }
}

/// Fixed camera placement
///
/// The default eye sits at the origin looking down -Z, so the view matrix is the
/// identity and the cube's baseline translation of (0, 0, -5) puts it five units
/// in front of the viewer.
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Point3::new(0.0, 0.0, 0.0),
            target: Point3::new(0.0, 0.0, -1.0),
            up: Vector3::unit_y(),
        }
    }
}

/// Texture asset and fallback pattern parameters
#[derive(Debug, Clone)]
pub struct TextureConfig {
    pub path: String,
    /// Generate a full mip chain and sample trilinearly; bilinear otherwise
    pub mipmaps: bool,
    /// Checkerboard colors used when the asset cannot be decoded (RGBA8)
    pub fallback_colors: [[u8; 4]; 2],
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            path: "assets/texture.png".to_string(),
            mipmaps: true,
            fallback_colors: [[255, 255, 255, 255], [64, 64, 64, 255]],
        }
    }
}

/// Complete viewer configuration
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub target_fps: u32,
    pub texture: TextureConfig,
    pub projection: ProjectionConfig,
    pub camera: CameraConfig,
    pub light: LightConfig,
    pub clear_color: wgpu::Color,
    pub line_color: [f32; 3],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            target_fps: 60,
            texture: TextureConfig::default(),
            projection: ProjectionConfig::default(),
            camera: CameraConfig::default(),
            light: LightConfig::default(),
            clear_color: wgpu::Color {
                r: 0.1,
                g: 0.2,
                b: 0.3,
                a: 1.0,
            },
            line_color: [0.0, 0.0, 0.0],
        }
    }
}

impl ViewerConfig {
    /// Aspect ratio of the configured window
    pub fn aspect(&self) -> f32 {
        self.window.width as f32 / self.window.height.max(1) as f32
    }
}
