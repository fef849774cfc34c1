//! Global uniform bindings for camera, transform and lighting
//!
//! Everything the shaders need per frame lives in one uniform buffer bound at slot 0
//! in every pipeline. It is rewritten once per frame from the current view state; the
//! geometry itself never changes after startup.

use cgmath::{Deg, Matrix4};

use crate::{
    gfx::camera::{camera_utils::convert_matrix4_to_array, Camera, FixedCamera},
    view::ViewState,
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content structure
///
/// MUST match the `Globals` struct in the shaders exactly. Every field is 16-byte
/// aligned; `vec3` values are padded to `vec4`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    /// Rotates normals into world space
    normal_matrix: [[f32; 4]; 4],
    view_position: [f32; 4],
    light_position: [f32; 4],
    light_ambient: [f32; 4],
    light_diffuse: [f32; 4],
    /// rgb: specular color, w: shininess
    light_specular: [f32; 4],
    line_color: [f32; 4],
}
// Total: 3 * 64 + 6 * 16 = 288 bytes

impl GlobalUBOContent {
    /// Packs the per-frame uniform data
    pub fn new(
        camera: &FixedCamera,
        view: &ViewState,
        light: &LightConfig,
        line_color: [f32; 3],
    ) -> Self {
        Self {
            view_proj: convert_matrix4_to_array(camera.build_view_projection_matrix()),
            model: convert_matrix4_to_array(view.model_matrix()),
            normal_matrix: convert_matrix4_to_array(normal_matrix(view)),
            view_position: camera.view_position(),
            light_position: extend(light.position, 1.0),
            light_ambient: extend(light.ambient, 1.0),
            light_diffuse: extend(light.diffuse, 1.0),
            light_specular: extend(light.specular, light.shininess),
            line_color: extend(line_color, 1.0),
        }
    }

    pub fn model(&self) -> [[f32; 4]; 4] {
        self.model
    }
}

/// Inverse transpose of the model's upper 3x3
///
/// Scale is uniform, so this is the rotation flipped by the sign of the scale. A zero
/// scale collapses the cube to a point; the plain rotation is used then.
fn normal_matrix(view: &ViewState) -> Matrix4<f32> {
    let rotation = Matrix4::from_angle_x(Deg(view.rotation.x))
        * Matrix4::from_angle_y(Deg(view.rotation.y))
        * Matrix4::from_angle_z(Deg(view.rotation.z));
    if view.scale < 0.0 {
        rotation * Matrix4::from_scale(-1.0)
    } else {
        rotation
    }
}

fn extend(v: [f32; 3], w: f32) -> [f32; 4] {
    [v[0], v[1], v[2], w]
}

/// Fixed point light
#[derive(Copy, Clone, Debug)]
pub struct LightConfig {
    /// World-space position; the default camera makes this eye space too
    pub position: [f32; 3],
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            // (5, 5, 5) as seen from a viewer standing at z = 5
            position: [5.0, 5.0, 0.0],
            ambient: [0.2, 0.2, 0.2],
            diffuse: [0.5, 0.5, 0.5],
            specular: [0.3, 0.3, 0.3],
            shininess: 32.0,
        }
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Manages bind group layouts and bind groups for global uniforms
///
/// This is bound to slot 0 in all render pipelines.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group Layout");

        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Global Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    /// Used when creating render pipelines that need access to global uniforms.
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CameraConfig, ProjectionConfig};
    use cgmath::{InnerSpace, Vector3, Vector4};

    fn camera() -> FixedCamera {
        FixedCamera::new(&CameraConfig::default(), &ProjectionConfig::default(), 4.0 / 3.0)
    }

    #[test]
    fn test_content_size_matches_shader_layout() {
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 288);
        assert_eq!(std::mem::size_of::<GlobalUBOContent>() % 16, 0);
    }

    #[test]
    fn test_light_sits_beside_the_cube() {
        let content =
            GlobalUBOContent::new(&camera(), &ViewState::new(), &LightConfig::default(), [0.0; 3]);
        assert_eq!(content.light_position, [5.0, 5.0, 0.0, 1.0]);
        assert_eq!(content.view_position, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_model_matches_view_state() {
        let mut view = ViewState::new();
        view.rotation = Vector3::new(30.0, 45.0, 60.0);
        view.scale = 1.5;
        let content =
            GlobalUBOContent::new(&camera(), &view, &LightConfig::default(), [0.0; 3]);
        assert_eq!(content.model(), convert_matrix4_to_array(view.model_matrix()));
    }

    #[test]
    fn test_normal_matrix_flips_with_negative_scale() {
        let mut view = ViewState::new();
        view.scale = -0.5;
        let flipped = normal_matrix(&view) * Vector4::new(0.0, 0.0, 1.0, 0.0);
        assert!((flipped.truncate() - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-6);

        view.scale = 0.0;
        let zero = normal_matrix(&view) * Vector4::new(0.0, 0.0, 1.0, 0.0);
        assert!((zero.truncate() - Vector3::new(0.0, 0.0, 1.0)).magnitude() < 1e-6);
    }
}
