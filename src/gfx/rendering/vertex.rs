//! # Vertex Data Structures
//!
//! GPU-compatible vertex format shared by the face and wireframe pipelines.

/// A cube vertex as uploaded to the GPU.
///
/// Faces use every attribute. Wireframe vertices only need `position`; the
/// remaining attributes are zeroed and the line shader ignores them.
///
/// # Memory Layout
///
/// The `#[repr(C)]` attribute ensures the struct has a C-compatible memory
/// layout, which is required for GPU buffer operations.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// Outward face normal [nx, ny, nz] for lighting calculations
    pub normal: [f32; 3],
    /// Flat face color used in color mode
    pub color: [f32; 3],
    /// Texture coordinates used in texture mode
    pub tex_coords: [f32; 2],
}

impl Vertex3D {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x3,
        3 => Float32x2,
    ];

    /// Creates a position-only vertex for the wireframe pass
    pub fn position_only(position: [f32; 3]) -> Self {
        Self {
            position,
            normal: [0.0; 3],
            color: [0.0; 3],
            tex_coords: [0.0; 2],
        }
    }

    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// - Attribute 0: Position (Float32x3)
    /// - Attribute 1: Normal (Float32x3)
    /// - Attribute 2: Color (Float32x3)
    /// - Attribute 3: Texture coordinates (Float32x2)
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
