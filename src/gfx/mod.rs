//! # Graphics Module
//!
//! Everything that touches the GPU or feeds it data.
//!
//! - **Camera** ([`camera`]) - fixed eye and perspective projection
//! - **Geometry** ([`geometry`]) - the cube's vertices, edges, faces and colors
//! - **Rendering** ([`rendering`]) - pipelines, buffers and the per-frame draw
//! - **Resources** ([`resources`]) - uniforms, textures and bind groups
//!
//! The window loop only talks to [`RenderEngine`]; it hands over a
//! [`ViewState`](crate::view::ViewState) each frame and never sees a wgpu type.

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;

// Re-export commonly used types
pub use camera::FixedCamera;
pub use geometry::GeometryData;
pub use rendering::render_engine::RenderEngine;
