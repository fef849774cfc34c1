//! Error types for the viewer
//!
//! Startup and per-frame GPU failures are fatal and bubble up to [`crate::app::ViewerApp::run`].
//! Texture failures are recoverable: decode errors are masked by the fallback pattern and
//! upload errors degrade texture mode to color mode.

use thiserror::Error;

/// Fatal errors raised while bringing up the window and GPU context
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open graphics device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,

    #[error("failed to create render pipelines: {}", .0.join("; "))]
    Pipeline(Vec<String>),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Fatal errors raised while drawing a frame
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("surface texture unavailable: {0}")]
    Surface(wgpu::SurfaceError),

    #[error("GPU out of memory")]
    OutOfMemory,

    #[error("render pipeline '{0}' is not available")]
    MissingPipeline(&'static str),
}

/// Errors from the texture path
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to decode '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("texture upload rejected by the device: {0}")]
    Upload(String),
}
