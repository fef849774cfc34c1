// src/lib.rs
//! Cubeview
//!
//! An interactive viewer for a single unit cube, built on wgpu and winit. The cube can
//! be moved, rotated and scaled from the keyboard and mouse, and shown either with
//! flat per-face colors or with a lit, textured surface.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod pacing;
pub mod view;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::ViewerApp;
pub use config::ViewerConfig;
pub use error::{RenderError, TextureError, ViewerError};

/// Creates a viewer with the default configuration
pub fn default() -> Result<ViewerApp, ViewerError> {
    ViewerApp::new(ViewerConfig::default())
}
