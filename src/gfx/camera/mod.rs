pub mod camera_utils;
pub mod fixed_camera;

// Re-export main types
pub use camera_utils::Camera;
pub use fixed_camera::FixedCamera;
