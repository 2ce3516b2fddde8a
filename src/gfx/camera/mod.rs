pub mod camera_controller;
pub mod camera_utils;
pub mod perspective_camera;

// Re-export main types
pub use camera_controller::FlyController;
pub use camera_utils::{CameraManager, CameraUniform, ViewProjection};
pub use perspective_camera::Camera;
