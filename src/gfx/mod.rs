//! # Graphics Module
//!
//! Everything between the math types and the screen.
//!
//! - **Scene** ([`scene`]) - Node hierarchy, scenes and the scene manager
//! - **Camera System** ([`camera`]) - Perspective cameras, camera list, fly controls
//! - **Items** ([`item`]) - Drawable meshes and tagged item groups
//! - **Render Seam** ([`render`]) - Draw calls and the backend trait they go to

pub mod camera;
pub mod item;
pub mod render;
pub mod scene;

// Re-export commonly used types
pub use camera::{Camera, CameraManager};
pub use render::{RecordingBackend, RenderBackend};
pub use scene::{Scene, SceneGraph, SceneManager};
