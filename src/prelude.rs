//! # Okinawa Prelude
//!
//! Commonly used types and traits in one import.
//!
//! ```no_run
//! use okinawa::prelude::*;
//!
//! let mut app = okinawa::default();
//! let mut scene = Scene::new("main");
//! let camera = scene.spawn_camera("camera", Camera::from_config(&app.config));
//! scene.graph.set_position(camera, Vector3::new(0.0, 1.0, 5.0));
//! app.scenes.add(scene).unwrap();
//! app.scenes.set_current(0).unwrap();
//!
//! let mut backend = RecordingBackend::new();
//! app.frame(16.0, &mut backend);
//! ```

// Re-export core application types
pub use crate::app::{FrameClock, OkinawaApp};
pub use crate::config::Config;
pub use crate::default;
pub use crate::error::{Error, Result};

// Re-export math types
pub use crate::math::{direction_to_angles, look_at, Rotation, Vector3};

// Re-export graphics and scene types
pub use crate::gfx::camera::{Camera, CameraManager, CameraUniform, FlyController, ViewProjection};
pub use crate::gfx::item::{Item, ItemGroup};
pub use crate::gfx::render::{DrawCall, DrawContext, DrawSource, MeshId, RecordingBackend, RenderBackend};
pub use crate::gfx::scene::{
    Group, NodeBehavior, NodeId, Scene, SceneGraph, SceneManager, SceneNode, WorldTransform,
};

// Re-export input types
pub use crate::input::{Input, InputState};
