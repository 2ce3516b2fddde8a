//! # Math Module
//!
//! Vector and rotation types used by the scene graph. Both are thin layers
//! over `cgmath`; matrices handed to renderers are `cgmath::Matrix4<f32>`
//! (column-major).
//!
//! - [`Vector3`] - value-type float triple with a zero-safe `normalize`
//! - [`Rotation`] - Euler angles with a cached YXZ rotation matrix
//! - [`look_at`] / [`direction_to_angles`] - build rotations from directions

pub mod direction;
pub mod rotation;
pub mod vector;

pub use direction::{direction_to_angles, look_at};
pub use rotation::{is_gimbal_locked, Rotation, GIMBAL_EPSILON};
pub use vector::Vector3;
