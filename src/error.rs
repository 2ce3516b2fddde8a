//! Error types for the Okinawa engine core.
//!
//! Most of the core never fails: config misses, degenerate math and no-op
//! hierarchy operations fall back to defined values. The variants below cover
//! the handful of operations that can be rejected.

use thiserror::Error;

use crate::gfx::scene::NodeId;

/// Main error type for the engine core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The handle does not refer to a live node of this graph
    #[error("invalid node handle: {0}")]
    InvalidNode(NodeId),

    /// Attaching would make a node its own ancestor
    #[error("attaching {child} to {parent} would create a cycle")]
    HierarchyCycle { child: NodeId, parent: NodeId },

    /// The scene collection already holds the maximum number of scenes
    #[error("cannot add more than {0} scenes")]
    SceneLimitReached(usize),

    /// Scene index outside the collection
    #[error("scene index {index} out of range ({len} scenes)")]
    SceneIndexOutOfRange { index: usize, len: usize },

    /// Camera index outside the camera list
    #[error("camera index {index} out of range ({len} cameras)")]
    CameraIndexOutOfRange { index: usize, len: usize },
}

/// Result type alias using the engine's Error type.
pub type Result<T> = std::result::Result<T, Error>;
