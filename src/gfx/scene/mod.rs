//! # Scene Module
//!
//! Parent-relative transform hierarchy and the scene containers built on it.
//!
//! ## Key Components
//!
//! - [`SceneGraph`] - Arena of nodes with hierarchy, world transform queries
//!   and the step/draw traversals
//! - [`SceneNode`] - Local position, rotation, scale and motion of one node
//! - [`NodeBehavior`] - Per-type hooks (camera, item, group) run by the graph
//! - [`Scene`] - Named graph with root objects, cameras and activation state
//! - [`SceneManager`] - Ordered scene collection with a current scene
//!
//! ## Usage
//!
//! ```no_run
//! use okinawa::gfx::scene::{Group, SceneGraph};
//! use okinawa::math::{Rotation, Vector3};
//!
//! let mut graph = SceneGraph::new();
//! let pivot = graph.insert("pivot", Group);
//! let moon = graph.insert_child(pivot, "moon", Group).unwrap();
//! graph.set_position(moon, Vector3::new(0.0, 0.0, -5.0));
//!
//! // Turning the pivot carries the moon around it.
//! graph.set_rotation(pivot, Rotation::new(0.0, std::f32::consts::PI, 0.0));
//! let world = graph.world_position(moon);
//! ```

pub mod graph;
pub mod manager;
pub mod node;
pub mod scene;

// Re-export main types
pub use graph::SceneGraph;
pub use manager::{SceneManager, MAX_SCENES};
pub use node::{Group, NodeBehavior, NodeId, SceneNode, WorldTransform};
pub use scene::Scene;
