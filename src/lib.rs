// src/lib.rs
//! Okinawa Engine Core
//!
//! Scene graph with parent-relative transforms, Euler-angle rotations and
//! perspective cameras, drawn through a pluggable render backend.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod input;
pub mod math;
pub mod prelude;

// Re-export main types for convenience
pub use app::OkinawaApp;
pub use error::{Error, Result};

/// Creates an application with the default configuration
pub fn default() -> OkinawaApp {
    OkinawaApp::default()
}
