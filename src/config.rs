//! # Engine Configuration
//!
//! Typed key/value settings shared by the frame loop and the drawing hooks.
//! Keys are dotted strings (`graphics.wireframe`, `window.width`, ...) and each
//! value type lives in its own map, so an integer key is never visible through
//! [`Config::get_float`].
//!
//! Lookups never fail: a missing key logs a warning and yields the type's
//! zero value (`0`, `0.0`, `false`).
//!
//! ```
//! use okinawa::config::Config;
//!
//! let mut config = Config::default();
//! assert_eq!(config.get_int("window.width"), 800);
//!
//! config.set_bool("graphics.wireframe", true);
//! assert!(config.get_bool("graphics.wireframe"));
//! ```

use std::collections::HashMap;

use log::warn;

pub const WIREFRAME: &str = "graphics.wireframe";
pub const TEXTURES: &str = "graphics.textures";
pub const DRAW_CAMERAS: &str = "graphics.drawCameras";
pub const TIME_PER_FRAME: &str = "graphics.time-per-frame";
pub const WINDOW_WIDTH: &str = "window.width";
pub const WINDOW_HEIGHT: &str = "window.height";
pub const FPS: &str = "fps";

const DEFAULT_FPS: i32 = 60;

/// Engine settings, owned by the application and passed down by reference.
#[derive(Debug, Clone)]
pub struct Config {
    ints: HashMap<String, i32>,
    floats: HashMap<String, f32>,
    bools: HashMap<String, bool>,
}

impl Default for Config {
    fn default() -> Self {
        let mut config = Self::empty();

        config.set_bool(WIREFRAME, false);
        config.set_bool(TEXTURES, true);
        config.set_bool(DRAW_CAMERAS, true);

        config.set_int(WINDOW_WIDTH, 800);
        config.set_int(WINDOW_HEIGHT, 600);

        config.set_fps(DEFAULT_FPS);
        config
    }
}

impl Config {
    /// Config with no keys at all; every lookup falls back.
    pub fn empty() -> Self {
        Self {
            ints: HashMap::new(),
            floats: HashMap::new(),
            bools: HashMap::new(),
        }
    }

    pub fn set_int(&mut self, key: &str, value: i32) {
        self.ints.insert(key.to_string(), value);
    }

    pub fn set_float(&mut self, key: &str, value: f32) {
        self.floats.insert(key.to_string(), value);
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.bools.insert(key.to_string(), value);
    }

    /// Stores the target frame rate and the nominal frame duration derived
    /// from it (milliseconds per frame).
    pub fn set_fps(&mut self, fps: i32) {
        self.set_int(FPS, fps);
        if fps > 0 {
            self.set_float(TIME_PER_FRAME, 1000.0 / fps as f32);
        } else {
            warn!("Config :: Ignoring frame time for non-positive fps {}", fps);
        }
    }

    /// Integer value for `key`, or `0` when missing.
    pub fn get_int(&self, key: &str) -> i32 {
        match self.ints.get(key) {
            Some(value) => *value,
            None => {
                warn!("Config :: Failed to get int value for key: {}", key);
                0
            }
        }
    }

    /// Float value for `key`, or `0.0` when missing.
    pub fn get_float(&self, key: &str) -> f32 {
        match self.floats.get(key) {
            Some(value) => *value,
            None => {
                warn!("Config :: Failed to get float value for key: {}", key);
                0.0
            }
        }
    }

    /// Boolean value for `key`, or `false` when missing.
    pub fn get_bool(&self, key: &str) -> bool {
        match self.bools.get(key) {
            Some(value) => *value,
            None => {
                warn!("Config :: Failed to get bool value for key: {}", key);
                false
            }
        }
    }

    /// Nominal frame duration in milliseconds used to normalize velocities.
    ///
    /// Falls back to `1.0` when the configured value is missing or not
    /// positive, so stepping never divides by zero.
    pub fn frame_unit(&self) -> f32 {
        let unit = self.get_float(TIME_PER_FRAME);
        if unit > 0.0 {
            unit
        } else {
            warn!("Config :: Invalid frame unit {}, using 1.0", unit);
            1.0
        }
    }

    /// Viewport aspect ratio from the window size, `1.0` if degenerate.
    pub fn aspect_ratio(&self) -> f32 {
        let width = self.get_int(WINDOW_WIDTH);
        let height = self.get_int(WINDOW_HEIGHT);
        if width > 0 && height > 0 {
            width as f32 / height as f32
        } else {
            1.0
        }
    }
}
