//! Keyboard polling: raw key presses in, a per-frame [`InputState`] out.

use std::collections::HashSet;

use log::debug;
use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
};

pub use crate::gfx::camera::FlyController;

/// Movement and rotation intents for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    // Movement
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,

    // Rotation
    pub turn_left: bool,
    pub turn_right: bool,
    pub turn_up: bool,
    pub turn_down: bool,

    /// Camera index selected with the digit keys this frame.
    pub change_camera: Option<usize>,
    pub exit_requested: bool,
}

impl InputState {
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.strafe_left || self.strafe_right
    }

    pub fn is_turning(&self) -> bool {
        self.turn_left || self.turn_right || self.turn_up || self.turn_down
    }
}

/// Set of keys currently held down.
#[derive(Debug, Default)]
pub struct Input {
    pressed: HashSet<KeyCode>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.pressed.remove(&key);
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Releases every key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    /// Records a winit keyboard event. Returns `false` for keys without a
    /// physical key code.
    pub fn process_key_event(&mut self, event: &KeyEvent) -> bool {
        match event {
            KeyEvent {
                physical_key: PhysicalKey::Code(code),
                state,
                ..
            } => {
                match state {
                    ElementState::Pressed => self.press(*code),
                    ElementState::Released => self.release(*code),
                }
                true
            }
            _ => {
                debug!("Input :: Ignoring unidentified key {:?}", event.physical_key);
                false
            }
        }
    }

    pub fn state(&self) -> InputState {
        InputState {
            forward: self.is_pressed(KeyCode::KeyW),
            backward: self.is_pressed(KeyCode::KeyS),
            strafe_left: self.is_pressed(KeyCode::KeyA),
            strafe_right: self.is_pressed(KeyCode::KeyD),
            turn_left: self.is_pressed(KeyCode::ArrowLeft),
            turn_right: self.is_pressed(KeyCode::ArrowRight),
            turn_up: self.is_pressed(KeyCode::ArrowUp),
            turn_down: self.is_pressed(KeyCode::ArrowDown),
            change_camera: CAMERA_KEYS
                .iter()
                .position(|key| self.is_pressed(*key)),
            exit_requested: self.is_pressed(KeyCode::Escape),
        }
    }
}

/// Digit keys selecting cameras 0 to 8.
const CAMERA_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];
