use log::debug;

use crate::gfx::scene::{NodeId, SceneGraph};
use crate::input::InputState;
use crate::math::Vector3;

/// Default translation speed in units per second.
pub const MOVE_SPEED: f32 = 5.0;

/// Default turn rate in radians per second.
pub const ROTATION_SPEED: f32 = 2.0;

/// Free-flight controller: turns an [`InputState`] into node velocities.
///
/// Movement follows the node's own forward and right vectors. Speeds are per
/// second and get converted to the per-frame velocities the scene graph
/// integrates.
#[derive(Debug, Clone, Copy)]
pub struct FlyController {
    pub move_speed: f32,
    pub rotation_speed: f32,
}

impl Default for FlyController {
    fn default() -> Self {
        Self::new(MOVE_SPEED, ROTATION_SPEED)
    }
}

impl FlyController {
    pub fn new(move_speed: f32, rotation_speed: f32) -> Self {
        Self {
            move_speed,
            rotation_speed,
        }
    }

    /// Sets `node`'s linear and angular velocity from `state`.
    ///
    /// `frame_unit` is the nominal frame duration in milliseconds. Releasing
    /// every key stops the node.
    pub fn apply(&self, graph: &mut SceneGraph, node: NodeId, state: &InputState, frame_unit: f32) {
        let Some(target) = graph.get_mut(node) else {
            debug!("FlyController :: Node {} is gone", node);
            return;
        };

        let rotation = target.local_rotation();
        let seconds_per_frame = frame_unit / 1000.0;

        let mut direction = Vector3::ZERO;
        if state.forward {
            direction += rotation.forward();
        }
        if state.backward {
            direction -= rotation.forward();
        }
        if state.strafe_right {
            direction += rotation.right();
        }
        if state.strafe_left {
            direction -= rotation.right();
        }

        let turn = self.rotation_speed * seconds_per_frame;
        let yaw = axis(state.turn_left, state.turn_right) * turn;
        let pitch = axis(state.turn_up, state.turn_down) * turn;

        target.set_velocity(direction.normalize() * (self.move_speed * seconds_per_frame));
        target.set_angular_velocity(Vector3::new(pitch, yaw, 0.0));
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}
