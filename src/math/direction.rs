//! Conversions between look directions and [`Rotation`]s.

use super::rotation::{is_gimbal_locked, signed_angle_about, Rotation};
use super::vector::Vector3;

/// Pitch and yaw whose [`Rotation::forward`] points along `direction`.
///
/// A direction carries no roll. Looking straight up or down leaves yaw
/// undefined and reports it as `0.0`; a zero direction yields `(0.0, 0.0)`.
pub fn direction_to_angles(direction: Vector3) -> (f32, f32) {
    let dir = direction.normalize();
    if dir.is_zero() {
        return (0.0, 0.0);
    }

    let pitch = dir.y.clamp(-1.0, 1.0).asin();
    if is_gimbal_locked(pitch) {
        return (pitch, 0.0);
    }

    let yaw = (-dir.x).atan2(-dir.z);
    (pitch, yaw)
}

/// Rotation that makes an object at `eye` face `target`.
///
/// Roll is the angle between the up vector implied by the resulting pitch and
/// yaw and `up` re-orthogonalized against the look direction. When the look
/// direction is parallel to `up`, another world axis stands in for it.
pub fn look_at(eye: Vector3, target: Vector3, up: Vector3) -> Rotation {
    let forward = (target - eye).normalize();
    if forward.is_zero() {
        return Rotation::identity();
    }

    let (pitch, yaw) = direction_to_angles(forward);
    if is_gimbal_locked(pitch) {
        return Rotation::new(pitch, 0.0, 0.0);
    }

    let mut world_up = up.normalize();
    if world_up.is_zero() || forward.dot(world_up).abs() > 0.999_999 {
        world_up = if forward.y.abs() < 0.999_999 {
            Vector3::UNIT_Z
        } else {
            Vector3::UNIT_X
        };
    }

    let right = forward.cross(world_up).normalize();
    let desired_up = right.cross(forward);

    let expected_up = Rotation::new(pitch, yaw, 0.0).up();
    let roll = signed_angle_about(expected_up, desired_up, forward);

    Rotation::new(pitch, yaw, roll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const TOLERANCE: f32 = 1e-4;

    #[test]
    fn test_direction_round_trips_through_forward() {
        for (pitch, yaw) in [(0.0, 0.0), (0.3, 1.0), (-0.8, -2.5), (1.2, 3.0)] {
            let forward = Rotation::new(pitch, yaw, 0.0).forward();
            let (p, y) = direction_to_angles(forward);
            assert!((p - pitch).abs() < TOLERANCE);
            assert!((y - yaw).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_steep_direction_keeps_yaw() {
        let forward = Rotation::new(88f32.to_radians(), 1.0, 0.0).forward();
        let (pitch, yaw) = direction_to_angles(forward);
        assert!((pitch - 88f32.to_radians()).abs() < 1e-3);
        assert!((yaw - 1.0).abs() < 1e-3);

        let eye = Vector3::new(1.0, 0.0, 1.0);
        let rot = look_at(eye, eye + forward * 10.0, Vector3::UNIT_Y);
        assert!(rot.forward().distance(forward) < 1e-3);
    }

    #[test]
    fn test_vertical_direction_has_zero_yaw() {
        let (pitch, yaw) = direction_to_angles(Vector3::new(0.0, 5.0, 0.0));
        assert!((pitch - FRAC_PI_2).abs() < TOLERANCE);
        assert_eq!(yaw, 0.0);

        assert_eq!(direction_to_angles(Vector3::ZERO), (0.0, 0.0));
    }

    #[test]
    fn test_look_at_faces_target() {
        let eye = Vector3::new(1.0, 2.0, 3.0);
        let target = Vector3::new(-4.0, 0.0, 8.0);
        let rot = look_at(eye, target, Vector3::UNIT_Y);

        let expected = (target - eye).normalize();
        assert!(rot.forward().distance(expected) < TOLERANCE);
        assert!(rot.roll().abs() < TOLERANCE);
    }

    #[test]
    fn test_look_at_straight_down() {
        let rot = look_at(Vector3::ZERO, Vector3::new(0.0, -10.0, 0.0), Vector3::UNIT_Y);
        assert!((rot.pitch() + FRAC_PI_2).abs() < TOLERANCE);
        assert_eq!(rot.yaw(), 0.0);
        assert_eq!(rot.roll(), 0.0);
    }

    #[test]
    fn test_look_at_same_point_is_identity() {
        let p = Vector3::new(2.0, 2.0, 2.0);
        assert_eq!(look_at(p, p, Vector3::UNIT_Y), Rotation::identity());
    }
}
