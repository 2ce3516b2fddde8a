//! # Euler Rotation
//!
//! [`Rotation`] stores pitch/yaw/roll in radians (x = pitch, y = yaw,
//! z = roll) together with the 4x4 matrix derived from them. The matrix is
//! rebuilt on every mutation, so it is always the image of the current angles.
//!
//! ## Conventions
//!
//! - The matrix is the YXZ composition (yaw, then pitch, then roll) laid out
//!   column by column exactly as below; [`Rotation::combine`] and the basis
//!   vector extraction depend on that layout.
//! - [`Rotation::forward`] is `-Z` at zero angles; roll never affects
//!   forward, right or up.
//! - Angles are never wrapped. Repeated [`Rotation::rotate_by`] calls may grow
//!   them without bound.
//! - Near `|pitch| = 90°` yaw and roll are ambiguous (gimbal lock); extraction
//!   then reports yaw = roll = 0.

use std::fmt;

use cgmath::{Matrix4, SquareMatrix, Vector4};

use super::vector::Vector3;

/// Distance in radians from ±90° of pitch treated as gimbal lock.
pub const GIMBAL_EPSILON: f32 = 0.001;

/// Euler angle rotation with a cached rotation matrix.
#[derive(Debug, Clone, Copy)]
pub struct Rotation {
    angles: Vector3,
    matrix: Matrix4<f32>,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

/// Equality is defined on the angles; the matrix is derived data.
impl PartialEq for Rotation {
    fn eq(&self, other: &Self) -> bool {
        self.angles == other.angles
    }
}

impl Rotation {
    pub fn identity() -> Self {
        Self {
            angles: Vector3::ZERO,
            matrix: Matrix4::identity(),
        }
    }

    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        let angles = Vector3::new(pitch, yaw, roll);
        Self {
            angles,
            matrix: build_matrix(angles),
        }
    }

    pub fn from_angles(angles: Vector3) -> Self {
        Self::new(angles.x, angles.y, angles.z)
    }

    pub fn angles(&self) -> Vector3 {
        self.angles
    }

    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }

    pub fn pitch(&self) -> f32 {
        self.angles.x
    }

    pub fn yaw(&self) -> f32 {
        self.angles.y
    }

    /// Stored roll, or `0.0` when pitch sits at the ±90° singularity where
    /// roll is undefined.
    pub fn roll(&self) -> f32 {
        if is_gimbal_locked(self.angles.x) {
            0.0
        } else {
            self.angles.z
        }
    }

    /// Overwrites all three angles.
    pub fn set_angles(&mut self, pitch: f32, yaw: f32, roll: f32) {
        self.angles = Vector3::new(pitch, yaw, roll);
        self.matrix = build_matrix(self.angles);
    }

    /// Adds deltas to the current angles.
    pub fn rotate_by(&mut self, d_pitch: f32, d_yaw: f32, d_roll: f32) {
        self.angles += Vector3::new(d_pitch, d_yaw, d_roll);
        self.matrix = build_matrix(self.angles);
    }

    /// Applies the rotation matrix to `point` (homogeneous w = 1).
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        let v = self.matrix * Vector4::new(point.x, point.y, point.z, 1.0);
        Vector3::new(v.x, v.y, v.z)
    }

    /// Rotation equivalent to applying `self` first and `other` second.
    ///
    /// The matrices are multiplied as `other * self` and the angles are read
    /// back from the rows of the product: the third row is the forward basis
    /// (pitch, yaw) and the second row the up basis (roll). Not commutative.
    pub fn combine(&self, other: &Rotation) -> Rotation {
        let combined = other.matrix * self.matrix;

        let forward = matrix_row(&combined, 2).normalize();
        let up = matrix_row(&combined, 1).normalize();

        let pitch = -forward.y.clamp(-1.0, 1.0).asin();
        if is_gimbal_locked(pitch) {
            return Rotation::new(pitch, 0.0, 0.0);
        }

        let yaw = forward.x.atan2(forward.z);

        // Up vector this pitch/yaw would have with zero roll.
        let (sp, cp) = pitch.sin_cos();
        let (sy, cy) = yaw.sin_cos();
        let expected_up = Vector3::new(sy * sp, cp, cy * sp);

        let roll = signed_angle_about(expected_up, up, forward);
        Rotation::new(pitch, yaw, roll)
    }

    /// Look direction; `(0, 0, -1)` at zero angles.
    pub fn forward(&self) -> Vector3 {
        let (sp, cp) = self.angles.x.sin_cos();
        let (sy, cy) = self.angles.y.sin_cos();
        Vector3::new(-sy * cp, sp, -cy * cp)
    }

    /// Horizontal right direction; depends on yaw only.
    pub fn right(&self) -> Vector3 {
        let (sy, cy) = self.angles.y.sin_cos();
        Vector3::new(cy, 0.0, -sy)
    }

    /// `right × forward`.
    pub fn up(&self) -> Vector3 {
        self.right().cross(self.forward())
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.angles.fmt(f)
    }
}

/// True when `pitch` is within [`GIMBAL_EPSILON`] of ±90°.
pub fn is_gimbal_locked(pitch: f32) -> bool {
    (pitch.abs() - std::f32::consts::FRAC_PI_2).abs() < GIMBAL_EPSILON
}

/// Signed angle from `from` to `to` around `axis`, measured after projecting
/// both onto the plane orthogonal to `axis`. Positive when
/// `(from × to) · axis > 0`.
pub(crate) fn signed_angle_about(from: Vector3, to: Vector3, axis: Vector3) -> f32 {
    let from = (from - axis * from.dot(axis)).normalize();
    let to = (to - axis * to.dot(axis)).normalize();
    if from.is_zero() || to.is_zero() {
        return 0.0;
    }

    from.cross(to).dot(axis).atan2(from.dot(to))
}

fn matrix_row(m: &Matrix4<f32>, row: usize) -> Vector3 {
    Vector3::new(m[0][row], m[1][row], m[2][row])
}

fn build_matrix(angles: Vector3) -> Matrix4<f32> {
    let (sp, cp) = angles.x.sin_cos();
    let (sy, cy) = angles.y.sin_cos();
    let (sr, cr) = angles.z.sin_cos();

    // Column-major: each line below is one column.
    #[rustfmt::skip]
    let matrix = Matrix4::new(
        cy * cr + sy * sp * sr,   -cy * sr + sy * sp * cr,   sy * cp,   0.0,
        cp * sr,                   cp * cr,                  -sp,       0.0,
        -sy * cr + cy * sp * sr,   sy * sr + cy * sp * cr,    cy * cp,  0.0,
        0.0,                       0.0,                       0.0,      1.0,
    );
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const TOLERANCE: f32 = 1e-4;

    fn assert_vec_near(actual: Vector3, expected: Vector3) {
        assert!(
            actual.distance(expected) < TOLERANCE,
            "expected {} but got {}",
            expected,
            actual
        );
    }

    fn sample_rotations() -> Vec<Rotation> {
        vec![
            Rotation::identity(),
            Rotation::new(0.3, 0.0, 0.0),
            Rotation::new(0.0, 1.2, 0.0),
            Rotation::new(0.0, 0.0, -0.4),
            Rotation::new(0.4, -2.1, 0.35),
            Rotation::new(-0.35, 2.8, -0.4),
            Rotation::new(0.2, 7.0, 0.1),
        ]
    }

    #[test]
    fn test_default_is_identity() {
        let rot = Rotation::default();
        assert_eq!(rot.angles(), Vector3::ZERO);
        assert_eq!(*rot.matrix(), Matrix4::identity());
    }

    #[test]
    fn test_angle_accessors() {
        let rot = Rotation::new(0.5, 1.0, 1.5);
        assert_eq!(rot.pitch(), 0.5);
        assert_eq!(rot.yaw(), 1.0);
        assert_eq!(rot.roll(), 1.5);
    }

    #[test]
    fn test_roll_undefined_at_singularity() {
        let rot = Rotation::new(FRAC_PI_2, 0.3, 0.8);
        assert_eq!(rot.roll(), 0.0);
        assert_eq!(rot.angles().z, 0.8);

        let rot = Rotation::new(-FRAC_PI_2 + 0.0005, 0.3, 0.8);
        assert_eq!(rot.roll(), 0.0);
    }

    #[test]
    fn test_rotate_by_accumulates_without_wrapping() {
        let mut rot = Rotation::identity();
        rot.rotate_by(0.1, 0.2, 0.3);
        assert_vec_near(rot.angles(), Vector3::new(0.1, 0.2, 0.3));

        for _ in 0..10 {
            rot.rotate_by(0.0, PI, 0.0);
        }
        assert!((rot.yaw() - (0.2 + 10.0 * PI)).abs() < 1e-3);
    }

    #[test]
    fn test_set_angles_rebuilds_matrix() {
        let mut rot = Rotation::identity();
        rot.set_angles(0.0, FRAC_PI_2, 0.0);
        assert_eq!(*rot.matrix(), *Rotation::new(0.0, FRAC_PI_2, 0.0).matrix());
    }

    #[test]
    fn test_equality_uses_angles() {
        assert_eq!(Rotation::new(0.1, 0.2, 0.3), Rotation::new(0.1, 0.2, 0.3));
        assert_ne!(Rotation::new(0.1, 0.2, 0.3), Rotation::new(0.1, 0.2, 0.4));
    }

    #[test]
    fn test_identity_transform_point() {
        let p = Vector3::new(1.5, -2.0, 3.25);
        assert_eq!(Rotation::identity().transform_point(p), p);
        assert_vec_near(Rotation::new(0.0, 0.0, 0.0).transform_point(p), p);
    }

    #[test]
    fn test_yaw_quarter_turn_transform() {
        let rot = Rotation::new(0.0, FRAC_PI_2, 0.0);
        assert_vec_near(
            rot.transform_point(Vector3::UNIT_X),
            Vector3::new(0.0, 0.0, 1.0),
        );
    }

    #[test]
    fn test_basis_vectors_at_zero() {
        let rot = Rotation::identity();
        assert_vec_near(rot.forward(), Vector3::new(0.0, 0.0, -1.0));
        assert_vec_near(rot.right(), Vector3::new(1.0, 0.0, 0.0));
        assert_vec_near(rot.up(), Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_basis_vectors_orthonormal() {
        for rot in sample_rotations() {
            let (f, r, u) = (rot.forward(), rot.right(), rot.up());
            assert!(f.dot(r).abs() < TOLERANCE, "{}", rot);
            assert!(f.dot(u).abs() < TOLERANCE, "{}", rot);
            assert!(r.dot(u).abs() < TOLERANCE, "{}", rot);
            assert!((f.magnitude() - 1.0).abs() < TOLERANCE);
            assert!((r.magnitude() - 1.0).abs() < TOLERANCE);
            assert!((u.magnitude() - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_roll_does_not_change_forward() {
        let a = Rotation::new(0.4, 1.1, 0.0);
        let b = Rotation::new(0.4, 1.1, 2.0);
        assert_vec_near(a.forward(), b.forward());
        assert_vec_near(a.up(), b.up());
    }

    #[test]
    fn test_combine_with_identity() {
        let rot = Rotation::new(0.4, -2.1, 0.9);
        let combined = rot.combine(&Rotation::identity());
        assert_vec_near(combined.angles(), rot.angles());

        let combined = Rotation::identity().combine(&rot);
        assert_vec_near(combined.angles(), rot.angles());
    }

    #[test]
    fn test_combine_matches_sequential_application() {
        let points = [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 2.0, -1.0),
            Vector3::new(-3.0, 0.5, 4.0),
        ];
        let rotations = sample_rotations();

        for a in &rotations {
            for b in &rotations {
                let combined = a.combine(b);
                for p in points {
                    let sequential = b.transform_point(a.transform_point(p));
                    assert!(
                        combined.transform_point(p).distance(sequential) < 1e-3,
                        "a = {}, b = {}, p = {}",
                        a,
                        b,
                        p
                    );
                }
            }
        }
    }

    #[test]
    fn test_combine_is_not_commutative() {
        let a = Rotation::new(0.5, 0.0, 0.0);
        let b = Rotation::new(0.0, 1.0, 0.0);
        let p = Vector3::new(0.0, 0.0, 1.0);
        let ab = a.combine(&b).transform_point(p);
        let ba = b.combine(&a).transform_point(p);
        assert!(ab.distance(ba) > 0.1);
    }

    #[test]
    fn test_combine_at_gimbal_lock_zeroes_yaw_and_roll() {
        let a = Rotation::new(FRAC_PI_2, 0.0, 0.0);
        let b = Rotation::new(0.0, 0.0, 0.0);
        let combined = a.combine(&b);
        assert!((combined.pitch().abs() - FRAC_PI_2).abs() < 1e-3);
        assert_eq!(combined.yaw(), 0.0);
        assert_eq!(combined.angles().z, 0.0);
        assert!(!combined.pitch().is_nan());
    }

    #[test]
    fn test_combine_keeps_yaw_on_steep_pitch() {
        let steep = Rotation::new(88f32.to_radians(), 1.0, 0.0);
        let combined = steep.combine(&Rotation::identity());
        assert!((combined.pitch() - steep.pitch()).abs() < 1e-3);
        assert!((combined.yaw() - 1.0).abs() < 1e-3);
        assert!(combined.roll().abs() < 1e-3);

        let p = Vector3::new(1.0, 0.0, 0.0);
        assert!(combined.transform_point(p).distance(steep.transform_point(p)) < 1e-3);
    }

    #[test]
    fn test_combine_matches_sequential_application_near_vertical() {
        let steep = [
            Rotation::new(88f32.to_radians(), 1.0, 0.0),
            Rotation::new(-89f32.to_radians(), -2.0, 0.3),
            Rotation::new(89.5f32.to_radians(), 0.7, -0.2),
        ];
        let rolls = [
            Rotation::identity(),
            Rotation::new(0.0, 0.0, -0.4),
            Rotation::new(0.0, 0.0, 0.25),
        ];
        let points = [Vector3::new(1.0, 0.0, 0.0), Vector3::new(-3.0, 0.5, 4.0)];

        for a in &steep {
            for b in &rolls {
                for (first, second) in [(a, b), (b, a)] {
                    let combined = first.combine(second);
                    for p in points {
                        let sequential = second.transform_point(first.transform_point(p));
                        assert!(
                            combined.transform_point(p).distance(sequential) < 1e-3,
                            "first = {}, second = {}, p = {}",
                            first,
                            second,
                            p
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_signed_angle_about() {
        let angle = signed_angle_about(Vector3::UNIT_X, Vector3::UNIT_Y, Vector3::UNIT_Z);
        assert!((angle - FRAC_PI_2).abs() < TOLERANCE);

        let angle = signed_angle_about(Vector3::UNIT_Y, Vector3::UNIT_X, Vector3::UNIT_Z);
        assert!((angle + FRAC_PI_2).abs() < TOLERANCE);

        // Parallel to the axis projects to nothing.
        let angle = signed_angle_about(Vector3::UNIT_Z, Vector3::UNIT_X, Vector3::UNIT_Z);
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rotation::identity().to_string(), "(0, 0, 0)");
        assert_eq!(Rotation::new(1.0, 2.0, 3.0).to_string(), "(1, 2, 3)");
    }
}
