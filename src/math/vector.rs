//! Three-component float vector used for positions, scales, velocities and
//! Euler angle triples.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use cgmath::InnerSpace;

/// Magnitudes below this are treated as zero by [`Vector3::normalize`].
pub const NORMALIZE_EPSILON: f32 = 1e-6;

/// A plain `(x, y, z)` value type.
///
/// Arithmetic goes through `cgmath` so results match the matrices built in
/// [`crate::math::Rotation`]. Unlike `cgmath`, normalizing a zero-length
/// vector is defined and returns the zero vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);
    pub const ONE: Vector3 = Vector3::new(1.0, 1.0, 1.0);
    pub const UNIT_X: Vector3 = Vector3::new(1.0, 0.0, 0.0);
    pub const UNIT_Y: Vector3 = Vector3::new(0.0, 1.0, 0.0);
    pub const UNIT_Z: Vector3 = Vector3::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    pub fn magnitude(&self) -> f32 {
        cgmath::Vector3::from(*self).magnitude()
    }

    /// Unit vector in the same direction, or [`Vector3::ZERO`] when the
    /// magnitude is below [`NORMALIZE_EPSILON`].
    pub fn normalize(&self) -> Vector3 {
        let magnitude = self.magnitude();
        if magnitude < NORMALIZE_EPSILON {
            return Vector3::ZERO;
        }
        *self * (1.0 / magnitude)
    }

    pub fn distance(&self, other: Vector3) -> f32 {
        (*self - other).magnitude()
    }

    pub fn dot(&self, other: Vector3) -> f32 {
        cgmath::Vector3::from(*self).dot(other.into())
    }

    pub fn cross(&self, other: Vector3) -> Vector3 {
        cgmath::Vector3::from(*self).cross(other.into()).into()
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<cgmath::Vector3<f32>> for Vector3 {
    fn from(v: cgmath::Vector3<f32>) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for cgmath::Vector3<f32> {
    fn from(v: Vector3) -> Self {
        cgmath::Vector3::new(v.x, v.y, v.z)
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(v: [f32; 3]) -> Self {
        Vector3::new(v[0], v[1], v[2])
    }
}

impl From<Vector3> for cgmath::Point3<f32> {
    fn from(v: Vector3) -> Self {
        cgmath::Point3::new(v.x, v.y, v.z)
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Vector3;

    fn mul(self, scalar: f32) -> Vector3 {
        Vector3::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, other: Vector3) {
        *self = *self + other;
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, other: Vector3) {
        *self = *self - other;
    }
}

impl MulAssign<f32> for Vector3 {
    fn mul_assign(&mut self, scalar: f32) {
        *self = *self * scalar;
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
