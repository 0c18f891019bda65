//! Unit quaternions for orientation state
//!
//! Stored as (x, y, z, w) with w the scalar part. Everything the spinner
//! composes is expected to be unit length; `normalize` after composition
//! keeps floating-point drift bounded over long sessions.

use crate::raster::{Mat4, Vec3};

/// Rotation quaternion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub const IDENTITY: Quat = Quat { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `radians` about a unit axis
    pub fn from_axis_angle(axis: Vec3, radians: f32) -> Self {
        let (s, c) = (radians * 0.5).sin_cos();
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: c,
        }
    }

    /// Rotation from euler angles in degrees, composed Z then Y then X.
    /// Half-angle product form, so no intermediate matrices.
    pub fn from_euler_deg(x_deg: f32, y_deg: f32, z_deg: f32) -> Self {
        let half = std::f32::consts::PI / 360.0;
        let (sx, cx) = (x_deg * half).sin_cos();
        let (sy, cy) = (y_deg * half).sin_cos();
        let (sz, cz) = (z_deg * half).sin_cos();

        Self {
            x: sx * cy * cz - cx * sy * sz,
            y: cx * sy * cz + sx * cy * sz,
            z: cx * cy * sz - sx * sy * cz,
            w: cx * cy * cz + sx * sy * sz,
        }
    }

    /// Post-compose a rotation about the Z axis (used for the start tilt)
    pub fn rotate_z(self, radians: f32) -> Self {
        let (bz, bw) = (radians * 0.5).sin_cos();
        Self {
            x: self.x * bw + self.y * bz,
            y: self.y * bw - self.x * bz,
            z: self.z * bw + self.w * bz,
            w: self.w * bw - self.z * bz,
        }
    }

    /// Hamilton product self * rhs (applies rhs first, then self)
    pub fn mul(self, rhs: Quat) -> Self {
        Self {
            x: self.x * rhs.w + self.w * rhs.x + self.y * rhs.z - self.z * rhs.y,
            y: self.y * rhs.w + self.w * rhs.y + self.z * rhs.x - self.x * rhs.z,
            z: self.z * rhs.w + self.w * rhs.z + self.x * rhs.y - self.y * rhs.x,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }

    pub fn dot(self, other: Quat) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Component-wise sum (not a rotation until normalized - used for averaging)
    pub fn add(self, other: Quat) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            w: self.w + other.w,
        }
    }

    pub fn scale(self, s: f32) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
            w: self.w * s,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Self {
        let l = self.len();
        if l == 0.0 {
            return Quat::IDENTITY;
        }
        self.scale(1.0 / l)
    }

    /// Signed angle of this rotation decomposed about a given unit axis
    /// (the twist component). The axis stays fixed; only the angle about
    /// it is extracted. Result is wrapped to (-PI, PI].
    pub fn twist_angle(self, axis: Vec3) -> f32 {
        let proj = self.x * axis.x + self.y * axis.y + self.z * axis.z;
        let mut angle = 2.0 * proj.atan2(self.w);
        if angle > std::f32::consts::PI {
            angle -= 2.0 * std::f32::consts::PI;
        } else if angle <= -std::f32::consts::PI {
            angle += 2.0 * std::f32::consts::PI;
        }
        angle
    }

    /// Rotate a vector by this quaternion (q v q^-1 for unit q)
    pub fn rotate_vec3(self, v: Vec3) -> Vec3 {
        let u = Vec3::new(self.x, self.y, self.z);
        let uv = u.cross(v);
        let uuv = u.cross(uv);
        v + (uv.scale(self.w) + uuv).scale(2.0)
    }

    /// Rotation matrix, row-major with empty translation column
    pub fn to_mat4(self) -> Mat4 {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, xy, xz) = (x * x2, x * y2, x * z2);
        let (yy, yz, zz) = (y * y2, y * z2, z * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);

        [
            [1.0 - (yy + zz), xy - wz, xz + wy, 0.0],
            [xy + wz, 1.0 - (xx + zz), yz - wx, 0.0],
            [xz - wy, yz + wx, 1.0 - (xx + yy), 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }
}

impl Default for Quat {
    fn default() -> Self {
        Quat::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::mat4_transform_point;

    const EPS: f32 = 1e-5;

    fn assert_vec3_eq(a: Vec3, b: Vec3) {
        assert!((a.x - b.x).abs() < 1e-4, "{:?} != {:?}", a, b);
        assert!((a.y - b.y).abs() < 1e-4, "{:?} != {:?}", a, b);
        assert!((a.z - b.z).abs() < 1e-4, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_identity_mul() {
        let q = Quat::from_axis_angle(Vec3::UP, 0.7);
        let r = Quat::IDENTITY.mul(q);
        assert!((r.dot(q) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_axis_angle_twist_round_trip() {
        let q = Quat::from_axis_angle(Vec3::UP, 0.3);
        assert!((q.twist_angle(Vec3::UP) - 0.3).abs() < EPS);

        // Opposite spin comes out negative about the same fixed axis
        let q = Quat::from_axis_angle(Vec3::UP, -0.3);
        assert!((q.twist_angle(Vec3::UP) + 0.3).abs() < EPS);
    }

    #[test]
    fn test_twist_ignores_orthogonal_component() {
        // A pure X rotation has no twist about Y
        let q = Quat::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), 0.5);
        assert!(q.twist_angle(Vec3::UP).abs() < EPS);
    }

    #[test]
    fn test_from_euler_yaw() {
        // 90 degrees about Y maps +Z onto +X
        let q = Quat::from_euler_deg(0.0, 90.0, 0.0);
        assert_vec3_eq(q.rotate_vec3(Vec3::new(0.0, 0.0, 1.0)), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_from_euler_pitch() {
        // 90 degrees about X maps +Y onto +Z
        let q = Quat::from_euler_deg(90.0, 0.0, 0.0);
        assert_vec3_eq(q.rotate_vec3(Vec3::UP), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_rotate_z_matches_axis_angle() {
        let a = Quat::IDENTITY.rotate_z(0.4);
        let b = Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), 0.4);
        assert!((a.dot(b).abs() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_normalize_unit() {
        let q = Quat::new(1.0, 2.0, 3.0, 4.0).normalize();
        assert!((q.len() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_double_cover_same_rotation() {
        let q = Quat::from_axis_angle(Vec3::UP, 1.1);
        let n = q.scale(-1.0);
        let v = Vec3::new(0.3, 0.5, -0.7);
        assert_vec3_eq(q.rotate_vec3(v), n.rotate_vec3(v));
    }

    #[test]
    fn test_to_mat4_matches_rotate_vec3() {
        let q = Quat::from_euler_deg(30.0, -45.0, 10.0);
        let v = Vec3::new(1.0, -2.0, 0.5);
        assert_vec3_eq(mat4_transform_point(&q.to_mat4(), v), q.rotate_vec3(v));
    }

    #[test]
    fn test_mul_composes() {
        // Two quarter turns about Y equal one half turn
        let quarter = Quat::from_axis_angle(Vec3::UP, std::f32::consts::FRAC_PI_2);
        let half = quarter.mul(quarter);
        assert_vec3_eq(
            half.rotate_vec3(Vec3::new(1.0, 0.0, 0.0)),
            Vec3::new(-1.0, 0.0, 0.0),
        );
    }
}
