//! Vector and matrix math for the software renderer

use std::ops::{Add, Mul, Sub};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        self.scale(1.0 / l)
    }

    pub fn scale(self, s: f32) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Rotate about the Z axis (counter-clockwise looking down -Z)
    pub fn rotate_z(self, radians: f32) -> Vec3 {
        let (s, c) = radians.sin_cos();
        Vec3 {
            x: self.x * c - self.y * s,
            y: self.x * s + self.y * c,
            z: self.z,
        }
    }

    /// Angle between two vectors in radians
    pub fn angle(self, other: Vec3) -> f32 {
        let d = self.len() * other.len();
        if d == 0.0 {
            return 0.0;
        }
        (self.dot(other) / d).clamp(-1.0, 1.0).acos()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f32) -> Vec3 {
        self.scale(s)
    }
}

// =============================================================================
// 4x4 Matrix operations
// =============================================================================

/// 4x4 transformation matrix, row-major, translation in the last column
pub type Mat4 = [[f32; 4]; 4];

pub fn mat4_identity() -> Mat4 {
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

pub fn mat4_translation(t: Vec3) -> Mat4 {
    [
        [1.0, 0.0, 0.0, t.x],
        [0.0, 1.0, 0.0, t.y],
        [0.0, 0.0, 1.0, t.z],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

pub fn mat4_mul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut result = [[0.0; 4]; 4];
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

/// Transform a point (w = 1)
pub fn mat4_transform_point(m: &Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z + m[0][3],
        m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z + m[1][3],
        m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z + m[2][3],
    )
}

/// Transform a direction (w = 0, ignores translation)
pub fn mat4_transform_dir(m: &Mat4, d: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * d.x + m[0][1] * d.y + m[0][2] * d.z,
        m[1][0] * d.x + m[1][1] * d.y + m[1][2] * d.z,
        m[2][0] * d.x + m[2][1] * d.y + m[2][2] * d.z,
    )
}

// =============================================================================
// Projection
// =============================================================================

/// Vertical field of view of the fixed perspective camera
pub const FOV_Y_DEG: f32 = 45.0;

/// Minimum camera-space distance before a vertex counts as behind the eye
pub const NEAR_PLANE: f32 = 0.001;

/// Project a view-space point (camera at origin looking down -Z, Y up) to
/// screen coordinates. Returns x,y in pixels and z as positive view depth.
pub fn project(v: Vec3, width: usize, height: usize) -> Vec3 {
    let depth = -v.z;
    let half_w = width as f32 / 2.0;
    let half_h = height as f32 / 2.0;
    if depth < NEAR_PLANE {
        return Vec3::new(half_w, half_h, depth);
    }

    let f = 1.0 / (FOV_Y_DEG.to_radians() * 0.5).tan();
    let s = width.min(height) as f32 / 2.0;
    Vec3::new(
        half_w + (v.x * f / depth) * s,
        half_h - (v.y * f / depth) * s, // screen Y grows downward
        depth,
    )
}

/// Barycentric coordinates of p in screen-space triangle (v1, v2, v3).
/// Returns (u, v, w); all components negative marks a degenerate triangle.
pub fn barycentric(p: Vec3, v1: Vec3, v2: Vec3, v3: Vec3) -> Vec3 {
    let d = (v2.y - v3.y) * (v1.x - v3.x) + (v3.x - v2.x) * (v1.y - v3.y);
    if d.abs() < 0.00001 {
        return Vec3::new(-1.0, -1.0, -1.0);
    }

    let u = ((v2.y - v3.y) * (p.x - v3.x) + (v3.x - v2.x) * (p.y - v3.y)) / d;
    let v = ((v3.y - v1.y) * (p.x - v3.x) + (v1.x - v3.x) * (p.y - v3.y)) / d;
    Vec3::new(u, v, 1.0 - u - v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_dot_cross() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        assert!(a.dot(b).abs() < 0.001);
        assert!((a.cross(b).z - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_vec3_rotate_z() {
        let v = Vec3::UP.rotate_z(std::f32::consts::FRAC_PI_2);
        assert!((v.x + 1.0).abs() < 0.001);
        assert!(v.y.abs() < 0.001);
    }

    #[test]
    fn test_vec3_angle() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 3.0, 0.0);
        assert!((a.angle(b) - std::f32::consts::FRAC_PI_2).abs() < 0.001);
    }

    #[test]
    fn test_mat4_translation_point() {
        let m = mat4_translation(Vec3::new(1.0, 2.0, 3.0));
        let p = mat4_transform_point(&m, Vec3::ZERO);
        assert!((p.x - 1.0).abs() < 0.001);
        assert!((p.y - 2.0).abs() < 0.001);
        assert!((p.z - 3.0).abs() < 0.001);

        // Directions ignore translation
        let d = mat4_transform_dir(&m, Vec3::UP);
        assert!(d.x.abs() < 0.001 && (d.y - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_project_center() {
        let p = project(Vec3::new(0.0, 0.0, -5.0), 480, 480);
        assert!((p.x - 240.0).abs() < 0.001);
        assert!((p.y - 240.0).abs() < 0.001);
        assert!((p.z - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_project_y_flip() {
        // +Y in view space should land above screen center
        let p = project(Vec3::new(0.0, 1.0, -5.0), 480, 480);
        assert!(p.y < 240.0);
    }

    #[test]
    fn test_barycentric_inside() {
        let v1 = Vec3::new(0.0, 0.0, 0.0);
        let v2 = Vec3::new(10.0, 0.0, 0.0);
        let v3 = Vec3::new(5.0, 10.0, 0.0);
        let bc = barycentric(Vec3::new(5.0, 3.0, 0.0), v1, v2, v3);
        assert!(bc.x >= 0.0 && bc.y >= 0.0 && bc.z >= 0.0);
    }

    #[test]
    fn test_barycentric_degenerate() {
        let v = Vec3::new(1.0, 1.0, 0.0);
        let bc = barycentric(Vec3::ZERO, v, v, v);
        assert!(bc.x < 0.0);
    }
}
