//! Software rendering of a single lit solid
//!
//! Z-buffered triangle rasterization into an RGBA framebuffer, flat-shaded
//! per face with a two-light diffuse model: each light's intensity
//! attenuates a subtractive tint color, the result is gamma-corrected and
//! composited over white.

use super::math::{
    barycentric, mat4_mul, mat4_transform_dir, mat4_transform_point, mat4_translation, project,
    Vec3,
};
use crate::mesh::Mesh;
use crate::spin::Quat;

/// How far the solid sits in front of the camera
const MODEL_DISTANCE: f32 = 5.0;

/// The two scene lights, view-space positions and subtractive tints
const LIGHTS: [(Vec3, [f32; 3]); 2] = [
    (
        Vec3 { x: -2.5, y: 5.0, z: 6.25 },
        [1.0 - 0.68, 1.0 - 0.85, 1.0 - 0.95],
    ),
    (
        Vec3 { x: 2.5, y: -10.0, z: 0.0 },
        [1.0 - 0.9, 1.0 - 0.8, 1.0 - 0.7],
    ),
];

const SCREEN_GAMMA: f32 = 2.2;

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub zbuffer: Vec<f32>,
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            zbuffer: vec![f32::MAX; width * height],
            width,
            height,
        }
    }

    pub fn clear(&mut self, r: u8, g: u8, b: u8) {
        for i in 0..(self.width * self.height) {
            self.pixels[i * 4] = r;
            self.pixels[i * 4 + 1] = g;
            self.pixels[i * 4 + 2] = b;
            self.pixels[i * 4 + 3] = 255;
            self.zbuffer[i] = f32::MAX;
        }
    }

    /// Fill a screen-space triangle (x, y in pixels, z as view depth)
    fn fill_triangle(&mut self, p0: Vec3, p1: Vec3, p2: Vec3, color: [u8; 4]) {
        let min_x = (p0.x.min(p1.x).min(p2.x).floor().max(0.0)) as usize;
        let max_x = (p0.x.max(p1.x).max(p2.x).ceil()) as usize;
        let min_y = (p0.y.min(p1.y).min(p2.y).floor().max(0.0)) as usize;
        let max_y = (p0.y.max(p1.y).max(p2.y).ceil()) as usize;
        let max_x = max_x.min(self.width.saturating_sub(1));
        let max_y = max_y.min(self.height.saturating_sub(1));

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);
                let bc = barycentric(p, p0, p1, p2);
                if bc.x < 0.0 || bc.y < 0.0 || bc.z < 0.0 {
                    continue;
                }

                let depth = bc.x * p0.z + bc.y * p1.z + bc.z * p2.z;
                let idx = y * self.width + x;
                if depth < self.zbuffer[idx] {
                    self.zbuffer[idx] = depth;
                    let base = idx * 4;
                    self.pixels[base..base + 4].copy_from_slice(&color);
                }
            }
        }
    }
}

/// Two-light diffuse shade for a face, composited over white.
/// `normal` and `centroid` are in view space.
fn shade_face(normal: Vec3, centroid: Vec3) -> [u8; 4] {
    let mut diffuse = [0.0f32; 3];
    let mut alpha = 0.0f32;

    for (pos, tint) in LIGHTS {
        let dir = (pos - centroid).normalize();
        let intensity = dir.dot(normal).clamp(0.0, 1.0);
        for c in 0..3 {
            diffuse[c] += intensity * tint[c];
        }
        alpha += intensity;
    }

    let alpha = alpha.clamp(0.0, 1.0);
    let mut out = [255u8; 4];
    for c in 0..3 {
        let lit = (1.0 - diffuse[c]).clamp(0.0, 1.0);
        let corrected = lit.powf(1.0 / SCREEN_GAMMA);
        // Blend over the white page background
        let composited = corrected * alpha + (1.0 - alpha);
        out[c] = (composited * 255.0) as u8;
    }
    out
}

/// Render the solid at its current orientation. The orientation is the
/// core's single output; it becomes the rotation part of the model-view
/// matrix, built once per frame.
pub fn render_model(fb: &mut Framebuffer, mesh: &Mesh, orientation: Quat) {
    let model_view = mat4_mul(
        &mat4_translation(Vec3::new(0.0, 0.0, -MODEL_DISTANCE)),
        &orientation.to_mat4(),
    );

    for (face, normal) in mesh.positions.chunks_exact(3).zip(&mesh.normals) {
        let v0 = mat4_transform_point(&model_view, face[0]);
        let v1 = mat4_transform_point(&model_view, face[1]);
        let v2 = mat4_transform_point(&model_view, face[2]);
        let n = mat4_transform_dir(&model_view, *normal);
        let centroid = (v0 + v1 + v2).scale(1.0 / 3.0);

        // Back-face cull: camera sits at the view-space origin
        if !is_front_facing(n, centroid) {
            continue;
        }

        let color = shade_face(n, centroid);
        fb.fill_triangle(
            project(v0, fb.width, fb.height),
            project(v1, fb.width, fb.height),
            project(v2, fb.width, fb.height),
            color,
        );
    }
}

/// A face is visible when its outward normal points back at the camera
fn is_front_facing(normal: Vec3, centroid: Vec3) -> bool {
    normal.dot(centroid) < 0.0
}
