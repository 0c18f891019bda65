//! Minimal software renderer
//!
//! - `math` - vectors, matrices, projection, barycentric coordinates
//! - `render` - framebuffer plus flat-shaded, z-buffered model rendering

#![allow(dead_code)]

pub mod math;
pub mod render;

pub use math::{
    barycentric, mat4_identity, mat4_mul, mat4_transform_dir, mat4_transform_point,
    mat4_translation, project, Mat4, Vec3, FOV_Y_DEG, NEAR_PLANE,
};
pub use render::{render_model, Framebuffer};
