//! Polyhedron model definitions and mesh generation
//!
//! One parameterized model definition per renderable solid: which mesh to
//! build, how far the solid leans at rest, and whether its idle spin decays.
//! Meshes are flat lists of triangle vertices (three per face) with one
//! outward normal per face - no sharing, since every face is shaded flat.

use crate::raster::Vec3;

const GOLDEN: f32 = 1.618_034;

/// The solids the demo can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solid {
    Octahedron,
    Icosahedron,
    /// Same eight-faced double pyramid as the octahedron, kept as its own
    /// variant because its spin never decays
    Bipyramid,
}

/// Everything that distinguishes one rendered solid from another
#[derive(Debug, Clone, Copy)]
pub struct ModelDef {
    pub solid: Solid,
    /// Lean applied to both the rest orientation and the idle-spin axis,
    /// radians about Z
    pub start_tilt: f32,
    /// When false the released velocity neither decays nor gets floored -
    /// the solid keeps whatever spin the last gesture gave it
    pub spin_decay: bool,
    pub label: &'static str,
}

impl ModelDef {
    pub fn octahedron() -> Self {
        Self {
            solid: Solid::Octahedron,
            start_tilt: std::f32::consts::PI / 16.0,
            spin_decay: true,
            label: "Octahedron",
        }
    }

    pub fn icosahedron() -> Self {
        Self {
            solid: Solid::Icosahedron,
            // Lean of a golden-rectangle edge against vertical
            start_tilt: Vec3::UP.angle(Vec3::new(1.0, GOLDEN, 0.0)),
            spin_decay: true,
            label: "Icosahedron",
        }
    }

    pub fn bipyramid() -> Self {
        Self {
            solid: Solid::Bipyramid,
            start_tilt: std::f32::consts::PI / 16.0,
            spin_decay: false,
            label: "Bipyramid",
        }
    }

    pub fn all() -> [ModelDef; 3] {
        [Self::octahedron(), Self::icosahedron(), Self::bipyramid()]
    }
}

/// Triangle soup with per-face normals
pub struct Mesh {
    /// Three entries per face
    pub positions: Vec<Vec3>,
    /// One entry per face, unit length, outward
    pub normals: Vec<Vec3>,
}

impl Mesh {
    pub fn build(solid: Solid) -> Self {
        let positions = match solid {
            Solid::Octahedron | Solid::Bipyramid => octahedron_positions(),
            Solid::Icosahedron => icosahedron_positions(),
        };
        let normals = face_normals(&positions);
        Self { positions, normals }
    }

    pub fn face_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Outward normal per triangle, from the cross product of its edges.
/// Winding is counter-clockwise seen from outside, so no flipping needed.
fn face_normals(positions: &[Vec3]) -> Vec<Vec3> {
    positions
        .chunks_exact(3)
        .map(|tri| {
            let u = tri[1] - tri[0];
            let v = tri[2] - tri[0];
            u.cross(v).normalize()
        })
        .collect()
}

/// Eight-faced double pyramid: square base on the XZ plane, apexes at
/// y = +/-1.4
fn octahedron_positions() -> Vec<Vec3> {
    let top = Vec3::new(0.0, 1.4, 0.0);
    let bottom = Vec3::new(0.0, -1.4, 0.0);
    let fl = Vec3::new(-1.0, 0.0, 1.0);
    let fr = Vec3::new(1.0, 0.0, 1.0);
    let bl = Vec3::new(-1.0, 0.0, -1.0);
    let br = Vec3::new(1.0, 0.0, -1.0);

    vec![
        top, fl, fr, // top front
        top, bl, fl, // top left
        top, br, bl, // top back
        top, fr, br, // top right
        bottom, fr, fl, // bottom front
        bottom, fl, bl, // bottom left
        bottom, bl, br, // bottom back
        bottom, br, fr, // bottom right
    ]
}

/// Icosahedron built from three mutually orthogonal golden rectangles.
///
/// The first pass puts two triangles on each short edge of every rectangle
/// (front and back side), the second fills the eight corner triangles that
/// join all three rectangles. Scaled down to fit the same framing as the
/// octahedron.
fn icosahedron_positions() -> Vec<Vec3> {
    const SCALE: f32 = 0.75;

    // Rotate a coordinate triple one slot to the right
    fn rot1(a: [f32; 3]) -> [f32; 3] {
        [a[2], a[0], a[1]]
    }

    let mut tris: Vec<[f32; 3]> = Vec::with_capacity(60);

    // Triangles along the short edges of each golden rectangle
    for i in 0..3 {
        let idx_golden = i;
        let idx_one = (idx_golden + 2) % 3;
        let idx_next_golden = (idx_golden + 1) % 3;
        let idx_next_one = idx_golden;

        // Positive-one side
        let mut p1 = [0.0; 3];
        p1[idx_golden] = GOLDEN;
        p1[idx_one] = 1.0;
        let mut p2 = p1;
        p2[idx_one] = -1.0;
        let p3 = rot1(p1);
        let mut p4 = p3;
        p4[idx_next_golden] = -GOLDEN;
        tris.extend_from_slice(&[p1, p2, p3, p2, p1, p4]);

        // Mirror across to the negative side
        let mut n1 = p1;
        let mut n2 = p2;
        n1[idx_golden] = -GOLDEN;
        n2[idx_golden] = -GOLDEN;
        let mut n3 = p3;
        let mut n4 = p4;
        n3[idx_next_one] = -1.0;
        n4[idx_next_one] = -1.0;
        tris.extend_from_slice(&[n2, n1, n3, n1, n2, n4]);
    }

    // Corner triangles, indexed by the four vertices of the X-Y rectangle
    for i in 0..4u32 {
        let x_pos = ((i ^ 2) & 2) != 0;
        let y_pos = ((i + 1) & 2) != 0;

        let p1 = [
            if x_pos { 1.0 } else { -1.0 },
            if y_pos { GOLDEN } else { -GOLDEN },
            0.0,
        ];
        let p2 = [
            0.0,
            if y_pos { 1.0 } else { -1.0 },
            if x_pos == y_pos { GOLDEN } else { -GOLDEN },
        ];
        let p3 = [
            if x_pos { GOLDEN } else { -GOLDEN },
            0.0,
            if x_pos == y_pos { 1.0 } else { -1.0 },
        ];
        tris.extend_from_slice(&[p1, p2, p3]);

        // Mirrored corner on the other side of the XY plane, opposite winding
        let p2n = [p2[0], p2[1], -p2[2]];
        let p3n = [p3[0], p3[1], -p3[2]];
        tris.extend_from_slice(&[p1, p3n, p2n]);
    }

    tris.iter()
        .map(|p| Vec3::new(p[0] * SCALE, p[1] * SCALE, p[2] * SCALE))
        .collect()
}
