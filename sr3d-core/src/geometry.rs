/// Mesh storage and procedural mesh generators
use std::f64::consts::{FRAC_PI_2, PI, SQRT_2, TAU};

use crate::math::{Vec2, Vec3};

/// Marks an attribute reference a face corner does not carry
pub const NO_INDEX: i32 = -1;

/// Indices of one face corner into a mesh's vertex, texture and normal lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexIndex {
    pub vertex: i32,
    pub texture: i32,
    pub normal: i32,
}

impl VertexIndex {
    pub fn new(vertex: i32, texture: i32, normal: i32) -> Self {
        Self {
            vertex,
            texture,
            normal,
        }
    }

    /// A corner referencing a vertex only
    pub fn vertex_only(vertex: i32) -> Self {
        Self::new(vertex, NO_INDEX, NO_INDEX)
    }

    pub fn vertex_index(&self) -> Option<usize> {
        usize::try_from(self.vertex).ok()
    }

    pub fn texture_index(&self) -> Option<usize> {
        usize::try_from(self.texture).ok()
    }

    pub fn normal_index(&self) -> Option<usize> {
        usize::try_from(self.normal).ok()
    }
}

/// A triangular face of a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub corners: [VertexIndex; 3],
}

impl Face {
    pub fn new(a: VertexIndex, b: VertexIndex, c: VertexIndex) -> Self {
        Self { corners: [a, b, c] }
    }

    /// A face without texture or normal references
    pub fn simple(a: i32, b: i32, c: i32) -> Self {
        Self::new(
            VertexIndex::vertex_only(a),
            VertexIndex::vertex_only(b),
            VertexIndex::vertex_only(c),
        )
    }
}

/// Three positions, the unit procedural builders emit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }
}

/// A 3D mesh: attribute lists plus faces indexing into them.
///
/// Indices are not validated on insertion; renderers bounds-check
/// every corner before using it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    texture_uvs: Vec<Vec2>,
    normals: Vec<Vec3>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn texture_uvs(&self) -> &[Vec2] {
        &self.texture_uvs
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn add_vertex(&mut self, vertex: Vec3) {
        self.vertices.push(vertex);
    }

    pub fn add_texture_uv(&mut self, uv: Vec2) {
        self.texture_uvs.push(uv);
    }

    pub fn add_normal(&mut self, normal: Vec3) {
        self.normals.push(normal);
    }

    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    /// Append the triangle's corners as three new vertices and a face over them
    pub fn add_triangle(&mut self, triangle: Triangle) {
        let first = self.vertices.len() as i32;
        self.vertices.extend_from_slice(&triangle.vertices);
        self.add_face(Face::simple(first, first + 1, first + 2));
    }

    /// Resolve a face's corners to positions, or `None` if any corner is out of range
    pub fn face_positions(&self, face: &Face) -> Option<[Vec3; 3]> {
        let mut positions = [Vec3::zeros(); 3];
        for (position, corner) in positions.iter_mut().zip(&face.corners) {
            *position = *self.vertices.get(corner.vertex_index()?)?;
        }
        Some(positions)
    }

    /// UV sphere of radius 1 centred on the origin.
    ///
    /// `level` rows from pole to pole and `2 * level` columns, two triangles
    /// per cell: `4 * level^2` faces. Levels below 2 are raised to 2.
    pub fn sphere(level: u32) -> Self {
        let level = level.max(2);
        let step = PI / level as f64;
        let mut mesh = Self::new();

        let u_start = FRAC_PI_2;
        let v_start = 0.0;
        let mut previous_u = u_start;
        for u_idx in 1..=level {
            let u = u_start - u_idx as f64 * step;

            let mut previous_v = v_start;
            for v_idx in 1..=level * 2 {
                let v = v_start + v_idx as f64 * step;

                mesh.add_triangle(Triangle::new(
                    point_from_uv(previous_u, previous_v),
                    point_from_uv(previous_u, v),
                    point_from_uv(u, v),
                ));
                mesh.add_triangle(Triangle::new(
                    point_from_uv(u, v),
                    point_from_uv(u, previous_v),
                    point_from_uv(previous_u, previous_v),
                ));

                previous_v = v;
            }
            previous_u = u;
        }

        mesh
    }

    /// Closed cylinder of radius 1 and half-height `sqrt(2) / 2` around the Y axis.
    ///
    /// Each of the `level` segments adds a top cap triangle, a bottom cap
    /// triangle and two wall triangles. Levels below 3 are raised to 3.
    pub fn cylinder(level: u32) -> Self {
        let level = level.max(3);
        let half_height = SQRT_2 / 2.0;
        let step = TAU / level as f64;
        let mut mesh = Self::new();

        let top_center = Vec3::new(0.0, half_height, 0.0);
        let bottom_center = Vec3::new(0.0, -half_height, 0.0);
        let mut top0 = Vec3::new(1.0, half_height, 0.0);
        let mut bottom0 = Vec3::new(1.0, -half_height, 0.0);

        for i in 1..=level {
            let angle = i as f64 * step;
            let (z, x) = angle.sin_cos();
            let top1 = Vec3::new(x, half_height, z);
            let bottom1 = Vec3::new(x, -half_height, z);

            mesh.add_triangle(Triangle::new(top_center, top1, top0));
            mesh.add_triangle(Triangle::new(bottom_center, bottom0, bottom1));
            mesh.add_triangle(Triangle::new(top0, top1, bottom1));
            mesh.add_triangle(Triangle::new(bottom1, bottom0, top0));

            top0 = top1;
            bottom0 = bottom1;
        }

        mesh
    }

    /// Axis-aligned cube with the given edge length, two triangles per side
    pub fn cube(size: f64) -> Self {
        let h = size / 2.0;
        let corner = |x: f64, y: f64, z: f64| Vec3::new(x * h, y * h, z * h);
        let mut mesh = Self::new();

        // Each side as (a, b, c, d) in counter-clockwise order seen from outside
        let sides = [
            // Front
            [(-1., -1., 1.), (1., -1., 1.), (1., 1., 1.), (-1., 1., 1.)],
            // Back
            [(1., -1., -1.), (-1., -1., -1.), (-1., 1., -1.), (1., 1., -1.)],
            // Top
            [(-1., 1., 1.), (1., 1., 1.), (1., 1., -1.), (-1., 1., -1.)],
            // Bottom
            [(-1., -1., -1.), (1., -1., -1.), (1., -1., 1.), (-1., -1., 1.)],
            // Right
            [(1., -1., 1.), (1., -1., -1.), (1., 1., -1.), (1., 1., 1.)],
            // Left
            [(-1., -1., -1.), (-1., -1., 1.), (-1., 1., 1.), (-1., 1., -1.)],
        ];

        for [a, b, c, d] in sides {
            let (a, b, c, d) = (
                corner(a.0, a.1, a.2),
                corner(b.0, b.1, b.2),
                corner(c.0, c.1, c.2),
                corner(d.0, d.1, d.2),
            );
            mesh.add_triangle(Triangle::new(a, b, c));
            mesh.add_triangle(Triangle::new(a, c, d));
        }

        mesh
    }

    /// 9x9x9 lattice of points spanning [-1, 1] on every axis, no faces
    pub fn cube_points() -> Self {
        const STEPS: i32 = 9;
        const SPACING: f64 = 0.25;

        let mut mesh = Self::new();
        for xi in 0..STEPS {
            for yi in 0..STEPS {
                for zi in 0..STEPS {
                    mesh.add_vertex(Vec3::new(
                        -1.0 + xi as f64 * SPACING,
                        -1.0 + yi as f64 * SPACING,
                        -1.0 + zi as f64 * SPACING,
                    ));
                }
            }
        }
        mesh
    }
}

fn point_from_uv(u: f64, v: f64) -> Vec3 {
    let cos_u = u.cos();
    Vec3::new(cos_u * v.cos(), u.sin(), cos_u * v.sin())
}
