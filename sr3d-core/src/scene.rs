/// A render session: the mesh, the camera and the time-driven animation state
use crate::geometry::Mesh;
use crate::math::{Vec2, Vec3};
use crate::projection::Camera;
use crate::raster::{self, ColorBuffer};
use crate::transform::{self, RotationState, Transform};

/// How projected geometry is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// A small square at every vertex
    Points,
    /// Triangle outlines for every face
    Wireframe,
}

/// Per-session rendering options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub mode: RenderMode,
    /// Added to the animation time on every update
    pub time_step: f64,
    /// Radius of the circular orbit in the XY plane, 0 keeps the mesh in place
    pub orbit_radius: f64,
    /// Amplitude of the `1 + pulse * sin(t)` scale factor, 0 disables it
    pub pulse: f64,
    /// Grid line spacing in pixels, 0 disables the grid
    pub grid_spacing: usize,
    pub point_size: i32,
    pub background: u32,
    pub color: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            mode: RenderMode::Wireframe,
            time_step: 0.0125,
            orbit_radius: 0.0,
            pulse: 0.0,
            grid_spacing: 10,
            point_size: 4,
            background: raster::BLACK,
            color: raster::GREEN,
        }
    }
}

pub struct Scene {
    mesh: Mesh,
    camera: Camera,
    settings: RenderSettings,
    time: f64,
    projected: Vec<Vec2>,
}

impl Scene {
    pub fn new(mesh: Mesh, camera: Camera, settings: RenderSettings) -> Self {
        Self {
            mesh,
            camera,
            settings,
            time: 0.0,
            projected: Vec::new(),
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Screen-space points from the last update; in wireframe mode every
    /// run of three is one triangle
    pub fn projected_points(&self) -> &[Vec2] {
        &self.projected
    }

    /// The model transform at the current time
    pub fn transform(&self) -> Transform {
        let t = self.time;
        let scale = 1.0 + self.settings.pulse * t.sin();
        let orbit = self.settings.orbit_radius;
        Transform {
            rotation: RotationState::uniform(t),
            scale: Vec3::repeat(scale),
            translation: Vec3::new(orbit * t.cos(), orbit * t.sin(), 0.0),
        }
    }

    /// Advance the animation one step and reproject the mesh for a
    /// `width` x `height` viewport
    pub fn update(&mut self, width: usize, height: usize) {
        self.time += self.settings.time_step;

        let model = self.transform().model_matrix();
        let camera = self.camera;
        let project = |v: &Vec3| {
            camera.project_to_screen(&transform::transform_point(&model, v), width, height)
        };

        self.projected.clear();
        let mut skipped = 0usize;
        match self.settings.mode {
            RenderMode::Points => {
                for vertex in self.mesh.vertices() {
                    match project(vertex) {
                        Some(point) => self.projected.push(point),
                        None => skipped += 1,
                    }
                }
            }
            RenderMode::Wireframe => {
                for face in self.mesh.faces() {
                    let corners = self
                        .mesh
                        .face_positions(face)
                        .and_then(|[a, b, c]| Some([project(&a)?, project(&b)?, project(&c)?]));
                    match corners {
                        Some(corners) => self.projected.extend_from_slice(&corners),
                        None => skipped += 1,
                    }
                }
            }
        }

        if skipped > 0 {
            log::trace!("t={:.4}: skipped {} unprojectable primitives", self.time, skipped);
        }
    }

    /// Draw the last projected frame into `buffer`
    pub fn render(&self, buffer: &mut ColorBuffer) {
        buffer.clear(self.settings.background);
        buffer.draw_grid(self.settings.grid_spacing);

        let color = self.settings.color;
        match self.settings.mode {
            RenderMode::Points => {
                let size = self.settings.point_size;
                for point in &self.projected {
                    buffer.draw_rectangle(point.x as i32, point.y as i32, size, size, color);
                }
            }
            RenderMode::Wireframe => {
                for triangle in self.projected.chunks_exact(3) {
                    let (a, b, c) = (triangle[0], triangle[1], triangle[2]);
                    buffer.draw_triangle(
                        a.x as i32, a.y as i32, b.x as i32, b.y as i32, c.x as i32, c.y as i32,
                        color,
                    );
                }
            }
        }
    }
}
