/// sr3d - software-rasterized 3D viewer for the terminal
///
/// Shows a Wavefront OBJ file, or a generated shape when no file is given,
/// spinning in front of a fixed camera.
/// Controls:
///   - Q/ESC/Ctrl-C: Quit

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use sr3d_core::{obj, Camera, Display, Mesh, RenderMode, RenderSettings, Scene};
use sr3d_terminal::{App, TerminalDisplay};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Shape {
    Cube,
    CubePoints,
    Sphere,
    Cylinder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Points,
    Wireframe,
}

#[derive(Parser, Debug)]
#[command(name = "sr3d", version, about)]
struct Cli {
    /// Wavefront OBJ file to display
    path: Option<PathBuf>,

    /// Generated shape shown when no file is given
    #[arg(long, value_enum, default_value_t = Shape::Cube)]
    shape: Shape,

    /// Tessellation level for the sphere and cylinder
    #[arg(long, default_value_t = 12)]
    level: u32,

    /// Drawing mode [default: points for point clouds, wireframe otherwise]
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Frame rate cap
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Radius of the circular orbit in the XY plane
    #[arg(long, default_value_t = 0.0)]
    orbit: f64,

    /// Amplitude of the pulsing scale
    #[arg(long, default_value_t = 0.0)]
    pulse: f64,

    /// Camera position on the Z axis
    #[arg(long, default_value_t = -5.0, allow_hyphen_values = true)]
    camera_z: f64,

    /// Focal factor of the perspective divide [default: display width / 3]
    #[arg(long)]
    fov_factor: Option<f64>,

    /// Background grid spacing in pixels, 0 hides the grid
    #[arg(long, default_value_t = 10)]
    grid_spacing: usize,
}

impl Cli {
    fn load_mesh(&self) -> anyhow::Result<Mesh> {
        let Some(path) = &self.path else {
            return Ok(match self.shape {
                Shape::Cube => Mesh::cube(2.0),
                Shape::CubePoints => Mesh::cube_points(),
                Shape::Sphere => Mesh::sphere(self.level),
                Shape::Cylinder => Mesh::cylinder(self.level),
            });
        };

        obj::load_obj(path).with_context(|| format!("failed to load {}", path.display()))
    }

    fn settings(&self, mesh: &Mesh) -> RenderSettings {
        let mode = match self.mode {
            Some(Mode::Points) => RenderMode::Points,
            Some(Mode::Wireframe) => RenderMode::Wireframe,
            None if mesh.faces().is_empty() => RenderMode::Points,
            None => RenderMode::Wireframe,
        };
        let color = match mode {
            RenderMode::Points => sr3d_core::raster::YELLOW,
            RenderMode::Wireframe => sr3d_core::raster::GREEN,
        };

        RenderSettings {
            mode,
            orbit_radius: self.orbit,
            pulse: self.pulse,
            grid_spacing: self.grid_spacing,
            color,
            ..Default::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mesh = cli.load_mesh()?;
    let settings = cli.settings(&mesh);
    log::info!(
        "{} vertices, {} faces, {:?} mode",
        mesh.vertices().len(),
        mesh.faces().len(),
        settings.mode
    );

    let display = TerminalDisplay::create().context("failed to set up the terminal display")?;
    let fov_factor = cli
        .fov_factor
        .unwrap_or_else(|| Camera::for_viewport(display.width()).fov_factor);
    let scene = Scene::new(mesh, Camera::new(cli.camera_z, fov_factor), settings);

    let mut app = App::new(display, scene, cli.fps);
    let frames = app.run()?;
    // Leave the alternate screen before printing
    drop(app);

    println!("Rendered {} frames", frames);
    Ok(())
}
