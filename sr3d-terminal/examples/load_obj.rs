/// Example: Load and render an OBJ file in the terminal
///
/// Usage: cargo run --example load_obj -- path/to/file.obj

use std::env;
use std::io;
use sr3d_core::{obj, Camera, Display, Mesh, RenderSettings, Scene};
use sr3d_terminal::{App, TerminalDisplay};

fn run(mesh: Mesh) -> sr3d_core::Result<()> {
    let display = TerminalDisplay::create()?;
    let camera = Camera::for_viewport(display.width());
    let mut app = App::new(display, Scene::new(mesh, camera, RenderSettings::default()), 60);
    app.run()?;
    Ok(())
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mesh = if args.len() < 2 {
        eprintln!("Usage: {} <obj-file>", args[0]);
        eprintln!("\nNo OBJ file provided, using a sphere...");
        Mesh::sphere(12)
    } else {
        let obj_path = &args[1];
        println!("Loading OBJ file: {}", obj_path);

        obj::load_obj(obj_path)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Failed to load OBJ: {}", e)))?
    };

    println!("Loaded {} faces", mesh.faces().len());
    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    run(mesh).map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}
