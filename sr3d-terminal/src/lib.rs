/// Frame loop driving a scene through any display
use std::time::{Duration, Instant};
use sr3d_core::{Display, Result, Scene};

pub mod display;

pub use display::TerminalDisplay;

/// Main application struct: owns the display and the render session
pub struct App<D: Display> {
    display: D,
    scene: Scene,
    target_frame_time: Duration,
    running: bool,
    frames: u64,
    last_sample: Instant,
    frames_since_sample: u32,
    fps: f32,
    /// Width the camera's focal factor was last fitted to
    viewport_width: usize,
}

impl<D: Display> App<D> {
    pub fn new(display: D, scene: Scene, fps: u32) -> Self {
        let viewport_width = display.width();
        Self {
            display,
            scene,
            target_frame_time: Duration::from_secs(1) / fps.max(1),
            running: true,
            frames: 0,
            last_sample: Instant::now(),
            frames_since_sample: 0,
            fps: 0.0,
            viewport_width,
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run until the display reports a quit request
    pub fn run(&mut self) -> Result<u64> {
        self.display.setup_drawing_buffer();
        self.update_status();

        while self.running {
            let frame_start = Instant::now();

            self.handle_input()?;
            if !self.running {
                break;
            }

            self.update();
            self.render()?;
            self.frames += 1;

            // Frame timing
            let elapsed = frame_start.elapsed();
            if elapsed < self.target_frame_time {
                std::thread::sleep(self.target_frame_time - elapsed);
            }

            self.sample_fps();
        }

        log::info!("stopped after {} frames", self.frames);
        Ok(self.frames)
    }

    fn handle_input(&mut self) -> Result<()> {
        let events = self.display.poll_events()?;
        if events.quit_requested {
            self.running = false;
        }
        if events.resized {
            self.fit_camera();
        }
        Ok(())
    }

    /// Rescale the focal factor so the mesh keeps its size relative to the
    /// new viewport width
    fn fit_camera(&mut self) {
        let width = self.display.width();
        if width == 0 || width == self.viewport_width {
            return;
        }
        if self.viewport_width == 0 {
            self.viewport_width = width;
            return;
        }

        let mut camera = *self.scene.camera();
        camera.fov_factor *= width as f64 / self.viewport_width as f64;
        log::debug!(
            "viewport {} -> {} px wide, focal factor now {:.1}",
            self.viewport_width,
            width,
            camera.fov_factor
        );
        self.scene.set_camera(camera);
        self.viewport_width = width;
    }

    fn update(&mut self) {
        let (width, height) = (self.display.width(), self.display.height());
        self.scene.update(width, height);
    }

    fn render(&mut self) -> Result<()> {
        self.scene.render(self.display.color_buffer_mut());
        self.display.present()
    }

    fn sample_fps(&mut self) {
        self.frames_since_sample += 1;
        let now = Instant::now();
        let elapsed = now - self.last_sample;
        if elapsed.as_secs() >= 1 {
            self.fps = self.frames_since_sample as f32 / elapsed.as_secs_f32();
            self.frames_since_sample = 0;
            self.last_sample = now;
            log::debug!("{:.1} fps", self.fps);
            self.update_status();
        }
    }

    fn update_status(&mut self) {
        let status = format!(
            "sr3d | FPS: {:.1} | faces: {} | Q/Esc=Quit",
            self.fps,
            self.scene.mesh().faces().len()
        );
        self.display.set_status(&status);
    }
}
