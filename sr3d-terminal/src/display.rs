/// Terminal display: two pixel rows per character cell using the
/// upper half block glyph in 24-bit color
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal,
};
use std::io::{stdout, Stdout, Write};
use std::time::Duration;
use sr3d_core::raster::{self, ColorBuffer};
use sr3d_core::{Display, DisplayEvents, Result};

const UPPER_HALF_BLOCK: char = '\u{2580}';

pub struct TerminalDisplay {
    out: Stdout,
    columns: u16,
    rows: u16,
    buffer: ColorBuffer,
    status: String,
    active: bool,
}

impl TerminalDisplay {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor.
    /// The terminal is restored when the display is dropped.
    pub fn create() -> Result<Self> {
        let (columns, rows) = terminal::size()?;

        terminal::enable_raw_mode()?;
        let mut out = stdout();
        if let Err(err) = execute!(out, terminal::EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(err.into());
        }

        let mut display = Self {
            out,
            columns,
            rows,
            buffer: ColorBuffer::new(0, 0),
            status: String::new(),
            active: true,
        };
        display.setup_drawing_buffer();
        log::debug!(
            "terminal display {}x{} cells, {}x{} pixels",
            columns,
            rows,
            display.width(),
            display.height()
        );
        Ok(display)
    }

    fn restore(&mut self) -> std::io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(self.out, ResetColor, terminal::LeaveAlternateScreen, cursor::Show)?;
        terminal::disable_raw_mode()
    }
}

fn to_color(argb: u32) -> Color {
    let (r, g, b) = raster::rgb(argb);
    Color::Rgb { r, g, b }
}

impl Display for TerminalDisplay {
    fn width(&self) -> usize {
        self.columns as usize
    }

    fn height(&self) -> usize {
        self.rows as usize * 2
    }

    fn setup_drawing_buffer(&mut self) {
        self.buffer = ColorBuffer::new(self.width(), self.height());
    }

    fn color_buffer_mut(&mut self) -> &mut ColorBuffer {
        &mut self.buffer
    }

    fn present(&mut self) -> Result<()> {
        let mut colors: Option<(u32, u32)> = None;

        for row in 0..self.rows {
            queue!(self.out, cursor::MoveTo(0, row))?;
            let y = row as usize * 2;
            for x in 0..self.width() {
                let top = self.buffer.pixel(x, y).unwrap_or(raster::BLACK);
                let bottom = self.buffer.pixel(x, y + 1).unwrap_or(raster::BLACK);

                // Only emit escape sequences when the cell colors change
                if colors != Some((top, bottom)) {
                    queue!(
                        self.out,
                        SetForegroundColor(to_color(top)),
                        SetBackgroundColor(to_color(bottom))
                    )?;
                    colors = Some((top, bottom));
                }
                queue!(self.out, Print(UPPER_HALF_BLOCK))?;
            }
        }

        if !self.status.is_empty() {
            let status: String = self.status.chars().take(self.width()).collect();
            queue!(
                self.out,
                cursor::MoveTo(0, 0),
                SetForegroundColor(Color::Yellow),
                SetBackgroundColor(Color::Black),
                Print(status),
                ResetColor
            )?;
        }

        self.out.flush()?;
        Ok(())
    }

    fn poll_events(&mut self) -> Result<DisplayEvents> {
        let mut events = DisplayEvents::default();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind: KeyEventKind::Press,
                    ..
                }) => match code {
                    KeyCode::Char('q') | KeyCode::Esc => events.quit_requested = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        events.quit_requested = true
                    }
                    _ => {}
                },
                Event::Resize(columns, rows) => {
                    self.columns = columns;
                    self.rows = rows;
                    self.setup_drawing_buffer();
                    events.resized = true;
                    log::debug!("terminal resized to {}x{} cells", columns, rows);
                }
                _ => {}
            }
        }

        Ok(events)
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            log::error!("failed to restore the terminal: {}", err);
        }
    }
}
