/// The presentation side of the renderer: something that owns a color
/// buffer, shows it, and reports user events.
use crate::error::Result;
use crate::raster::ColorBuffer;

/// What happened since the last poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayEvents {
    pub quit_requested: bool,
    /// The display was reconfigured and its color buffer recreated
    pub resized: bool,
}

pub trait Display {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// (Re)allocate the color buffer for the current dimensions
    fn setup_drawing_buffer(&mut self);

    fn color_buffer_mut(&mut self) -> &mut ColorBuffer;

    /// Push the current color buffer to the screen
    fn present(&mut self) -> Result<()>;

    fn poll_events(&mut self) -> Result<DisplayEvents>;

    /// A one line message shown over the frame, if the display can
    fn set_status(&mut self, _status: &str) {}
}

/// A headless display of fixed size that keeps every frame in memory
#[derive(Debug)]
pub struct MemoryDisplay {
    buffer: ColorBuffer,
    presented: usize,
    polls: usize,
    quit_after_polls: Option<usize>,
    resize_at_poll: Option<(usize, usize, usize)>,
    status: String,
}

impl MemoryDisplay {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            buffer: ColorBuffer::new(width, height),
            presented: 0,
            polls: 0,
            quit_after_polls: None,
            resize_at_poll: None,
            status: String::new(),
        }
    }

    /// Report a quit request on the `polls`-th call to `poll_events`
    pub fn quit_after(mut self, polls: usize) -> Self {
        self.quit_after_polls = Some(polls);
        self
    }

    /// Change size to `width` x `height` on the `poll`-th call to `poll_events`
    pub fn resize_at(mut self, poll: usize, width: usize, height: usize) -> Self {
        self.resize_at_poll = Some((poll, width, height));
        self
    }

    pub fn buffer(&self) -> &ColorBuffer {
        &self.buffer
    }

    /// Number of frames presented so far
    pub fn presented(&self) -> usize {
        self.presented
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

impl Display for MemoryDisplay {
    fn width(&self) -> usize {
        self.buffer.width()
    }

    fn height(&self) -> usize {
        self.buffer.height()
    }

    fn setup_drawing_buffer(&mut self) {
        self.buffer = ColorBuffer::new(self.buffer.width(), self.buffer.height());
    }

    fn color_buffer_mut(&mut self) -> &mut ColorBuffer {
        &mut self.buffer
    }

    fn present(&mut self) -> Result<()> {
        self.presented += 1;
        Ok(())
    }

    fn poll_events(&mut self) -> Result<DisplayEvents> {
        self.polls += 1;

        let mut resized = false;
        if let Some((poll, width, height)) = self.resize_at_poll {
            if poll == self.polls {
                self.buffer = ColorBuffer::new(width, height);
                resized = true;
            }
        }

        Ok(DisplayEvents {
            quit_requested: self.quit_after_polls.is_some_and(|limit| self.polls >= limit),
            resized,
        })
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}
