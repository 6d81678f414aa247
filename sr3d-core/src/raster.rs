/// Software rasterizer writing packed ARGB8888 pixels
pub const GRID_COLOR: u32 = 0xFF44_4444;
pub const BLACK: u32 = 0xFF00_0000;
pub const YELLOW: u32 = 0xFFFF_FF00;
pub const GREEN: u32 = 0xFF00_FF00;

/// Split a packed ARGB8888 color into its red, green and blue channels
pub fn rgb(color: u32) -> (u8, u8, u8) {
    ((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

/// Row-major pixel storage, `width * height` packed colors.
///
/// Every draw call clips per pixel: writes outside the buffer are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl ColorBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn draw_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Mark every row and column that is a multiple of `spacing`
    pub fn draw_grid(&mut self, spacing: usize) {
        if spacing == 0 {
            return;
        }
        for y in 0..self.height {
            for x in 0..self.width {
                if y % spacing == 0 || x % spacing == 0 {
                    self.pixels[y * self.width + x] = GRID_COLOR;
                }
            }
        }
    }

    pub fn draw_rectangle(&mut self, x: i32, y: i32, width: i32, height: i32, color: u32) {
        for py in y..y.saturating_add(height) {
            for px in x..x.saturating_add(width) {
                self.draw_pixel(px, py, color);
            }
        }
    }

    /// DDA line: `max(|dx|, |dy|) + 1` samples, each rounded to the nearest pixel
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let dx = x1 as f64 - x0 as f64;
        let dy = y1 as f64 - y0 as f64;
        let side_length = dx.abs().max(dy.abs());

        if side_length == 0.0 {
            self.draw_pixel(x0, y0, color);
            return;
        }

        let x_inc = dx / side_length;
        let y_inc = dy / side_length;
        let (x_start, y_start) = (x0 as f64, y0 as f64);

        // Only walk the steps whose samples can land inside the buffer
        let Some((first, last)) = clip_steps(
            (x_start, x_inc, self.width),
            (y_start, y_inc, self.height),
            side_length,
        ) else {
            return;
        };

        for step in first..=last {
            let t = step as f64;
            let x = x_start + t * x_inc;
            let y = y_start + t * y_inc;
            self.draw_pixel(x.round() as i32, y.round() as i32, color);
        }
    }

    /// Wireframe triangle: the three edges, no fill
    #[allow(clippy::too_many_arguments)]
    pub fn draw_triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: u32,
    ) {
        self.draw_line(x0, y0, x1, y1, color);
        self.draw_line(x1, y1, x2, y2, color);
        self.draw_line(x2, y2, x0, y0, color);
    }
}

/// Liang-Barsky clip of the step range `[0, last_step]` of a line sampled at
/// `start + step * inc` on both axes.
///
/// A sample is visible when it rounds into `[0, extent)`, i.e. lies in
/// `(-0.5, extent - 0.5)`. The range is widened by one step on each side so
/// float error never drops an edge pixel; `draw_pixel` clips the extra samples.
fn clip_steps(x: (f64, f64, usize), y: (f64, f64, usize), last_step: f64) -> Option<(u64, u64)> {
    let mut low = 0.0_f64;
    let mut high = last_step;

    for (start, inc, extent) in [x, y] {
        let min = -0.5;
        let max = extent as f64 - 0.5;
        if inc == 0.0 {
            if start <= min || start >= max {
                return None;
            }
            continue;
        }

        let (a, b) = ((min - start) / inc, (max - start) / inc);
        let (enter, exit) = if inc > 0.0 { (a, b) } else { (b, a) };
        low = low.max(enter.floor() - 1.0);
        high = high.min(exit.ceil() + 1.0);
    }

    let low = low.max(0.0);
    if low > high {
        return None;
    }
    Some((low as u64, high as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: u32 = 0xFFFF_0000;

    fn lit(buffer: &ColorBuffer, color: u32) -> Vec<(usize, usize)> {
        let mut points = Vec::new();
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                if buffer.pixel(x, y) == Some(color) {
                    points.push((x, y));
                }
            }
        }
        points
    }

    #[test]
    fn test_rgb() {
        assert_eq!(rgb(0xFF12_3456), (0x12, 0x34, 0x56));
        assert_eq!(rgb(GRID_COLOR), (0x44, 0x44, 0x44));
    }

    #[test]
    fn test_draw_pixel_out_of_range_is_noop() {
        let mut buffer = ColorBuffer::new(4, 3);
        buffer.draw_pixel(4, 0, RED);
        buffer.draw_pixel(0, 3, RED);
        buffer.draw_pixel(-1, 1, RED);
        buffer.draw_pixel(1, -1, RED);
        buffer.draw_pixel(i32::MAX, i32::MAX, RED);
        // x == width must not wrap onto the next row
        assert!(buffer.pixels().iter().all(|&p| p == 0));

        buffer.draw_pixel(3, 0, RED);
        assert_eq!(lit(&buffer, RED), vec![(3, 0)]);
    }

    #[test]
    fn test_clear() {
        let mut buffer = ColorBuffer::new(5, 5);
        buffer.clear(BLACK);
        assert!(buffer.pixels().iter().all(|&p| p == BLACK));
        assert_eq!(buffer.pixels().len(), 25);
    }

    #[test]
    fn test_grid() {
        let mut buffer = ColorBuffer::new(12, 12);
        buffer.draw_grid(5);
        assert_eq!(buffer.pixel(0, 7), Some(GRID_COLOR));
        assert_eq!(buffer.pixel(5, 3), Some(GRID_COLOR));
        assert_eq!(buffer.pixel(3, 10), Some(GRID_COLOR));
        assert_eq!(buffer.pixel(3, 4), Some(0));
        assert_eq!(buffer.pixel(11, 11), Some(0));

        let mut untouched = ColorBuffer::new(3, 3);
        untouched.draw_grid(0);
        assert!(untouched.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_rectangle_clips() {
        let mut buffer = ColorBuffer::new(6, 6);
        buffer.draw_rectangle(4, 4, 4, 4, RED);
        assert_eq!(lit(&buffer, RED), vec![(4, 4), (5, 4), (4, 5), (5, 5)]);

        buffer.draw_rectangle(-3, -3, 4, 4, YELLOW);
        assert_eq!(lit(&buffer, YELLOW), vec![(0, 0)]);
    }

    #[test]
    fn test_horizontal_line() {
        let mut buffer = ColorBuffer::new(8, 2);
        buffer.draw_line(0, 0, 4, 0, RED);
        assert_eq!(
            lit(&buffer, RED),
            vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]
        );
    }

    #[test]
    fn test_line_is_symmetric_in_sample_count() {
        let mut forward = ColorBuffer::new(10, 10);
        forward.draw_line(1, 1, 7, 4, RED);
        assert_eq!(lit(&forward, RED).len(), 7);

        let mut steep = ColorBuffer::new(10, 10);
        steep.draw_line(2, 9, 0, 0, RED);
        let points = lit(&steep, RED);
        assert_eq!(points.len(), 10);
        assert!(points.contains(&(0, 0)));
        assert!(points.contains(&(2, 9)));
    }

    #[test]
    fn test_zero_length_line() {
        let mut buffer = ColorBuffer::new(4, 4);
        buffer.draw_line(2, 3, 2, 3, RED);
        assert_eq!(lit(&buffer, RED), vec![(2, 3)]);
    }

    #[test]
    fn test_line_partly_off_buffer() {
        let mut buffer = ColorBuffer::new(4, 4);
        buffer.draw_line(-2, 1, 5, 1, RED);
        assert_eq!(lit(&buffer, RED), vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn test_huge_line_only_walks_visible_span() {
        let mut buffer = ColorBuffer::new(80, 48);
        let start = std::time::Instant::now();
        buffer.draw_line(-1_000_000_000, 10, 1_000_000_000, 20, RED);
        assert!(start.elapsed() < std::time::Duration::from_secs(1));

        let expected: Vec<_> = (0..80).map(|x| (x, 15)).collect();
        assert_eq!(lit(&buffer, RED), expected);
    }

    #[test]
    fn test_line_entirely_off_buffer() {
        let mut buffer = ColorBuffer::new(16, 16);
        buffer.draw_line(i32::MIN, -5, i32::MAX, -5, RED);
        buffer.draw_line(-100, -100, -10, i32::MAX, RED);
        assert!(buffer.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_clipped_line_matches_unclipped_samples() {
        // Diagonal crossing the buffer from far outside on both ends
        let mut buffer = ColorBuffer::new(10, 10);
        buffer.draw_line(-20, -10, 40, 20, RED);
        let points = lit(&buffer, RED);
        assert!(!points.is_empty());
        for (x, y) in points {
            // Samples follow y = (x + 20) / 2 - 10, rounded half away from zero
            let expected = ((x as f64 + 20.0) / 2.0 - 10.0).round() as usize;
            assert_eq!(y, expected);
        }
        assert_eq!(buffer.pixel(0, 0), Some(RED));
        assert_eq!(buffer.pixel(9, 5), Some(RED));
    }

    #[test]
    fn test_triangle_outline() {
        let mut buffer = ColorBuffer::new(8, 8);
        buffer.draw_triangle(0, 0, 6, 0, 0, 6, RED);

        for i in 0..=6 {
            assert_eq!(buffer.pixel(i, 0), Some(RED));
            assert_eq!(buffer.pixel(0, i), Some(RED));
            assert_eq!(buffer.pixel(6 - i, i), Some(RED));
        }
        // Interior stays empty
        assert_eq!(buffer.pixel(2, 2), Some(0));
    }
}
