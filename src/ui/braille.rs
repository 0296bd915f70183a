/// Braille canvas for high-resolution terminal rendering
/// Each terminal cell contains a 2×4 grid of Braille dots
/// This gives us 2× horizontal and 4× vertical resolution
use super::surface::Rgb;

pub struct BrailleCanvas {
    width: usize,  // Width in terminal cells
    height: usize, // Height in terminal cells
    dots: Vec<Vec<u8>>, // Dot pattern per cell
    colors: Vec<Vec<Option<Rgb>>>, // Color of the last dot set in each cell
}

impl BrailleCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            dots: vec![vec![0; width]; height],
            colors: vec![vec![None; width]; height],
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.dots {
            row.fill(0);
        }
        for row in &mut self.colors {
            row.fill(None);
        }
    }

    /// Set a dot at pixel coordinates
    /// pixel_x: 0 to (width * 2 - 1)
    /// pixel_y: 0 to (height * 4 - 1)
    pub fn set_pixel(&mut self, pixel_x: usize, pixel_y: usize, color: Rgb) {
        let cell_x = pixel_x / 2;
        let cell_y = pixel_y / 4;

        if cell_x >= self.width || cell_y >= self.height {
            return;
        }

        // Braille dot numbering:
        // 1 4
        // 2 5
        // 3 6
        // 7 8
        let dot_index = match (pixel_x % 2, pixel_y % 4) {
            (0, 0) => 0,
            (0, 1) => 1,
            (0, 2) => 2,
            (0, 3) => 6,
            (1, 0) => 3,
            (1, 1) => 4,
            (1, 2) => 5,
            (1, 3) => 7,
            _ => unreachable!(),
        };

        self.dots[cell_y][cell_x] |= 1 << dot_index;
        self.colors[cell_y][cell_x] = Some(color);
    }

    /// Fill a rectangle with pixels
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, color: Rgb) {
        for py in y..(y + height) {
            for px in x..(x + width) {
                self.set_pixel(px, py, color);
            }
        }
    }

    /// Convert dot pattern to Braille character
    /// Braille Unicode: U+2800 + dot pattern
    pub fn to_char(&self, cell_x: usize, cell_y: usize) -> char {
        if cell_x >= self.width || cell_y >= self.height {
            return ' ';
        }

        let pattern = self.dots[cell_y][cell_x];
        if pattern == 0 {
            return ' ';
        }
        char::from_u32(0x2800 + pattern as u32).unwrap_or(' ')
    }

    pub fn color(&self, cell_x: usize, cell_y: usize) -> Option<Rgb> {
        self.colors
            .get(cell_y)
            .and_then(|row| row.get(cell_x))
            .copied()
            .flatten()
    }

    /// Width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get width in pixels (2 per cell)
    pub fn pixel_width(&self) -> usize {
        self.width * 2
    }

    /// Get height in pixels (4 per cell)
    pub fn pixel_height(&self) -> usize {
        self.height * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb = [255, 255, 255];

    #[test]
    fn test_braille_canvas() {
        let mut canvas = BrailleCanvas::new(2, 2);

        canvas.set_pixel(0, 0, WHITE);
        assert_eq!(canvas.to_char(0, 0), '⠁'); // dot 1
        assert_eq!(canvas.color(0, 0), Some(WHITE));

        canvas.clear();
        assert_eq!(canvas.to_char(0, 0), ' ');
        assert_eq!(canvas.color(0, 0), None);

        canvas.fill_rect(0, 0, 2, 4, WHITE);
        assert_eq!(canvas.to_char(0, 0), '⣿'); // all eight dots
        assert_eq!(canvas.to_char(1, 0), ' ');
    }

    #[test]
    fn test_out_of_bounds_pixels_are_dropped() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set_pixel(2, 0, WHITE);
        canvas.set_pixel(0, 4, WHITE);
        assert_eq!(canvas.to_char(0, 0), ' ');
        assert_eq!(canvas.pixel_width(), 2);
        assert_eq!(canvas.pixel_height(), 4);
    }
}
