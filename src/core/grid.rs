use crate::core::common::{clamp, Float};

/// Working-resolution RGB grid. Pixels live in one flat row-major
/// buffer indexed `row * width + col`; the working resolution is
/// independent of the source image's native resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbGrid {
    pixels: Vec<[Float; 3]>,
    width : usize,
    height: usize
}

impl RgbGrid {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0);

        Self {
            pixels: vec![[0.0; 3]; width * height],
            width,
            height
        }
    }

    pub fn from_pixels(pixels: Vec<[Float; 3]>, width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0);
        assert_eq!(pixels.len(), width * height);

        Self { pixels, width, height }
    }

    /// Nearest-neighbor resample from a source pixel buffer of
    /// resolution `src_width x src_height` onto a `width x height`
    /// working grid. Cell `(row, col)` takes the color at source pixel
    /// `(round(col * src_width / width), round(row * src_height / height))`,
    /// clamped to the source bounds so rounding at the upper edge
    /// cannot index past the last pixel. No filtering; small bright
    /// features can alias away when downsampling.
    pub fn resample(
        src: &[[Float; 3]], src_width: usize, src_height: usize,
        width: usize, height: usize) -> Self {
        assert_eq!(src.len(), src_width * src_height);

        let mut grid = RgbGrid::new(width, height);

        for row in 0..height {
            let sy = clamp(
                (row as Float * src_height as Float / height as Float).round() as usize,
                0, src_height - 1);

            for col in 0..width {
                let sx = clamp(
                    (col as Float * src_width as Float / width as Float).round() as usize,
                    0, src_width - 1);

                grid.pixels[row * width + col] = src[sy * src_width + sx];
            }
        }

        grid
    }

    pub fn width(&self) -> usize { self.width }

    pub fn height(&self) -> usize { self.height }

    pub fn pixel(&self, row: usize, col: usize) -> [Float; 3] {
        assert!(row < self.height && col < self.width);

        self.pixels[row * self.width + col]
    }

    pub fn set_pixel(&mut self, row: usize, col: usize, rgb: [Float; 3]) {
        assert!(row < self.height && col < self.width);

        self.pixels[row * self.width + col] = rgb;
    }
}
