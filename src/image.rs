use std::slice::ChunksExact;

use crate::color::Pixel;
use crate::error::Error;

pub mod reader;
pub mod writer;

pub trait ImageReader {
    fn read_image(&mut self) -> crate::Result<PixelBuffer>;
}

pub trait ImageWriter {
    fn write_image(&mut self) -> crate::Result<()>;
}

/// A rectangular grid of pixels, stored row by row.
///
/// `x` addresses the column in `[0, width)`, `y` the row in `[0, height)`.
/// Both dimensions are at least one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// Creates a solid white buffer.
    pub fn new(height: usize, width: usize) -> crate::Result<Self> {
        Self::filled(height, width, Pixel::WHITE)
    }

    pub fn filled(height: usize, width: usize, pixel: Pixel) -> crate::Result<Self> {
        let size = checked_size(height, width)?;
        Ok(Self {
            width,
            height,
            pixels: vec![pixel; size],
        })
    }

    /// Copies a grid of rows, as produced by an image codec.
    pub fn from_grid(grid: &[Vec<Pixel>]) -> crate::Result<Self> {
        let width = grid.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(Error::EmptyImage);
        }
        if let Some(row) = grid.iter().position(|row| row.len() != width) {
            return Err(Error::NonRectangular(row));
        }
        Ok(Self {
            width,
            height: grid.len(),
            pixels: grid.concat(),
        })
    }

    pub(crate) fn from_pixels(
        height: usize,
        width: usize,
        pixels: Vec<Pixel>,
    ) -> crate::Result<Self> {
        if pixels.len() != checked_size(height, width)? {
            return Err(Error::MismatchOfSizeBetweenHeaderAndValues);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> crate::Result<Pixel> {
        let index = self.index_of(x, y)?;
        Ok(self.pixels[index])
    }

    pub fn set(&mut self, x: usize, y: usize, pixel: Pixel) -> crate::Result<()> {
        let index = self.index_of(x, y)?;
        self.pixels[index] = pixel;
        Ok(())
    }

    /// Read only view on the rows, top to bottom.
    pub fn rows(&self) -> ChunksExact<'_, Pixel> {
        self.pixels.chunks_exact(self.width)
    }

    pub fn to_grid(&self) -> Vec<Vec<Pixel>> {
        self.rows().map(<[Pixel]>::to_vec).collect()
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    pub(crate) fn row(&self, y: usize) -> &[Pixel] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [Pixel] {
        let start = y * self.width;
        &mut self.pixels[start..start + self.width]
    }

    /// Unchecked access for scans that stay within the dimensions.
    pub(crate) fn dot(&self, x: usize, y: usize) -> Pixel {
        self.pixels[x + y * self.width]
    }

    pub(crate) fn dot_mut(&mut self, x: usize, y: usize) -> &mut Pixel {
        &mut self.pixels[x + y * self.width]
    }

    pub(crate) fn check_bounds(&self, x: usize, y: usize) -> crate::Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    fn index_of(&self, x: usize, y: usize) -> crate::Result<usize> {
        self.check_bounds(x, y)?;
        Ok(x + y * self.width)
    }
}

/// Number of pixels of a `height` x `width` image, if such an image can exist.
fn checked_size(height: usize, width: usize) -> crate::Result<usize> {
    match height.checked_mul(width) {
        Some(size) if size > 0 => Ok(size),
        _ => Err(Error::InvalidDimensions(height, width)),
    }
}
