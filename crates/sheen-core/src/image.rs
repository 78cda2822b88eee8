use std::fmt;

use crate::math::UVec2;

/// A CPU-side pixel buffer, rows top to bottom without padding.
#[derive(Clone, PartialEq)]
pub struct ImageData {
    pub format: ImageFormat,
    pub size: UVec2,
    pub data: Vec<u8>,
}

impl ImageData {
    /// Creates a zero-filled image.
    pub fn new(format: ImageFormat, size: UVec2) -> ImageData {
        let len = (size.x as usize) * (size.y as usize) * format.bytes_per_pixel();
        ImageData {
            format,
            size,
            data: vec![0; len],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size.x == 0 || self.size.y == 0
    }

    /// Returns the bytes of the pixel at `(x, y)`, if it is inside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.size.x || y >= self.size.y {
            return None;
        }

        let bpp = self.format.bytes_per_pixel();
        let start = ((y as usize) * (self.size.x as usize) + x as usize) * bpp;
        self.data.get(start..start + bpp)
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageData")
            .field("format", &self.format)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ImageFormat {
    /// 8-bit RGBA with premultiplied alpha.
    Rgba8,
    /// 8-bit coverage.
    Gray8,
}

impl ImageFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            ImageFormat::Rgba8 => 4,
            ImageFormat::Gray8 => 1,
        }
    }
}
