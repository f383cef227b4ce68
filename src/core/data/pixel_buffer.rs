use crate::core::data::colour::Colour;
use crate::core::data::point::Point;
use std::sync::atomic::{AtomicU32, Ordering};

pub const BYTES_PER_PIXEL: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PixelBufferError {
    #[error("pixel buffer size must be positive: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("pixel at x:{}, y:{} outside of {width}x{height} buffer", .pixel.x, .pixel.y)]
    PixelOutsideBounds { pixel: Point, width: u32, height: u32 },
}

/// Row-major RGBA pixel grid with fixed dimensions.
///
/// Each pixel is one packed `AtomicU32`, so row tasks can write disjoint rows
/// through a shared reference while the render loop copies out a partially
/// generated frame.
#[derive(Debug)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Box<[AtomicU32]>,
}

impl PixelBuffer {
    /// Allocates a buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Result<Self, PixelBufferError> {
        if width == 0 || height == 0 {
            return Err(PixelBufferError::InvalidDimensions { width, height });
        }

        let pixels = (0..width as usize * height as usize)
            .map(|_| AtomicU32::new(0))
            .collect();

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Length in bytes of the RGBA copy produced by [`Self::to_rgba_bytes`].
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.pixels.len() * BYTES_PER_PIXEL
    }

    pub fn pixel(&self, pixel: Point) -> Result<Colour, PixelBufferError> {
        let index = self.index_of(pixel)?;
        Ok(Colour::from_packed(self.pixels[index].load(Ordering::Relaxed)))
    }

    pub fn set_pixel(&self, pixel: Point, colour: Colour) -> Result<(), PixelBufferError> {
        let index = self.index_of(pixel)?;
        self.pixels[index].store(colour.to_packed(), Ordering::Relaxed);
        Ok(())
    }

    /// All rows in order; each chunk is exactly `width` pixels.
    pub(crate) fn rows(&self) -> std::slice::ChunksExact<'_, AtomicU32> {
        self.pixels.chunks_exact(self.width as usize)
    }

    pub(crate) fn pixels(&self) -> &[AtomicU32] {
        &self.pixels
    }

    /// Copies the current contents as tightly packed RGBA bytes, ready for a
    /// texture upload.
    #[must_use]
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_len());

        for pixel in self.pixels.iter() {
            bytes.extend_from_slice(&pixel.load(Ordering::Relaxed).to_le_bytes());
        }

        bytes
    }

    pub fn clear(&self) {
        for pixel in self.pixels.iter() {
            pixel.store(0, Ordering::Relaxed);
        }
    }

    fn index_of(&self, pixel: Point) -> Result<usize, PixelBufferError> {
        if pixel.x >= self.width || pixel.y >= self.height {
            return Err(PixelBufferError::PixelOutsideBounds {
                pixel,
                width: self.width,
                height: self.height,
            });
        }

        Ok(pixel.y as usize * self.width as usize + pixel.x as usize)
    }
}

/// Writes one colour into a row slot handed out by [`PixelBuffer::rows`].
#[inline]
pub(crate) fn store_pixel(slot: &AtomicU32, colour: Colour) {
    slot.store(colour.to_packed(), Ordering::Relaxed);
}
