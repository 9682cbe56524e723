//! Raw game frames.
use crate::error::SerpentError;
use anyhow::Result;

/// An RGB frame of the game, `height x width x 3` bytes in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Frame {
    /// Creates a black frame.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }

    /// Wraps raw RGB bytes, checking that the length matches the size.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != width * height * 3 {
            return Err(SerpentError::Configuration(format!(
                "frame of {}x{} needs {} bytes, got {}",
                width,
                height,
                width * height * 3,
                data.len()
            ))
            .into());
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the colour at the given pixel.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Paints every pixel with the given colour.
    pub fn fill(&mut self, color: [u8; 3]) {
        self.data
            .chunks_exact_mut(3)
            .for_each(|px| px.copy_from_slice(&color));
    }

    /// Paints an axis-aligned rectangle, clipped to the frame.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: [u8; 3]) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for yy in y.min(y_end)..y_end {
            let row = yy * self.width * 3;
            for xx in x.min(x_end)..x_end {
                let i = row + xx * 3;
                self.data[i..i + 3].copy_from_slice(&color);
            }
        }
    }
}
