//! Conversion of raw frames into observations for value estimators.
use crate::{error::SerpentError, Frame};
use anyhow::Result;
use image::{
    imageops::{resize, FilterType::Nearest},
    ImageBuffer, Rgb,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Configuration of [`FrameEncoder`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct FrameEncoderConfig {
    /// Side length of the square observation.
    pub size: usize,
}

impl Default for FrameEncoderConfig {
    fn default() -> Self {
        Self { size: 12 }
    }
}

impl FrameEncoderConfig {
    /// Sets the side length of the observation.
    pub fn size(mut self, v: usize) -> Self {
        self.size = v;
        self
    }
}

/// A `1 x size x size` single-channel observation with values in `[0, 1]`.
///
/// The samples are shared, so cloning an observation is cheap; the same
/// encoded frame is stored as `next_state` of one transition and `state`
/// of the following one.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    size: usize,
    data: Arc<[f32]>,
}

impl Observation {
    /// Wraps row-major samples of a `size x size` grid.
    pub fn new(size: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != size * size {
            return Err(SerpentError::Configuration(format!(
                "observation of size {} needs {} samples, got {}",
                size,
                size * size,
                data.len()
            ))
            .into());
        }
        Ok(Self {
            size,
            data: data.into(),
        })
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Shape as `[channels, height, width]`.
    pub fn shape(&self) -> [usize; 3] {
        [1, self.size, self.size]
    }

    /// Row-major samples.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Sample at the given row and column.
    pub fn get(&self, y: usize, x: usize) -> f32 {
        self.data[y * self.size + x]
    }
}

/// Converts a raw RGB frame into an [`Observation`].
///
/// The colour channels are reordered (RGB to BGR), the frame is resized
/// to `size x size` with nearest-neighbour sampling, the last channel is
/// kept and divided by 255. There are no learned parameters and the input
/// frame is left untouched.
#[derive(Debug, Clone)]
pub struct FrameEncoder {
    size: usize,
}

impl FrameEncoder {
    /// Constructs the encoder.
    pub fn build(config: &FrameEncoderConfig) -> Result<Self> {
        if config.size == 0 {
            return Err(SerpentError::Configuration("size of observation must be positive".into()).into());
        }
        Ok(Self { size: config.size })
    }

    /// Side length of the produced observations.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Encodes a frame.
    pub fn encode(&self, frame: &Frame) -> Result<Observation> {
        let bgr = frame
            .as_bytes()
            .chunks_exact(3)
            .flat_map(|px| [px[2], px[1], px[0]])
            .collect::<Vec<_>>();
        let img = ImageBuffer::<Rgb<u8>, _>::from_raw(frame.width() as _, frame.height() as _, bgr)
            .ok_or_else(|| SerpentError::Configuration("frame buffer is too small".into()))?;
        let img = resize(&img, self.size as _, self.size as _, Nearest);
        let data = img.pixels().map(|px| px.0[2] as f32 / 255.0).collect();

        Observation::new(self.size, data)
    }
}
