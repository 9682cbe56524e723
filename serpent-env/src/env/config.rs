//! Configuration of [`SnakeEnv`](super::SnakeEnv).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`SnakeEnv`](super::SnakeEnv).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct SnakeEnvConfig {
    /// Width of the frame in pixels.
    pub window_x: usize,

    /// Height of the frame in pixels.
    pub window_y: usize,

    /// Side length of a cell in pixels.
    pub unit_size: usize,

    /// Colour of empty cells.
    pub background_color: [u8; 3],

    /// Colour of the fruit.
    pub apple_color: [u8; 3],

    /// Colour of the snake except its head.
    pub snake_body_color: [u8; 3],

    /// Colour of the head of the snake.
    pub snake_head_color: [u8; 3],
}

impl Default for SnakeEnvConfig {
    fn default() -> Self {
        Self {
            window_x: 240,
            window_y: 240,
            unit_size: 20,
            background_color: [0, 0, 0],
            apple_color: [255, 0, 0],
            snake_body_color: [85, 255, 0],
            snake_head_color: [170, 0, 200],
        }
    }
}

impl SnakeEnvConfig {
    /// Sets the size of the frame.
    pub fn window(mut self, window_x: usize, window_y: usize) -> Self {
        self.window_x = window_x;
        self.window_y = window_y;
        self
    }

    /// Sets the side length of a cell.
    pub fn unit_size(mut self, v: usize) -> Self {
        self.unit_size = v;
        self
    }

    /// Sets the background colour.
    pub fn background_color(mut self, v: [u8; 3]) -> Self {
        self.background_color = v;
        self
    }

    /// Sets the colour of the fruit.
    pub fn apple_color(mut self, v: [u8; 3]) -> Self {
        self.apple_color = v;
        self
    }

    /// Sets the colour of the body.
    pub fn snake_body_color(mut self, v: [u8; 3]) -> Self {
        self.snake_body_color = v;
        self
    }

    /// Sets the colour of the head.
    pub fn snake_head_color(mut self, v: [u8; 3]) -> Self {
        self.snake_head_color = v;
        self
    }

    /// Constructs [`SnakeEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`SnakeEnvConfig`] as a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
