//! Configuration of [`GameLoop`](super::GameLoop).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`GameLoop`](super::GameLoop).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct GameLoopConfig {
    /// The loop stops once the episode counter exceeds this value.
    pub max_number_game: usize,

    /// Interval of writing episode records, in episodes.
    pub record_interval: usize,
}

impl Default for GameLoopConfig {
    fn default() -> Self {
        Self {
            max_number_game: 10_000_000,
            record_interval: 1,
        }
    }
}

impl GameLoopConfig {
    /// Sets the number of episodes to play.
    pub fn max_number_game(mut self, v: usize) -> Self {
        self.max_number_game = v;
        self
    }

    /// Sets the interval of writing episode records.
    pub fn record_interval(mut self, v: usize) -> Self {
        self.record_interval = v;
        self
    }

    /// Constructs [`GameLoopConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`GameLoopConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
