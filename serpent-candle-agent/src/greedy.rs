//! Agent playing a trained network.
use crate::{
    cnn::CnnConfig,
    estimator::{NetworkShape, ValueEstimator, ValueEstimatorConfig},
    Device,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serpent_core::{Direction, FrameEncoder, FrameEncoderConfig, GameSnapshot, Policy};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`GreedyAgent`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct GreedyAgentConfig {
    /// Shape of the network stored in the checkpoint.
    pub shape: NetworkShape,

    /// Side length of the observations the network was trained on.
    pub size_resize: usize,

    /// Checkpoint name, without the `.safetensors` suffix.
    pub model_path: String,

    /// Device of the network.
    pub device: Device,
}

impl Default for GreedyAgentConfig {
    fn default() -> Self {
        Self {
            shape: NetworkShape::Dueling,
            size_resize: 12,
            model_path: "models/model1".to_string(),
            device: Device::Cpu,
        }
    }
}

impl GreedyAgentConfig {
    /// Sets the shape of the network.
    pub fn shape(mut self, v: NetworkShape) -> Self {
        self.shape = v;
        self
    }

    /// Sets the side length of the observations.
    pub fn size_resize(mut self, v: usize) -> Self {
        self.size_resize = v;
        self
    }

    /// Sets the checkpoint name.
    pub fn model_path(mut self, v: impl Into<String>) -> Self {
        self.model_path = v.into();
        self
    }

    /// Sets the device.
    pub fn device(mut self, v: Device) -> Self {
        self.device = v;
        self
    }

    /// Constructs [`GreedyAgentConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`GreedyAgentConfig`] as a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

/// Always takes the direction with the largest value.
///
/// No exploration and no learning.
pub struct GreedyAgent {
    encoder: FrameEncoder,
    estimator: ValueEstimator,
}

impl GreedyAgent {
    /// Builds the network of the configured shape and loads the checkpoint into it.
    ///
    /// A checkpoint of another shape is a
    /// [`SerpentError::Configuration`](serpent_core::error::SerpentError::Configuration) error.
    pub fn build(config: &GreedyAgentConfig) -> Result<Self> {
        let estimator_config = ValueEstimatorConfig::default()
            .shape(config.shape)
            .cnn_config(CnnConfig::default().size_resize(config.size_resize));
        let mut estimator = ValueEstimator::build(estimator_config, config.device.try_into()?)?;
        estimator.load(&config.model_path)?;

        Ok(Self {
            encoder: FrameEncoder::build(&FrameEncoderConfig::default().size(config.size_resize))?,
            estimator,
        })
    }
}

impl Policy for GreedyAgent {
    fn new_direction(&mut self, snapshot: &GameSnapshot) -> Result<Direction> {
        let obs = self.encoder.encode(snapshot.frame())?;
        self.estimator.best_direction(&obs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serpent_core::{error::SerpentError, Frame};
    use tempdir::TempDir;

    fn snapshot() -> GameSnapshot {
        let mut frame = Frame::new(240, 240);
        frame.fill_rect(80, 120, 20, 20, [170, 0, 200]);
        frame.fill_rect(20, 20, 20, 20, [255, 0, 0]);
        GameSnapshot::new(frame)
    }

    #[test]
    fn test_plays_saved_network() -> Result<()> {
        let dir = TempDir::new("greedy_agent")?;
        let name = dir.path().join("model1");
        let estimator = ValueEstimator::build(
            ValueEstimatorConfig::default().shape(NetworkShape::Plain),
            candle_core::Device::Cpu,
        )?;
        estimator.save(&name)?;

        let config = GreedyAgentConfig::default()
            .shape(NetworkShape::Plain)
            .model_path(name.to_string_lossy());
        let mut agent = GreedyAgent::build(&config)?;

        let snapshot = snapshot();
        let obs = FrameEncoder::build(&FrameEncoderConfig::default())?.encode(snapshot.frame())?;
        let expected = estimator.best_direction(&obs)?;
        for _ in 0..3 {
            assert_eq!(agent.new_direction(&snapshot)?, expected);
        }
        Ok(())
    }

    #[test]
    fn test_shape_mismatch_is_rejected() -> Result<()> {
        let dir = TempDir::new("greedy_agent")?;
        let name = dir.path().join("model1");
        ValueEstimator::build(
            ValueEstimatorConfig::default().shape(NetworkShape::Plain),
            candle_core::Device::Cpu,
        )?
        .save(&name)?;

        let config = GreedyAgentConfig::default()
            .shape(NetworkShape::Dueling)
            .model_path(name.to_string_lossy());
        let err = GreedyAgent::build(&config).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<SerpentError>(),
            Some(SerpentError::Configuration(_))
        ));
        Ok(())
    }

    #[test]
    fn test_serde_greedy_agent_config() -> Result<()> {
        let config = GreedyAgentConfig::default().model_path("models/model42");
        let dir = TempDir::new("greedy_agent_config")?;
        let path = dir.path().join("greedy_agent.yaml");

        config.save(&path)?;
        assert_eq!(config, GreedyAgentConfig::load(&path)?);
        Ok(())
    }
}
