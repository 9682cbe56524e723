//! Configuration of [`ValueEstimator`](super::ValueEstimator).
use crate::{cnn::CnnConfig, opt::OptimizerConfig};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serpent_core::error::SerpentError;
use std::{
    fmt,
    fs::File,
    io::{BufReader, Write},
    path::Path,
    str::FromStr,
};

/// Shape of the action-value network.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum NetworkShape {
    /// Single fully connected stack on top of the features.
    #[default]
    Plain,

    /// State-value and advantage streams on top of the features.
    Dueling,
}

impl FromStr for NetworkShape {
    type Err = SerpentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Self::Plain),
            "dueling" => Ok(Self::Dueling),
            _ => Err(SerpentError::Configuration(format!(
                "unknown network shape: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for NetworkShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Dueling => write!(f, "dueling"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Default)]
/// Configuration of [`ValueEstimator`](super::ValueEstimator).
pub struct ValueEstimatorConfig {
    /// Shape of the network.
    pub shape: NetworkShape,

    /// Layers of the network.
    pub cnn_config: CnnConfig,

    /// Optimizer of the parameters.
    pub opt_config: OptimizerConfig,
}

impl ValueEstimatorConfig {
    /// Sets the shape of the network.
    pub fn shape(mut self, v: NetworkShape) -> Self {
        self.shape = v;
        self
    }

    /// Sets the side length of the input observation.
    pub fn size_resize(mut self, v: usize) -> Self {
        self.cnn_config.size_resize = v;
        self
    }

    /// Sets the number of actions.
    pub fn out_dim(mut self, v: usize) -> Self {
        self.cnn_config.out_dim = v;
        self
    }

    /// Sets configurations of the network layers.
    pub fn cnn_config(mut self, v: CnnConfig) -> Self {
        self.cnn_config = v;
        self
    }

    /// Sets optimizer configuration.
    pub fn opt_config(mut self, v: OptimizerConfig) -> Self {
        self.opt_config = v;
        self
    }

    /// Constructs [`ValueEstimatorConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`ValueEstimatorConfig`] as a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
