//! Configuration of [`DqnAgent`](super::DqnAgent).
use crate::{
    cnn::CnnConfig,
    estimator::ValueEstimatorConfig,
    learner::{Algorithm, LearnerConfig, RewardConfig},
    opt::OptimizerConfig,
    Device,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serpent_core::{error::SerpentError, replay_buffer::ReplayMemoryConfig, FrameEncoderConfig};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`DqnAgent`](super::DqnAgent).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct DqnAgentConfig {
    /// Learning algorithm, which also fixes the shape of the network.
    pub algorithm: Algorithm,

    /// Learning rate of the Adam optimizer.
    pub learning_rate: f64,

    /// Discount factor.
    pub gamma: f64,

    /// Actions are random and nothing is learned while the cumulative
    /// step counter is below this value.
    pub step_without_learn: usize,

    /// Number of transitions sampled per gradient step.
    pub batch_size: usize,

    /// Capacity of the replay memory.
    pub memory_size: usize,

    /// Initial exploration probability.
    pub start_epsilon: f64,

    /// Floor of the exploration probability.
    pub stop_epsilon: f64,

    /// Decrement of the exploration probability per learning tick.
    pub reduction_epsilon: f64,

    /// Side length of the observations.
    pub size_resize: usize,

    /// Prefix of the checkpoint files, `<file_name><index>.safetensors`.
    pub file_name: String,

    /// Maximum L2 norm of the gradient, no clipping if `None`.
    pub clip_grad_norm: Option<f64>,

    /// A checkpoint is written when an episode whose counter is a multiple
    /// of this value starts.
    pub save_model_after_games: usize,

    /// Interpolation factor of the target network.
    pub tau: f64,

    /// Rewards given to the actions.
    pub rewards: RewardConfig,

    /// Seed of the random number generators.
    pub seed: u64,

    /// Device of the networks.
    pub device: Device,
}

impl Default for DqnAgentConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::DuelingDoubleDqn,
            learning_rate: 0.001,
            gamma: 0.9,
            step_without_learn: 77_000,
            batch_size: 128,
            memory_size: 500_000,
            start_epsilon: 1.0,
            stop_epsilon: 0.001,
            reduction_epsilon: 0.000001,
            size_resize: 12,
            file_name: "model".to_string(),
            clip_grad_norm: None,
            save_model_after_games: 1000,
            tau: 0.01,
            rewards: RewardConfig::default(),
            seed: 42,
            device: Device::Cpu,
        }
    }
}

impl DqnAgentConfig {
    /// Sets the algorithm.
    pub fn algorithm(mut self, v: Algorithm) -> Self {
        self.algorithm = v;
        self
    }

    /// Sets the learning rate.
    pub fn learning_rate(mut self, v: f64) -> Self {
        self.learning_rate = v;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, v: f64) -> Self {
        self.gamma = v;
        self
    }

    /// Sets the length of the warmup period in cumulative steps.
    pub fn step_without_learn(mut self, v: usize) -> Self {
        self.step_without_learn = v;
        self
    }

    /// Sets the batch size.
    pub fn batch_size(mut self, v: usize) -> Self {
        self.batch_size = v;
        self
    }

    /// Sets the capacity of the replay memory.
    pub fn memory_size(mut self, v: usize) -> Self {
        self.memory_size = v;
        self
    }

    /// Sets the epsilon schedule.
    pub fn epsilon(mut self, start: f64, stop: f64, reduction: f64) -> Self {
        self.start_epsilon = start;
        self.stop_epsilon = stop;
        self.reduction_epsilon = reduction;
        self
    }

    /// Sets the side length of the observations.
    pub fn size_resize(mut self, v: usize) -> Self {
        self.size_resize = v;
        self
    }

    /// Sets the prefix of the checkpoint files.
    pub fn file_name(mut self, v: impl Into<String>) -> Self {
        self.file_name = v.into();
        self
    }

    /// Sets the maximum norm of the gradient.
    pub fn clip_grad_norm(mut self, v: Option<f64>) -> Self {
        self.clip_grad_norm = v;
        self
    }

    /// Sets the checkpoint interval in episodes.
    pub fn save_model_after_games(mut self, v: usize) -> Self {
        self.save_model_after_games = v;
        self
    }

    /// Sets the interpolation factor of the target network.
    pub fn tau(mut self, v: f64) -> Self {
        self.tau = v;
        self
    }

    /// Sets the rewards.
    pub fn rewards(mut self, v: RewardConfig) -> Self {
        self.rewards = v;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Sets the device.
    pub fn device(mut self, v: Device) -> Self {
        self.device = v;
        self
    }

    /// Checks the values that would otherwise fail later.
    pub fn check(&self) -> Result<()> {
        let err = |msg: &str| Err(SerpentError::Configuration(msg.to_string()).into());
        if self.batch_size == 0 {
            return err("batch_size must be positive");
        }
        if self.save_model_after_games == 0 {
            return err("save_model_after_games must be positive");
        }
        if self.stop_epsilon > self.start_epsilon {
            return err("stop_epsilon must not exceed start_epsilon");
        }
        if self.reduction_epsilon < 0.0 {
            return err("reduction_epsilon must not be negative");
        }
        Ok(())
    }

    /// Configuration of the frame encoder.
    pub fn frame_encoder_config(&self) -> FrameEncoderConfig {
        FrameEncoderConfig::default().size(self.size_resize)
    }

    /// Configuration of the replay memory.
    pub fn replay_memory_config(&self) -> ReplayMemoryConfig {
        ReplayMemoryConfig::default()
            .capacity(self.memory_size)
            .seed(self.seed)
    }

    /// Configuration of the online estimator.
    pub fn value_estimator_config(&self) -> ValueEstimatorConfig {
        ValueEstimatorConfig::default()
            .shape(self.algorithm.shape())
            .cnn_config(CnnConfig::default().size_resize(self.size_resize))
            .opt_config(OptimizerConfig::Adam {
                lr: self.learning_rate,
            })
    }

    /// Configuration of the learner.
    pub fn learner_config(&self) -> LearnerConfig {
        LearnerConfig::default()
            .algorithm(self.algorithm)
            .gamma(self.gamma)
            .tau(self.tau)
            .clip_grad_norm(self.clip_grad_norm)
            .rewards(self.rewards.clone())
    }

    /// Constructs [`DqnAgentConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`DqnAgentConfig`] as a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
