//! Configuration of learners.
use crate::estimator::NetworkShape;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serpent_core::error::SerpentError;
use std::{fmt, str::FromStr};

/// Learning algorithm: how the bootstrap is computed and the shape of the network.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Single network, plain shape.
    Dqn,

    /// Online and target networks, plain shape.
    DoubleDqn,

    /// Single network, dueling shape.
    DuelingDqn,

    /// Online and target networks, dueling shape.
    #[default]
    DuelingDoubleDqn,
}

impl Algorithm {
    /// Shape of the value network.
    pub fn shape(&self) -> NetworkShape {
        match self {
            Self::Dqn | Self::DoubleDqn => NetworkShape::Plain,
            Self::DuelingDqn | Self::DuelingDoubleDqn => NetworkShape::Dueling,
        }
    }

    /// Whether a target network evaluates the bootstrap.
    pub fn is_double(&self) -> bool {
        matches!(self, Self::DoubleDqn | Self::DuelingDoubleDqn)
    }
}

impl FromStr for Algorithm {
    type Err = SerpentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dqn" => Ok(Self::Dqn),
            "double_dqn" => Ok(Self::DoubleDqn),
            "dueling_dqn" => Ok(Self::DuelingDqn),
            "dueling_double_dqn" => Ok(Self::DuelingDoubleDqn),
            _ => Err(SerpentError::Configuration(format!(
                "unknown algorithm: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Dqn => "dqn",
            Self::DoubleDqn => "double_dqn",
            Self::DuelingDqn => "dueling_dqn",
            Self::DuelingDoubleDqn => "dueling_double_dqn",
        };
        write!(f, "{}", s)
    }
}

/// Rewards assigned by the agent.
///
/// `terminal_penalty` and `terminal_bonus` double as markers: learners
/// compare rewards against them with exact equality to decide whether to
/// bootstrap.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct RewardConfig {
    /// Reward of the action that ended an episode.
    pub terminal_penalty: f32,

    /// Reward of the action that ate a fruit.
    pub terminal_bonus: f32,

    /// Reward of any other action.
    pub step_penalty: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            terminal_penalty: -1.0,
            terminal_bonus: 1.0,
            step_penalty: -0.05,
        }
    }
}

impl RewardConfig {
    /// Returns `true` if no bootstrap should be added to this reward.
    pub fn is_terminal(&self, reward: f32) -> bool {
        reward == self.terminal_penalty || reward == self.terminal_bonus
    }
}

/// Configuration of [`SingleNetworkLearner`](super::SingleNetworkLearner)
/// and [`DoubleNetworkLearner`](super::DoubleNetworkLearner).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct LearnerConfig {
    /// Algorithm.
    pub algorithm: Algorithm,

    /// Discount factor.
    pub gamma: f64,

    /// Interpolation factor of the target network towards the online network.
    pub tau: f64,

    /// Maximum L2 norm of the gradient, no clipping if `None`.
    pub clip_grad_norm: Option<f64>,

    /// Rewards, the terminal ones are used to stop bootstrapping.
    pub rewards: RewardConfig,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            gamma: 0.9,
            tau: 0.01,
            clip_grad_norm: None,
            rewards: RewardConfig::default(),
        }
    }
}

impl LearnerConfig {
    /// Sets the algorithm.
    pub fn algorithm(mut self, v: Algorithm) -> Self {
        self.algorithm = v;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, v: f64) -> Self {
        self.gamma = v;
        self
    }

    /// Sets the interpolation factor of the target network.
    pub fn tau(mut self, v: f64) -> Self {
        self.tau = v;
        self
    }

    /// Sets the maximum norm of the gradient.
    pub fn clip_grad_norm(mut self, v: Option<f64>) -> Self {
        self.clip_grad_norm = v;
        self
    }

    /// Sets the rewards.
    pub fn rewards(mut self, v: RewardConfig) -> Self {
        self.rewards = v;
        self
    }

    pub(super) fn check(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(SerpentError::Configuration(format!("gamma out of [0, 1]: {}", self.gamma)).into());
        }
        if !(0.0..=1.0).contains(&self.tau) {
            return Err(SerpentError::Configuration(format!("tau out of [0, 1]: {}", self.tau)).into());
        }
        if let Some(v) = self.clip_grad_norm.filter(|&v| v <= 0.0) {
            return Err(SerpentError::Configuration(format!("clip_grad_norm must be positive: {}", v)).into());
        }
        Ok(())
    }
}
