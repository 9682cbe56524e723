//! Deep Q-learning agents for the snake game, implemented with
//! [candle](https://crates.io/crates/candle-core).
//!
//! * [`estimator::ValueEstimator`] - a convolutional network mapping an observation
//!   to four action-values, in a plain or a dueling shape.
//! * [`learner`] - one gradient step on a batch of transitions, with a single
//!   network or with an online and a target network.
//! * [`dqn::DqnAgent`] - the learning agent: replay memory, reward assignment,
//!   epsilon-greedy exploration and checkpoints.
//! * [`GreedyAgent`] - plays a trained checkpoint.
pub mod cnn;
pub mod dqn;
pub mod estimator;
mod greedy;
pub mod learner;
pub mod model;
pub mod opt;
pub mod util;
pub use greedy::{GreedyAgent, GreedyAgentConfig};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Copy, Deserialize, Serialize, PartialEq, Default)]
/// Device for using candle.
///
/// [`candle_core::Device`] does not support serialization.
pub enum Device {
    /// The main CPU device.
    #[default]
    Cpu,

    /// The GPU device with the given ordinal.
    Cuda(usize),
}

impl TryFrom<Device> for candle_core::Device {
    type Error = candle_core::Error;

    fn try_from(device: Device) -> Result<Self, Self::Error> {
        match device {
            Device::Cpu => Ok(candle_core::Device::Cpu),
            Device::Cuda(n) => candle_core::Device::new_cuda(n),
        }
    }
}
