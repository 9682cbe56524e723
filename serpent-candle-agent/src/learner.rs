//! One gradient step of Q-learning on a batch of transitions.
//!
//! Targets are built per sample. For a terminal reward (the penalty given
//! when an episode ended, or the bonus given when a fruit was eaten) the
//! target of the taken action is the reward itself. Otherwise it is
//! `reward + gamma * bootstrap`, with the bootstrap given by
//!
//! * [`SingleNetworkLearner`]: the largest value of the online network at the next state,
//! * [`DoubleNetworkLearner`]: the value given by a target network to the action
//!   the online network prefers at the next state.
//!
//! Only the slot of the taken action differs from the prediction, so the
//! mean squared error only carries a signal for that action.
mod base;
mod config;
mod double;
mod single;
pub use base::{bellman_target, Learner};
pub use config::{Algorithm, LearnerConfig, RewardConfig};
pub use double::DoubleNetworkLearner;
pub use single::SingleNetworkLearner;

use crate::estimator::{ValueEstimator, ValueEstimatorConfig};
use anyhow::Result;
use candle_core::Device;

/// Builds the learner of [`LearnerConfig::algorithm`] with a freshly initialized online network.
///
/// The shape of the network is taken from the algorithm.
pub fn build_learner(
    config: &LearnerConfig,
    estimator_config: ValueEstimatorConfig,
    device: Device,
) -> Result<Box<dyn Learner>> {
    let estimator_config = estimator_config.shape(config.algorithm.shape());
    let online = ValueEstimator::build(estimator_config, device)?;

    if config.algorithm.is_double() {
        Ok(Box::new(DoubleNetworkLearner::build(config, online)?))
    } else {
        Ok(Box::new(SingleNetworkLearner::build(config, online)?))
    }
}
