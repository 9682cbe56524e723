use super::RewardConfig;
use crate::{estimator::ValueEstimator, util::observations_to_tensor};
use anyhow::Result;
use candle_core::Tensor;
use candle_nn::loss::mse;
use log::warn;
use serpent_core::{error::SerpentError, record::Record, replay_buffer::TransitionBatch, Direction};

/// Updates an online [`ValueEstimator`] from batches of transitions.
pub trait Learner {
    /// Performs one gradient step on the batch and returns a record with the loss.
    ///
    /// An empty batch is a [`SerpentError::EmptyBatch`] error.
    fn train(&mut self, batch: &TransitionBatch) -> Result<Record>;

    /// The online estimator, the one acting and being trained.
    fn online(&self) -> &ValueEstimator;

    /// The number of gradient steps done so far.
    fn n_opts(&self) -> usize;
}

/// Target of the taken action: the reward alone if it is terminal, else
/// `reward + gamma * bootstrap`.
pub fn bellman_target(reward: f32, bootstrap: f32, gamma: f64, rewards: &RewardConfig) -> f32 {
    if rewards.is_terminal(reward) {
        reward
    } else {
        reward + gamma as f32 * bootstrap
    }
}

/// Fits the predictions for `states` to `targets` in the slots of `actions`.
///
/// The other slots keep the predicted values. Returns the loss before the
/// update; a non-finite loss is reported before any parameter is touched.
pub(super) fn fit_targets(
    online: &mut ValueEstimator,
    states: &Tensor,
    actions: &[Direction],
    targets: &[f32],
    clip_grad_norm: Option<f64>,
) -> Result<f32> {
    let pred = online.forward(states)?;
    let (n, n_actions) = pred.dims2()?;
    let mut tgt = pred.detach().flatten_all()?.to_vec1::<f32>()?;
    for (i, (a, q)) in actions.iter().zip(targets.iter()).enumerate() {
        tgt[i * n_actions + a.index()] = *q;
    }
    let tgt = Tensor::from_vec(tgt, (n, n_actions), pred.device())?;

    let loss = mse(&pred, &tgt)?;
    let loss_value = loss.to_scalar::<f32>()?;
    if !loss_value.is_finite() {
        warn!("Non-finite loss: {}", loss_value);
        return Err(SerpentError::NumericalInstability(format!("loss = {}", loss_value)).into());
    }

    online.backward_step(&loss, clip_grad_norm)?;
    Ok(loss_value)
}

/// Tensors of the states and the next states of a non-empty batch.
pub(super) fn batch_tensors(online: &ValueEstimator, batch: &TransitionBatch) -> Result<(Tensor, Tensor)> {
    if batch.is_empty() {
        return Err(SerpentError::EmptyBatch.into());
    }
    let states = observations_to_tensor(&batch.states, online.device())?;
    let next_states = observations_to_tensor(&batch.next_states, online.device())?;
    Ok((states, next_states))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bellman_target_bootstraps() {
        let rewards = RewardConfig::default();
        let bootstrap = [1f32, 2.0, 0.0, 3.0]
            .into_iter()
            .fold(f32::NEG_INFINITY, f32::max);
        let q = bellman_target(0.1, bootstrap, 0.9, &rewards);
        assert!((q - 2.8).abs() < 1e-6);

        let q = bellman_target(rewards.step_penalty, 1.0, 0.5, &rewards);
        assert!((q - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_bellman_target_terminal() {
        let rewards = RewardConfig::default();
        for gamma in [0.0, 0.9, 1.0] {
            for bootstrap in [-10.0, 0.0, 123.0] {
                assert_eq!(bellman_target(-1.0, bootstrap, gamma, &rewards), -1.0);
                assert_eq!(bellman_target(1.0, bootstrap, gamma, &rewards), 1.0);
            }
        }
        // Only exact matches stop bootstrapping.
        assert_ne!(bellman_target(0.999_999, 1.0, 0.9, &rewards), 0.999_999);
    }
}
