use super::{
    base::{batch_tensors, bellman_target, fit_targets},
    Learner, LearnerConfig, RewardConfig,
};
use crate::{estimator::ValueEstimator, util::track};
use anyhow::Result;
use candle_core::D;
use log::debug;
use serpent_core::{
    record::{Record, RecordValue},
    replay_buffer::TransitionBatch,
};

/// Online network picks the action at the next state, target network values it.
///
/// The target network starts as a copy of the online network. After every
/// gradient step each target parameter becomes
/// `tau * online + (1 - tau) * target`.
pub struct DoubleNetworkLearner {
    online: ValueEstimator,
    target: ValueEstimator,
    gamma: f64,
    tau: f64,
    clip_grad_norm: Option<f64>,
    rewards: RewardConfig,
    n_opts: usize,
}

impl DoubleNetworkLearner {
    /// Constructs the learner; the target network is a copy of `online`.
    pub fn build(config: &LearnerConfig, online: ValueEstimator) -> Result<Self> {
        config.check()?;
        let target = online.duplicate()?;
        debug!("Target network copied from the online network");

        Ok(Self {
            online,
            target,
            gamma: config.gamma,
            tau: config.tau,
            clip_grad_norm: config.clip_grad_norm,
            rewards: config.rewards.clone(),
            n_opts: 0,
        })
    }

    /// The target estimator.
    pub fn target(&self) -> &ValueEstimator {
        &self.target
    }
}

impl Learner for DoubleNetworkLearner {
    fn train(&mut self, batch: &TransitionBatch) -> Result<Record> {
        let (states, next_states) = batch_tensors(&self.online, batch)?;
        let bootstrap = {
            let best = self
                .online
                .evaluate(&next_states)?
                .argmax_keepdim(D::Minus1)?;
            self.target
                .evaluate(&next_states)?
                .gather(&best, D::Minus1)?
                .squeeze(D::Minus1)?
                .to_vec1::<f32>()?
        };
        let targets = batch
            .rewards
            .iter()
            .zip(bootstrap.iter())
            .map(|(&r, &q)| bellman_target(r, q, self.gamma, &self.rewards))
            .collect::<Vec<_>>();

        let loss = fit_targets(
            &mut self.online,
            &states,
            &batch.actions,
            &targets,
            self.clip_grad_norm,
        )?;
        track(self.target.get_varmap(), self.online.get_varmap(), self.tau)?;
        self.n_opts += 1;

        Ok(Record::from_slice(&[("loss", RecordValue::Scalar(loss))]))
    }

    fn online(&self) -> &ValueEstimator {
        &self.online
    }

    fn n_opts(&self) -> usize {
        self.n_opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::{NetworkShape, ValueEstimatorConfig};
    use candle_core::{Device, Tensor};
    use candle_nn::VarMap;
    use serpent_core::{replay_buffer::Transition, Direction, Observation};
    use std::collections::HashMap;

    fn observation(seed: usize) -> Observation {
        let data = (0..144).map(|i| ((i * 3 + seed) % 7) as f32 / 6.0).collect();
        Observation::new(12, data).unwrap()
    }

    fn snapshot(varmap: &VarMap) -> HashMap<String, Tensor> {
        varmap
            .data()
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.as_tensor().copy().unwrap()))
            .collect()
    }

    fn batch() -> TransitionBatch {
        [
            Transition::new(observation(0), Direction::Up, -0.05, observation(1)),
            Transition::new(observation(1), Direction::Right, 1.0, observation(2)),
            Transition::new(observation(2), Direction::Down, -1.0, observation(3)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_target_starts_as_copy() -> Result<()> {
        let online = ValueEstimator::build(ValueEstimatorConfig::default(), Device::Cpu)?;
        let learner = DoubleNetworkLearner::build(&LearnerConfig::default(), online)?;
        let obs = [observation(0)];
        assert_eq!(
            learner.online().evaluate_observations(&obs)?.to_vec2::<f32>()?,
            learner.target().evaluate_observations(&obs)?.to_vec2::<f32>()?
        );
        Ok(())
    }

    #[test]
    fn test_loss_bootstraps_from_target_network() -> Result<()> {
        let gamma = LearnerConfig::default().gamma as f32;
        let (s, s1, a) = (observation(0), observation(1), Direction::Left);

        for shape in [NetworkShape::Plain, NetworkShape::Dueling] {
            for (reward, terminal) in [(0.1f32, false), (-1.0, true)] {
                let online = ValueEstimator::build(ValueEstimatorConfig::default().shape(shape), Device::Cpu)?;
                let mut learner = DoubleNetworkLearner::build(&LearnerConfig::default().tau(0.5), online)?;
                // Make the networks differ before the step under test.
                learner.train(&batch())?;

                let q = |est: &ValueEstimator, obs: &Observation| -> Result<Vec<f32>> {
                    Ok(est
                        .evaluate_observations(std::slice::from_ref(obs))?
                        .squeeze(0)?
                        .to_vec1::<f32>()?)
                };
                let pred = q(learner.online(), &s)?;
                let online_next = q(learner.online(), &s1)?;
                let target_next = q(learner.target(), &s1)?;
                assert_ne!(online_next, target_next);

                let best = crate::util::argmax(&online_next).unwrap();
                let target = if terminal {
                    reward
                } else {
                    reward + gamma * target_next[best]
                };
                let expected = (pred[a.index()] - target).powi(2) / 4.0;

                let batch = std::iter::once(Transition::new(s.clone(), a, reward, s1.clone()))
                    .collect::<TransitionBatch>();
                let loss = learner.train(&batch)?.get_scalar("loss")?;
                assert!(
                    (loss - expected).abs() <= 1e-5 * expected.max(1.0),
                    "{:?}, reward {}: loss {} expected {}",
                    shape,
                    reward,
                    loss,
                    expected
                );
            }
        }
        Ok(())
    }

    #[test]
    fn test_soft_update_after_train() -> Result<()> {
        let tau = 0.01;
        for shape in [NetworkShape::Plain, NetworkShape::Dueling] {
            let online = ValueEstimator::build(ValueEstimatorConfig::default().shape(shape), Device::Cpu)?;
            let config = LearnerConfig::default().tau(tau);
            let mut learner = DoubleNetworkLearner::build(&config, online)?;

            // Make the networks differ before the step under test.
            learner.train(&batch())?;

            let target_before = snapshot(learner.target().get_varmap());
            learner.train(&batch())?;
            let online_after = snapshot(learner.online().get_varmap());
            let target_after = snapshot(learner.target().get_varmap());

            assert_eq!(target_before.len(), target_after.len());
            for (k, t) in target_after.iter() {
                let expected = ((tau * &online_after[k])? + (1.0 - tau) * &target_before[k])?;
                let diff = (t - expected)?.abs()?.flatten_all()?.max(0)?.to_scalar::<f32>()?;
                assert_eq!(diff, 0.0, "parameter {}", k);
            }
            assert_eq!(learner.n_opts(), 2);
        }
        Ok(())
    }
}
