use super::{
    base::{batch_tensors, bellman_target, fit_targets},
    Learner, LearnerConfig, RewardConfig,
};
use crate::estimator::ValueEstimator;
use anyhow::Result;
use candle_core::D;
use serpent_core::{
    record::{Record, RecordValue},
    replay_buffer::TransitionBatch,
};

/// Bootstraps with the largest value of the online network at the next state.
pub struct SingleNetworkLearner {
    online: ValueEstimator,
    gamma: f64,
    clip_grad_norm: Option<f64>,
    rewards: RewardConfig,
    n_opts: usize,
}

impl SingleNetworkLearner {
    /// Constructs the learner around an online estimator.
    pub fn build(config: &LearnerConfig, online: ValueEstimator) -> Result<Self> {
        config.check()?;
        Ok(Self {
            online,
            gamma: config.gamma,
            clip_grad_norm: config.clip_grad_norm,
            rewards: config.rewards.clone(),
            n_opts: 0,
        })
    }
}

impl Learner for SingleNetworkLearner {
    fn train(&mut self, batch: &TransitionBatch) -> Result<Record> {
        let (states, next_states) = batch_tensors(&self.online, batch)?;
        let bootstrap = self
            .online
            .evaluate(&next_states)?
            .max(D::Minus1)?
            .to_vec1::<f32>()?;
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
    use candle_core::Device;
    use serpent_core::{error::SerpentError, replay_buffer::Transition, Direction, Observation};

    fn observation(seed: usize) -> Observation {
        let data = (0..144).map(|i| ((i * 5 + seed) % 11) as f32 / 10.0).collect();
        Observation::new(12, data).unwrap()
    }

    fn learner(shape: NetworkShape) -> SingleNetworkLearner {
        let online = ValueEstimator::build(ValueEstimatorConfig::default().shape(shape), Device::Cpu).unwrap();
        SingleNetworkLearner::build(&LearnerConfig::default().clip_grad_norm(Some(1.0)), online).unwrap()
    }

    #[test]
    fn test_train_updates_only_online() -> Result<()> {
        let mut learner = learner(NetworkShape::Plain);
        let batch = (0..4)
            .map(|i| Transition::new(observation(i), Direction::Up, -0.05, observation(i + 1)))
            .collect::<TransitionBatch>();

        let obs = [observation(0)];
        let q0 = learner.online().evaluate_observations(&obs)?.to_vec2::<f32>()?;
        let record = learner.train(&batch)?;
        let q1 = learner.online().evaluate_observations(&obs)?.to_vec2::<f32>()?;

        assert!(record.get_scalar("loss")?.is_finite());
        assert_eq!(learner.n_opts(), 1);
        assert_ne!(q0, q1);
        Ok(())
    }

    #[test]
    fn test_loss_measures_taken_action_only() -> Result<()> {
        let gamma = LearnerConfig::default().gamma as f32;
        let (s, s1, a) = (observation(0), observation(1), Direction::Down);

        for shape in [NetworkShape::Plain, NetworkShape::Dueling] {
            for (reward, terminal) in [(0.1f32, false), (-0.05, false), (-1.0, true), (1.0, true)] {
                let mut learner = learner(shape);
                let q = |obs: &Observation| -> Result<Vec<f32>> {
                    Ok(learner
                        .online()
                        .evaluate_observations(std::slice::from_ref(obs))?
                        .squeeze(0)?
                        .to_vec1::<f32>()?)
                };
                let pred = q(&s)?;
                let bootstrap = q(&s1)?.into_iter().fold(f32::NEG_INFINITY, f32::max);
                let target = if terminal {
                    reward
                } else {
                    reward + gamma * bootstrap
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
    fn test_single_sample_batch() -> Result<()> {
        let mut learner = learner(NetworkShape::Dueling);
        let batch = std::iter::once(Transition::new(
            observation(0),
            Direction::Left,
            1.0,
            observation(1),
        ))
        .collect::<TransitionBatch>();
        learner.train(&batch)?;
        Ok(())
    }

    #[test]
    fn test_empty_batch() {
        let mut learner = learner(NetworkShape::Plain);
        let err = learner.train(&TransitionBatch::default()).unwrap_err();
        assert_eq!(err.downcast_ref::<SerpentError>(), Some(&SerpentError::EmptyBatch));
        assert_eq!(learner.n_opts(), 0);
    }
}
