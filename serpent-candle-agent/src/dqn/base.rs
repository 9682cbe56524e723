//! Learning agent.
use super::{DqnAgentConfig, EpsilonGreedy};
use crate::learner::{build_learner, Learner, RewardConfig};
use anyhow::Result;
use log::{info, trace};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serpent_core::{
    replay_buffer::{ReplayMemory, Transition},
    Direction, FrameEncoder, GameSnapshot, Observation, Policy,
};
use std::path::PathBuf;

/// What the agent saw and did on the previous tick.
struct Previous {
    score: usize,
    number_game: usize,
    obs: Observation,
    direction: Direction,
}

/// Deep Q-learning agent.
///
/// On every tick the agent first turns the outcome of its previous action
/// into a transition: the reward is the terminal penalty if a new episode
/// has started, the terminal bonus if the score went up and the step
/// penalty otherwise. When an episode whose counter is a multiple of
/// [`DqnAgentConfig::save_model_after_games`] starts, the online network
/// is saved.
///
/// While the cumulative step counter is below
/// [`DqnAgentConfig::step_without_learn`] the agent acts at random and
/// does not learn. Afterwards every tick performs one gradient step on a
/// batch sampled from the replay memory, decays epsilon and acts
/// epsilon-greedily.
pub struct DqnAgent {
    encoder: FrameEncoder,
    memory: ReplayMemory,
    learner: Box<dyn Learner>,
    explorer: EpsilonGreedy,
    rewards: RewardConfig,
    step_without_learn: usize,
    batch_size: usize,
    file_name: String,
    save_model_after_games: usize,
    rng: SmallRng,
    prev: Option<Previous>,
}

impl DqnAgent {
    /// Constructs the agent with freshly initialized networks.
    pub fn build(config: &DqnAgentConfig) -> Result<Self> {
        config.check()?;
        let device = config.device.try_into()?;
        let learner = build_learner(
            &config.learner_config(),
            config.value_estimator_config(),
            device,
        )?;
        info!(
            "DQN agent: {}, warmup {} steps, batch size {}, memory size {}",
            config.algorithm, config.step_without_learn, config.batch_size, config.memory_size
        );

        Ok(Self {
            encoder: FrameEncoder::build(&config.frame_encoder_config())?,
            memory: ReplayMemory::build(&config.replay_memory_config())?,
            learner,
            explorer: EpsilonGreedy::new(
                config.start_epsilon,
                config.stop_epsilon,
                config.reduction_epsilon,
            ),
            rewards: config.rewards.clone(),
            step_without_learn: config.step_without_learn,
            batch_size: config.batch_size,
            file_name: config.file_name.clone(),
            save_model_after_games: config.save_model_after_games,
            rng: SmallRng::seed_from_u64(config.seed),
            prev: None,
        })
    }

    fn reward(&self, prev: &Previous, snapshot: &GameSnapshot) -> f32 {
        if snapshot.number_game() > prev.number_game {
            self.rewards.terminal_penalty
        } else if snapshot.score() > prev.score {
            self.rewards.terminal_bonus
        } else {
            self.rewards.step_penalty
        }
    }

    /// Stores the outcome of the previous action and saves a checkpoint
    /// when an episode with a matching counter has just started.
    fn observe(&mut self, snapshot: &GameSnapshot, obs: &Observation) -> Result<()> {
        let prev = match self.prev.take() {
            Some(prev) => prev,
            None => return Ok(()),
        };
        let reward = self.reward(&prev, snapshot);
        let new_game = snapshot.number_game() > prev.number_game;
        self.memory
            .add(Transition::new(prev.obs, prev.direction, reward, obs.clone()));

        if new_game && snapshot.number_game() % self.save_model_after_games == 0 {
            let index = snapshot.number_game() / self.save_model_after_games;
            self.save(format!("{}{}", self.file_name, index))?;
            info!("Epsilon: {}", self.explorer.epsilon());
        }
        Ok(())
    }

    fn act(&mut self, snapshot: &GameSnapshot, obs: &Observation) -> Result<Direction> {
        if snapshot.number_all_step() < self.step_without_learn {
            return Ok(Direction::random(&mut self.rng));
        }

        if !self.memory.is_empty() {
            let batch = self.memory.batch(self.batch_size);
            let record = self.learner.train(&batch)?;
            trace!("Loss: {:?}", record.get_scalar("loss"));
        }
        self.explorer.decay();

        let p = self.rng.gen_range(0..=10000) as f64 / 10000.0;
        if self.explorer.is_greedy(p) {
            self.learner.online().best_direction(obs)
        } else {
            Ok(Direction::random(&mut self.rng))
        }
    }

    /// Saves the online network to `<name>.safetensors`.
    pub fn save(&self, name: impl Into<PathBuf>) -> Result<PathBuf> {
        self.learner.online().save(name.into())
    }

    /// Current exploration probability.
    pub fn epsilon(&self) -> f64 {
        self.explorer.epsilon()
    }

    /// Number of gradient steps done so far.
    pub fn n_opts(&self) -> usize {
        self.learner.n_opts()
    }

    /// The replay memory.
    pub fn memory(&self) -> &ReplayMemory {
        &self.memory
    }
}

impl Policy for DqnAgent {
    fn new_direction(&mut self, snapshot: &GameSnapshot) -> Result<Direction> {
        let obs = self.encoder.encode(snapshot.frame())?;
        self.observe(snapshot, &obs)?;

        let direction = self.act(snapshot, &obs)?;
        self.prev = Some(Previous {
            score: snapshot.score(),
            number_game: snapshot.number_game(),
            obs,
            direction,
        });
        Ok(direction)
    }
}
