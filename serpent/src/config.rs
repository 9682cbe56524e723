//! Configuration of a run.
use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use serpent_candle_agent::{dqn::DqnAgentConfig, learner::Algorithm, GreedyAgentConfig};
use serpent_core::GameLoopConfig;
use serpent_env::SnakeEnvConfig;
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of the environment, the game loop and the agent.
///
/// The default is the training profile of the `serpent` binary.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct SerpentConfig {
    /// Snake game.
    pub env: SnakeEnvConfig,

    /// Game loop.
    pub game_loop: GameLoopConfig,

    /// Learning agent. The greedy agent takes the network from here too.
    pub agent: DqnAgentConfig,

    /// Seed of the environment and the random policy.
    pub seed: i64,
}

impl Default for SerpentConfig {
    fn default() -> Self {
        Self {
            env: SnakeEnvConfig::default(),
            game_loop: GameLoopConfig::default().max_number_game(10_000_000),
            agent: DqnAgentConfig::default()
                .algorithm(Algorithm::DuelingDoubleDqn)
                .learning_rate(0.0001)
                .gamma(0.9)
                .step_without_learn(150_000)
                .batch_size(24)
                .memory_size(500_000)
                .epsilon(1.0, 0.001, 0.00000055)
                .size_resize(12)
                .file_name("models/model")
                .clip_grad_norm(Some(1.0))
                .save_model_after_games(1000)
                .tau(0.0006),
            seed: 42,
        }
    }
}

impl SerpentConfig {
    /// Sets the learning algorithm.
    pub fn algorithm(mut self, v: Algorithm) -> Self {
        self.agent.algorithm = v;
        self
    }

    /// Sets the number of episodes to play.
    pub fn max_number_game(mut self, v: usize) -> Self {
        self.game_loop.max_number_game = v;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, v: i64) -> Self {
        self.seed = v;
        self
    }

    /// Configuration of a greedy agent playing the given checkpoint.
    pub fn greedy_agent_config(&self, model_path: impl Into<String>) -> GreedyAgentConfig {
        GreedyAgentConfig::default()
            .shape(self.agent.algorithm.shape())
            .size_resize(self.agent.size_resize)
            .model_path(model_path)
            .device(self.agent.device)
    }

    /// Constructs [`SerpentConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        info!("Load config from {:?}", path);
        Ok(b)
    }

    /// Saves [`SerpentConfig`] as a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        info!("Save config into {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serpent_candle_agent::estimator::NetworkShape;
    use tempdir::TempDir;

    #[test]
    fn test_serde_serpent_config() -> Result<()> {
        let config = SerpentConfig::default()
            .algorithm(Algorithm::DoubleDqn)
            .max_number_game(5);
        let dir = TempDir::new("serpent_config")?;
        let path = dir.path().join("serpent.yaml");

        config.save(&path)?;
        assert_eq!(config, SerpentConfig::load(&path)?);
        Ok(())
    }

    #[test]
    fn test_greedy_agent_config() {
        let config = SerpentConfig::default().algorithm(Algorithm::Dqn);
        let greedy = config.greedy_agent_config("models/model3");
        assert_eq!(greedy.shape, NetworkShape::Plain);
        assert_eq!(greedy.size_resize, 12);
        assert_eq!(greedy.model_path, "models/model3");
    }
}
