//! Plays the game with the selected policy.
use crate::SerpentConfig;
use anyhow::Result;
use log::info;
use serpent_candle_agent::{dqn::DqnAgent, GreedyAgent};
use serpent_core::{record::Recorder, Env as _, GameLoop, Policy, RandomPolicy};
use serpent_env::SnakeEnv;

/// Plays with the given policy until the game loop stops.
pub fn run_policy<P, R>(config: &SerpentConfig, policy: &mut P, recorder: &mut R) -> Result<GameLoop>
where
    P: Policy + ?Sized,
    R: Recorder + ?Sized,
{
    let mut env = SnakeEnv::build(&config.env, config.seed)?;
    let mut game_loop = GameLoop::build(&config.game_loop)?;
    game_loop.run(&mut env, policy, recorder)?;
    Ok(game_loop)
}

/// Trains a [`DqnAgent`] from scratch.
///
/// Checkpoints are written while training as configured in
/// [`DqnAgentConfig`](serpent_candle_agent::dqn::DqnAgentConfig).
pub fn run_dqn<R: Recorder + ?Sized>(config: &SerpentConfig, recorder: &mut R) -> Result<GameLoop> {
    info!("Train {} agent", config.agent.algorithm);
    let mut agent = DqnAgent::build(&config.agent)?;
    run_policy(config, &mut agent, recorder)
}

/// Plays a trained checkpoint with a [`GreedyAgent`].
///
/// `model_path` is the checkpoint name without the `.safetensors` suffix.
pub fn run_greedy<R: Recorder + ?Sized>(
    config: &SerpentConfig,
    model_path: &str,
    recorder: &mut R,
) -> Result<GameLoop> {
    info!("Play {} with {}", model_path, config.agent.algorithm);
    let mut agent = GreedyAgent::build(&config.greedy_agent_config(model_path))?;
    run_policy(config, &mut agent, recorder)
}

/// Plays uniformly random directions.
pub fn run_random<R: Recorder + ?Sized>(config: &SerpentConfig, recorder: &mut R) -> Result<GameLoop> {
    info!("Play random directions");
    let mut policy = RandomPolicy::new(config.seed as u64);
    run_policy(config, &mut policy, recorder)
}
