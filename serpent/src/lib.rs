//! Runs the snake agents.
//!
//! [`SerpentConfig`] bundles the configurations of the environment, the
//! game loop and the learning agent. The `run_*` functions build the
//! environment and the selected policy and play until the game loop stops.
//!
//! ```no_run
//! use serpent::{run_dqn, SerpentConfig};
//! use serpent_core::record::NullRecorder;
//!
//! let config = SerpentConfig::default();
//! let game_loop = run_dqn(&config, &mut NullRecorder::new()).unwrap();
//! println!("best score: {}", game_loop.best_score());
//! ```
mod config;
mod runner;
pub use config::SerpentConfig;
pub use runner::{run_dqn, run_greedy, run_policy, run_random};
