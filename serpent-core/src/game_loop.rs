//! Drives episodes of the snake game in lock-step with a [`Policy`](crate::Policy).
mod base;
mod config;
pub use base::{EpisodeResult, GameLoop};
pub use config::GameLoopConfig;
