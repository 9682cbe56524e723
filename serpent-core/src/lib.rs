#![warn(missing_docs)]
//! Core building blocks for agents learning to play snake from pixels.
//!
//! This crate does not depend on any tensor backend. It provides the types
//! shared by the environment, the agents and the game loop:
//!
//! * [`Direction`], [`Frame`] and [`GameSnapshot`] - what the game exposes on every tick.
//! * [`Policy`] - the capability every agent implements.
//! * [`Env`] - the narrow contract of a game simulation.
//! * [`FrameEncoder`] - converts a raw frame into a normalised single-channel observation.
//! * [`replay_buffer::ReplayMemory`] - bounded FIFO memory of transitions.
//! * [`GameLoop`] - drives episodes in lock-step with a policy.
//! * [`record`] - records and recorders for logging episode statistics.
pub mod error;
pub mod record;
pub mod replay_buffer;

mod base;
pub use base::{Direction, Env, Frame, GameSnapshot, Outcome, Policy, Position, RandomPolicy};

mod frame_encoder;
pub use frame_encoder::{FrameEncoder, FrameEncoderConfig, Observation};

mod game_loop;
pub use game_loop::{EpisodeResult, GameLoop, GameLoopConfig};
