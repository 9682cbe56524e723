//! Replay memory of transitions.
//!
//! Transitions are appended by the agent on every tick after the first one
//! and sampled uniformly, without replacement, to form training batches.
//! When the memory is full the oldest transition is evicted.
//!
//! ```rust
//! use serpent_core::{
//!     replay_buffer::{ReplayMemory, ReplayMemoryConfig, Transition},
//!     Direction, Observation,
//! };
//!
//! let config = ReplayMemoryConfig::default().capacity(2).seed(7);
//! let mut memory = ReplayMemory::build(&config).unwrap();
//! let obs = Observation::new(1, vec![0.5]).unwrap();
//!
//! for _ in 0..3 {
//!     memory.add(Transition::new(obs.clone(), Direction::Up, -0.05, obs.clone()));
//! }
//! assert_eq!(memory.len(), 2);
//! assert_eq!(memory.sample(10).len(), 2);
//! ```
mod base;
mod config;
mod transition;
pub use base::ReplayMemory;
pub use config::ReplayMemoryConfig;
pub use transition::{Transition, TransitionBatch};
