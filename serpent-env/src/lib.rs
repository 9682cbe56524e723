//! Headless snake game.
//!
//! [`SnakeEnv`] implements [`serpent_core::Env`]: a board of square cells,
//! a snake that moves one cell per tick and a fruit. Every tick renders an
//! RGB frame of the board, which is all a learning agent gets to see.
//!
//! ```
//! use serpent_core::{Direction, Env as _};
//! use serpent_env::{SnakeEnv, SnakeEnvConfig};
//!
//! let mut env = SnakeEnv::build(&SnakeEnvConfig::default(), 42).unwrap();
//! assert_eq!(env.frame().width(), 240);
//!
//! let outcome = env.advance(Direction::Up).unwrap();
//! assert!(!outcome.is_over);
//! ```
mod env;
pub use env::{SnakeEnv, SnakeEnvConfig};
