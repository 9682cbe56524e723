//! Core functionalities.
mod direction;
mod env;
mod frame;
mod policy;
mod snapshot;
pub use direction::Direction;
pub use env::{Env, Outcome};
pub use frame::Frame;
pub use policy::{Policy, RandomPolicy};
pub use snapshot::{GameSnapshot, Position};
