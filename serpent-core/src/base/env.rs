//! Environment.
use super::{Direction, Frame, Position};
use anyhow::Result;

/// What happened during one call of [`Env::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// The snake ate the fruit and the score increased.
    pub ate_fruit: bool,

    /// The snake left the board or hit itself; the episode is over.
    pub is_over: bool,
}

/// A snake game driven one tick at a time.
///
/// The game is a deterministic state machine apart from fruit placement.
/// It is observed only through the accessors below and advanced only
/// through [`Env::advance`].
pub trait Env {
    /// Configuration of the environment.
    type Config: Clone;

    /// Builds an environment.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Starts a new episode and renders its first frame.
    fn reset(&mut self) -> Result<()>;

    /// Moves the snake one cell, turning to `direction` unless it points
    /// backwards, and renders the resulting frame.
    fn advance(&mut self, direction: Direction) -> Result<Outcome>;

    /// The current frame without overlay.
    fn frame(&self) -> &Frame;

    /// Score of the current episode.
    fn score(&self) -> usize;

    /// Current heading of the snake.
    fn direction(&self) -> Direction;

    /// Head of the snake.
    fn snake_position(&self) -> Position;

    /// Segments of the snake, head first.
    fn snake_body(&self) -> Vec<Position>;

    /// Position of the fruit.
    fn fruit_position(&self) -> Position;
}
