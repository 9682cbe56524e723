//! Read-only view of the game handed to a policy on every tick.
use super::{Direction, Frame};
use serde::{Deserialize, Serialize};

/// Cell coordinates on the board, `(0, 0)` is the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Position {
    /// Column.
    pub x: i32,

    /// Row.
    pub y: i32,
}

impl Position {
    /// Constructs a position.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in the given direction.
    pub fn moved(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::new(self.x, self.y - 1),
            Direction::Right => Self::new(self.x + 1, self.y),
            Direction::Down => Self::new(self.x, self.y + 1),
            Direction::Left => Self::new(self.x - 1, self.y),
        }
    }
}

/// State of the game published by the game loop before asking a policy
/// for the next direction.
///
/// Fields are private; the publisher builds a new snapshot every tick
/// with the `with_*` methods and policies only read it.
#[derive(Debug, Clone)]
pub struct GameSnapshot {
    frame: Frame,
    score: usize,
    best_score: usize,
    step: usize,
    best_step: usize,
    number_game: usize,
    number_all_step: usize,
    last_direction: Option<Direction>,
    snake_position: Position,
    snake_body: Vec<Position>,
    fruit_position: Position,
}

impl GameSnapshot {
    /// Creates a snapshot of the given frame with all counters at zero.
    pub fn new(frame: Frame) -> Self {
        Self {
            frame,
            score: 0,
            best_score: 0,
            step: 0,
            best_step: 0,
            number_game: 0,
            number_all_step: 0,
            last_direction: None,
            snake_position: Position::new(0, 0),
            snake_body: vec![],
            fruit_position: Position::new(0, 0),
        }
    }

    /// Sets the score of the current episode.
    pub fn with_score(mut self, v: usize) -> Self {
        self.score = v;
        self
    }

    /// Sets the best score over finished episodes.
    pub fn with_best_score(mut self, v: usize) -> Self {
        self.best_score = v;
        self
    }

    /// Sets the number of steps taken in the current episode.
    pub fn with_step(mut self, v: usize) -> Self {
        self.step = v;
        self
    }

    /// Sets the longest episode so far, in steps.
    pub fn with_best_step(mut self, v: usize) -> Self {
        self.best_step = v;
        self
    }

    /// Sets the episode counter, starting from 1 for the first episode.
    pub fn with_number_game(mut self, v: usize) -> Self {
        self.number_game = v;
        self
    }

    /// Sets the number of steps taken over all episodes.
    pub fn with_number_all_step(mut self, v: usize) -> Self {
        self.number_all_step = v;
        self
    }

    /// Sets the direction the snake is currently heading.
    pub fn with_last_direction(mut self, v: Direction) -> Self {
        self.last_direction = Some(v);
        self
    }

    /// Sets the positions of the snake and the fruit.
    pub fn with_positions(mut self, head: Position, body: Vec<Position>, fruit: Position) -> Self {
        self.snake_position = head;
        self.snake_body = body;
        self.fruit_position = fruit;
        self
    }

    /// The game screen without score overlay.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Score of the current episode.
    pub fn score(&self) -> usize {
        self.score
    }

    /// Best score over finished episodes.
    pub fn best_score(&self) -> usize {
        self.best_score
    }

    /// Steps taken in the current episode.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Longest finished episode in steps.
    pub fn best_step(&self) -> usize {
        self.best_step
    }

    /// Episode counter.
    pub fn number_game(&self) -> usize {
        self.number_game
    }

    /// Steps over all episodes.
    pub fn number_all_step(&self) -> usize {
        self.number_all_step
    }

    /// Current heading of the snake.
    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    /// Head of the snake.
    pub fn snake_position(&self) -> Position {
        self.snake_position
    }

    /// Segments of the snake, head first.
    pub fn snake_body(&self) -> &[Position] {
        &self.snake_body
    }

    /// Position of the fruit.
    pub fn fruit_position(&self) -> Position {
        self.fruit_position
    }
}
