//! Actions of the snake.
use crate::error::SerpentError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Direction the snake is asked to move in.
///
/// The discriminants are the action indices used by the value estimators,
/// i.e. the column of the action-value vector belonging to the direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Direction {
    /// Action 0.
    Up = 0,

    /// Action 1.
    Right = 1,

    /// Action 2.
    Down = 2,

    /// Action 3.
    Left = 3,
}

impl Direction {
    /// The number of actions.
    pub const COUNT: usize = 4;

    /// All directions ordered by action index.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Returns the action index of the direction.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the direction pointing the other way.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Samples a direction uniformly at random.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::COUNT)]
    }
}

impl TryFrom<usize> for Direction {
    type Error = SerpentError;

    fn try_from(ix: usize) -> Result<Self, Self::Error> {
        Self::ALL.get(ix).copied().ok_or_else(|| {
            SerpentError::Configuration(format!("action index {} is out of range", ix))
        })
    }
}

impl From<Direction> for usize {
    fn from(direction: Direction) -> Self {
        direction.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        for (i, d) in Direction::ALL.iter().enumerate() {
            assert_eq!(d.index(), i);
            assert_eq!(Direction::try_from(i).unwrap(), *d);
        }
        assert!(Direction::try_from(4).is_err());
    }

    #[test]
    fn test_opposite() {
        for d in Direction::ALL {
            assert_ne!(d, d.opposite());
            assert_eq!(d, d.opposite().opposite());
        }
    }
}
