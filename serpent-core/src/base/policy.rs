//! Policy.
use super::{Direction, GameSnapshot};
use anyhow::Result;
use rand::{rngs::SmallRng, SeedableRng};

/// A policy on the snake game.
///
/// The game loop publishes a [`GameSnapshot`] every tick and applies the
/// returned direction. Implementations are selected at construction; the
/// loop only sees this capability.
pub trait Policy {
    /// Returns the direction to take given the current state of the game.
    fn new_direction(&mut self, snapshot: &GameSnapshot) -> Result<Direction>;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn new_direction(&mut self, snapshot: &GameSnapshot) -> Result<Direction> {
        (**self).new_direction(snapshot)
    }
}

/// Takes a uniformly random direction every tick.
pub struct RandomPolicy {
    rng: SmallRng,
}

impl RandomPolicy {
    /// Constructs the policy with a seeded random number generator.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn new_direction(&mut self, _snapshot: &GameSnapshot) -> Result<Direction> {
        Ok(Direction::random(&mut self.rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Frame;
    use std::collections::HashSet;

    #[test]
    fn test_random_policy_covers_all_directions() -> Result<()> {
        let snapshot = GameSnapshot::new(Frame::new(1, 1));
        let mut policy = RandomPolicy::new(42);
        let seen = (0..200)
            .map(|_| policy.new_direction(&snapshot))
            .collect::<Result<HashSet<_>>>()?;
        assert_eq!(seen.len(), Direction::COUNT);
        Ok(())
    }
}
