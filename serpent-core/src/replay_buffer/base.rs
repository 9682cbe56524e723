//! Bounded FIFO replay memory with uniform sampling.
use super::{ReplayMemoryConfig, Transition, TransitionBatch};
use crate::error::SerpentError;
use anyhow::Result;
use rand::{rngs::StdRng, seq::index, SeedableRng};
use std::collections::VecDeque;

/// A bounded store of [`Transition`]s.
///
/// Insertion order is kept. Adding to a full memory evicts the oldest
/// transition. Sampling draws distinct transitions uniformly and leaves the
/// contents unchanged.
pub struct ReplayMemory {
    capacity: usize,
    buffer: VecDeque<Transition>,
    rng: StdRng,
}

impl ReplayMemory {
    /// Constructs an empty memory.
    pub fn build(config: &ReplayMemoryConfig) -> Result<Self> {
        if config.capacity == 0 {
            return Err(
                SerpentError::Configuration("capacity of replay memory must be positive".into())
                    .into(),
            );
        }
        Ok(Self {
            capacity: config.capacity,
            buffer: VecDeque::with_capacity(config.capacity.min(1 << 16)),
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    /// Appends a transition, evicting the oldest one when full.
    pub fn add(&mut self, transition: Transition) {
        if self.buffer.len() == self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(transition);
    }

    /// Draws `min(n, len)` distinct transitions uniformly at random.
    pub fn sample(&mut self, n: usize) -> Vec<Transition> {
        let amount = n.min(self.buffer.len());
        index::sample(&mut self.rng, self.buffer.len(), amount)
            .into_iter()
            .map(|ix| self.buffer[ix].clone())
            .collect()
    }

    /// Draws a batch of `min(n, len)` transitions, see [`ReplayMemory::sample`].
    pub fn batch(&mut self, n: usize) -> TransitionBatch {
        self.sample(n).into_iter().collect()
    }

    /// The number of stored transitions.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if no transition is stored.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Maximum number of stored transitions.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stored transitions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.buffer.iter()
    }
}
