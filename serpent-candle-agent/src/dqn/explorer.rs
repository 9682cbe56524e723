//! Epsilon-greedy exploration.
use serde::{Deserialize, Serialize};

/// Linearly decaying epsilon-greedy explorer.
///
/// After `n` decays the exploration probability is
/// `max(eps_final, eps_start - n * eps_reduction)`.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EpsilonGreedy {
    /// Number of decays so far.
    pub n_opts: usize,

    /// Initial exploration probability.
    pub eps_start: f64,

    /// Floor of the exploration probability.
    pub eps_final: f64,

    /// Decrement per decay.
    pub eps_reduction: f64,
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self {
            n_opts: 0,
            eps_start: 1.0,
            eps_final: 0.001,
            eps_reduction: 0.000001,
        }
    }
}

impl EpsilonGreedy {
    /// Constructs epsilon-greedy explorer.
    pub fn new(eps_start: f64, eps_final: f64, eps_reduction: f64) -> Self {
        Self {
            n_opts: 0,
            eps_start,
            eps_final,
            eps_reduction,
        }
    }

    /// Current exploration probability.
    pub fn epsilon(&self) -> f64 {
        (self.eps_start - self.eps_reduction * self.n_opts as f64).max(self.eps_final)
    }

    /// Decays epsilon by one step and returns the new value.
    pub fn decay(&mut self) -> f64 {
        self.n_opts += 1;
        self.epsilon()
    }

    /// Whether a probability `p` drawn uniformly from `[0, 1]` selects the greedy action.
    pub fn is_greedy(&self, p: f64) -> bool {
        p > self.epsilon()
    }
}
