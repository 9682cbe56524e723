use crate::{Direction, Observation};

/// Outcome of one decision tick: `(state, action, reward, next_state)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Observation the action was chosen on.
    pub state: Observation,

    /// Action taken.
    pub action: Direction,

    /// Reward assigned to the action on the following tick.
    pub reward: f32,

    /// Observation after the action.
    pub next_state: Observation,
}

impl Transition {
    /// Constructs a transition.
    pub fn new(state: Observation, action: Direction, reward: f32, next_state: Observation) -> Self {
        Self {
            state,
            action,
            reward,
            next_state,
        }
    }
}

/// Transitions laid out column-wise, the input of a training step.
#[derive(Debug, Clone, Default)]
pub struct TransitionBatch {
    /// Observations the actions were chosen on.
    pub states: Vec<Observation>,

    /// Actions taken.
    pub actions: Vec<Direction>,

    /// Rewards.
    pub rewards: Vec<f32>,

    /// Observations after the actions.
    pub next_states: Vec<Observation>,
}

impl TransitionBatch {
    /// The number of transitions in the batch.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if the batch holds no transition.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl FromIterator<Transition> for TransitionBatch {
    fn from_iter<I: IntoIterator<Item = Transition>>(iter: I) -> Self {
        let mut batch = Self::default();
        for tr in iter {
            batch.states.push(tr.state);
            batch.actions.push(tr.action);
            batch.rewards.push(tr.reward);
            batch.next_states.push(tr.next_state);
        }
        batch
    }
}
