//! Errors in the library.
use thiserror::Error;

/// Errors raised by the serpent crates.
///
/// Public functions return [`anyhow::Result`]; the variants below are the
/// failures callers may want to tell apart with `downcast_ref`.
#[derive(Error, Debug, PartialEq)]
pub enum SerpentError {
    /// Invalid algorithm or network shape selector, invalid hyperparameter,
    /// or a checkpoint that does not match the selected network shape.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The loss of a training step is NaN or infinite.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// A learner was asked to train on a batch without transitions.
    #[error("Empty batch")]
    EmptyBatch,

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),
}
