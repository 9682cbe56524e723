//! Action-value estimator owning its parameters.
mod base;
mod config;
pub use base::ValueEstimator;
pub use config::{NetworkShape, ValueEstimatorConfig};
