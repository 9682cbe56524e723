//! Learning agent.
mod base;
mod config;
mod explorer;
pub use base::DqnAgent;
pub use config::DqnAgentConfig;
pub use explorer::EpsilonGreedy;
