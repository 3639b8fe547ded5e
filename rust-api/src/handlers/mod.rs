//! HTTP handlers

pub mod health;
pub mod surebet;

use crate::core::DEFAULT_TOTAL_STAKE;

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Stake used when a request does not name one
    pub default_stake: f64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            default_stake: DEFAULT_TOTAL_STAKE,
        }
    }
}
