//! Core business logic modules

pub mod arbitrage;

// Re-export commonly used types
pub use arbitrage::{
    bookmaker_margin, calculate_surebet, implied_probability, round2, ArbitrageResult, BetType,
    OddsError, OddsSet, SurebetCalculator, DEFAULT_TOTAL_STAKE,
};
