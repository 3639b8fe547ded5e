//! Surebet - Arbitrage stake calculator
//!
//! This library provides:
//! - Surebet detection and stake distribution for 2-way and 3-way (1X2) markets
//! - Batch analysis over tables of historical odds
//! - CSV loading and result export utilities
//!
//! # Example
//!
//! ```
//! use surebet::core::SurebetCalculator;
//!
//! let calc = SurebetCalculator::new(100.0);
//! if let Some(result) = calc.evaluate(&[2.10, 2.10]).unwrap() {
//!     println!("Stakes: {:?}, profit: {:.2}", result.stakes, result.profit);
//! }
//! ```

pub mod analysis;
pub mod core;
pub mod data;
pub mod models;

// API-specific modules (only available with api feature)
#[cfg(feature = "api")]
pub mod error;
#[cfg(feature = "api")]
pub mod handlers;

// Re-export commonly used types
pub use analysis::{BatchAnalyzer, BatchReport, SurebetRow};
pub use crate::core::{
    calculate_surebet, ArbitrageResult, BetType, OddsError, OddsSet, SurebetCalculator,
};
pub use data::{LoadError, OddsTable};
pub use models::{OddsRow, SurebetRequest, SurebetResponse};
