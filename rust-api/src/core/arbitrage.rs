//! Surebet (Arbitrage) Stake Distribution
//!
//! Distribute a total stake across every outcome of an event so that the
//! payout is the same whichever outcome occurs.
//!
//! The allocation formula:
//!     implied = Σ 1/odds_i
//!     stake_i = (1/odds_i) / implied * total_stake
//!     profit  = min(stake_i * odds_i) - total_stake
//!
//! Where:
//!     odds_i  = decimal odds of outcome i (e.g., 2.10 means 2.1x return)
//!     implied = sum of implied probabilities (>= 1.0 means no surebet)

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of outcomes in a market
pub const MIN_OUTCOMES: usize = 2;

/// Maximum number of outcomes in a market (1X2)
pub const MAX_OUTCOMES: usize = 3;

/// Default total stake
pub const DEFAULT_TOTAL_STAKE: f64 = 100.0;

/// Input validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OddsError {
    #[error("expected 2 or 3 odds, got {0}")]
    WrongOutcomeCount(usize),

    #[error("odds for outcome {index} must be greater than 1.0, got {value}")]
    InvalidOdds { index: usize, value: f64 },

    #[error("total stake must be a positive amount, got {0}")]
    InvalidStake(f64),
}

/// Market shape, derived from the number of outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetType {
    /// Two outcomes (e.g. tennis)
    TwoWay,
    /// Three outcomes, 1X2 (e.g. football)
    ThreeWay,
}

impl BetType {
    pub fn from_outcome_count(count: usize) -> Option<Self> {
        match count {
            MIN_OUTCOMES => Some(BetType::TwoWay),
            MAX_OUTCOMES => Some(BetType::ThreeWay),
            _ => None,
        }
    }

    pub fn outcome_count(&self) -> usize {
        match self {
            BetType::TwoWay => 2,
            BetType::ThreeWay => 3,
        }
    }

    /// Display labels per outcome: "1", "X", "2" for 1X2 markets, "A1", "A2" otherwise
    pub fn labels(&self) -> Vec<String> {
        match self {
            BetType::TwoWay => vec!["A1".to_string(), "A2".to_string()],
            BetType::ThreeWay => vec!["1".to_string(), "X".to_string(), "2".to_string()],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BetType::TwoWay => "2-way",
            BetType::ThreeWay => "3-way",
        }
    }
}

/// Validated set of decimal odds, one per outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OddsSet(Vec<f64>);

impl OddsSet {
    /// Validate odds: 2 or 3 outcomes, each finite and greater than 1.0
    pub fn new(odds: &[f64]) -> Result<Self, OddsError> {
        if BetType::from_outcome_count(odds.len()).is_none() {
            return Err(OddsError::WrongOutcomeCount(odds.len()));
        }

        for (index, &value) in odds.iter().enumerate() {
            if !value.is_finite() || value <= 1.0 {
                return Err(OddsError::InvalidOdds { index, value });
            }
        }

        Ok(Self(odds.to_vec()))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bet_type(&self) -> BetType {
        // Length is checked in `new`
        if self.0.len() == MAX_OUTCOMES {
            BetType::ThreeWay
        } else {
            BetType::TwoWay
        }
    }
}

/// Stake distribution for a surebet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageResult {
    pub stakes: Vec<f64>,  // Same order as the odds
    pub payouts: Vec<f64>, // stake_i * odds_i
    pub profit: f64,
    pub yield_percent: f64,
    pub implied_probability: f64, // Σ 1/odds
}

/// Sum of implied probabilities (1/odds) across all outcomes
pub fn implied_probability(odds: &[f64]) -> f64 {
    odds.iter().map(|o| 1.0 / o).sum()
}

/// Bookmaker margin (overround). Negative values indicate a surebet.
pub fn bookmaker_margin(odds: &[f64]) -> f64 {
    implied_probability(odds) - 1.0
}

/// Round to 2 decimal places, ties to even
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Calculate surebet stake distribution
///
/// Does not validate its input; use [`SurebetCalculator::evaluate`] for
/// untrusted odds.
///
/// # Arguments
/// * `odds` - Decimal odds, one per outcome
/// * `total_stake` - Amount to distribute across all outcomes
///
/// # Returns
/// `None` when the implied probabilities sum to 1.0 or more (no surebet)
///
/// # Examples
/// ```
/// use surebet::core::arbitrage::calculate_surebet;
/// let result = calculate_surebet(&[2.10, 2.10], 100.0).unwrap();
/// assert!((result.profit - 5.0).abs() < 0.0001);
/// assert!(calculate_surebet(&[2.0, 2.0], 100.0).is_none());
/// ```
pub fn calculate_surebet(odds: &[f64], total_stake: f64) -> Option<ArbitrageResult> {
    let implied = implied_probability(odds);

    // Exactly 1.0 means zero profit, which is not a surebet
    if implied >= 1.0 {
        return None;
    }

    let stakes: Vec<f64> = odds
        .iter()
        .map(|o| (1.0 / o) / implied * total_stake)
        .collect();

    let payouts: Vec<f64> = stakes.iter().zip(odds).map(|(s, o)| s * o).collect();

    // Payouts are equal in exact arithmetic; take the lowest under rounding drift
    let min_payout = payouts.iter().copied().fold(f64::INFINITY, f64::min);
    let profit = min_payout - total_stake;
    let yield_percent = profit / total_stake * 100.0;

    Some(ArbitrageResult {
        stakes,
        payouts,
        profit,
        yield_percent,
        implied_probability: implied,
    })
}

/// Surebet calculator with a shared total stake
#[derive(Debug, Clone)]
pub struct SurebetCalculator {
    pub total_stake: f64,
}

impl SurebetCalculator {
    pub fn new(total_stake: f64) -> Self {
        Self { total_stake }
    }

    /// Create with the default stake (100.0)
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_TOTAL_STAKE)
    }

    /// Validate the stake and odds, then calculate
    ///
    /// Returns `Ok(None)` when there is no surebet; that is not an error.
    pub fn evaluate(&self, odds: &[f64]) -> Result<Option<ArbitrageResult>, OddsError> {
        self.validate_stake()?;
        let odds = OddsSet::new(odds)?;
        Ok(calculate_surebet(odds.as_slice(), self.total_stake))
    }

    pub fn validate_stake(&self) -> Result<(), OddsError> {
        if !self.total_stake.is_finite() || self.total_stake <= 0.0 {
            return Err(OddsError::InvalidStake(self.total_stake));
        }
        Ok(())
    }
}

impl Default for SurebetCalculator {
    fn default() -> Self {
        Self::with_defaults()
    }
}
