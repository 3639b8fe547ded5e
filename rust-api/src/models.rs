use serde::{Deserialize, Serialize};

use crate::core::{bookmaker_margin, ArbitrageResult, BetType};

/// One row of historical odds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsRow {
    /// 1-based position in the source table
    pub row_index: usize,
    pub odds: Vec<f64>,
}

impl OddsRow {
    /// Number rows 1..=n in input order
    pub fn from_odds_lists(rows: Vec<Vec<f64>>) -> Vec<Self> {
        rows.into_iter()
            .enumerate()
            .map(|(i, odds)| OddsRow {
                row_index: i + 1,
                odds,
            })
            .collect()
    }
}

/// Single calculation request
#[derive(Debug, Serialize, Deserialize)]
pub struct SurebetRequest {
    pub odds: Vec<f64>,
    #[serde(default)]
    pub total_stake: Option<f64>,
}

/// Single calculation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurebetResponse {
    pub found: bool,
    pub bet_type: Option<BetType>,
    pub labels: Vec<String>,
    pub total_stake: f64,
    pub margin: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ArbitrageResult>,
}

impl SurebetResponse {
    pub fn new(odds: &[f64], total_stake: f64, result: Option<ArbitrageResult>) -> Self {
        let bet_type = BetType::from_outcome_count(odds.len());
        Self {
            found: result.is_some(),
            bet_type,
            labels: bet_type.map(|b| b.labels()).unwrap_or_default(),
            total_stake,
            margin: bookmaker_margin(odds),
            result,
        }
    }
}

/// Batch calculation request
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchRequest {
    pub rows: Vec<Vec<f64>>,
    #[serde(default)]
    pub total_stake: Option<f64>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
