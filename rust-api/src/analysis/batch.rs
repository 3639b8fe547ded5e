//! Batch Analysis
//!
//! Evaluate every row of a historical odds table with one shared total stake
//! and collect the rows that were surebets.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::metrics::{calculate_metrics, BatchMetrics};
use crate::core::{round2, OddsError, SurebetCalculator};
use crate::data::{LoadError, OddsTable};
use crate::models::OddsRow;

/// Batch analysis errors
#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Odds(#[from] OddsError),
}

/// A row that turned out to be a surebet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurebetRow {
    pub row_index: usize,
    pub outcomes: usize,
    pub profit: f64,        // Rounded to 2 decimals
    pub yield_percent: f64, // Rounded to 2 decimals
}

/// A row that could not be evaluated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub row_index: usize,
    pub reason: String,
}

/// Batch analysis result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub total_stake: f64,
    pub total_rows: usize,
    pub hits: Vec<SurebetRow>,
    pub no_arbitrage_rows: usize,
    pub skipped: Vec<SkippedRow>,
    pub metrics: Option<BatchMetrics>,
}

impl BatchReport {
    pub fn new(total_stake: f64) -> Self {
        Self {
            total_stake,
            total_rows: 0,
            hits: Vec::new(),
            no_arbitrage_rows: 0,
            skipped: Vec::new(),
            metrics: None,
        }
    }

    pub fn total_profit(&self) -> f64 {
        self.hits.iter().map(|h| h.profit).sum()
    }

    pub fn finalize(&mut self) {
        self.metrics = Some(calculate_metrics(&self.hits, self.total_rows));
    }
}

impl Default for BatchReport {
    fn default() -> Self {
        Self::new(crate::core::DEFAULT_TOTAL_STAKE)
    }
}

/// Batch analyzer
pub struct BatchAnalyzer {
    calculator: SurebetCalculator,
}

impl BatchAnalyzer {
    pub fn new(calculator: SurebetCalculator) -> Self {
        Self { calculator }
    }

    pub fn total_stake(&self) -> f64 {
        self.calculator.total_stake
    }

    /// Evaluate rows in order
    ///
    /// Rows without a surebet are counted but not kept. Rows with invalid
    /// odds are reported in `skipped`. Only an invalid shared stake fails
    /// the whole batch.
    pub fn analyze(&self, rows: &[OddsRow]) -> Result<BatchReport, OddsError> {
        self.calculator.validate_stake()?;

        let mut report = BatchReport::new(self.calculator.total_stake);
        report.total_rows = rows.len();

        for row in rows {
            match self.calculator.evaluate(&row.odds) {
                Ok(Some(result)) => {
                    debug!(
                        "Row {}: surebet, yield {:.4}%",
                        row.row_index, result.yield_percent
                    );
                    report.hits.push(SurebetRow {
                        row_index: row.row_index,
                        outcomes: row.odds.len(),
                        profit: round2(result.profit),
                        yield_percent: round2(result.yield_percent),
                    });
                }
                Ok(None) => {
                    debug!("Row {}: no surebet", row.row_index);
                    report.no_arbitrage_rows += 1;
                }
                Err(e) => {
                    warn!("Row {} skipped: {}", row.row_index, e);
                    report.skipped.push(SkippedRow {
                        row_index: row.row_index,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report.finalize();

        info!(
            "Analyzed {} rows: {} surebets, {} without arbitrage, {} skipped",
            report.total_rows,
            report.hits.len(),
            report.no_arbitrage_rows,
            report.skipped.len()
        );

        Ok(report)
    }

    /// Evaluate every row of a loaded odds table
    pub fn analyze_table(&self, table: &OddsTable) -> Result<BatchReport, BatchError> {
        let rows = table.rows()?;
        Ok(self.analyze(&rows)?)
    }
}
