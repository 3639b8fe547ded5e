//! Batch Metrics
//!
//! Summarize surebet rows: hit rate, yield statistics, breakdowns.

use super::batch::SurebetRow;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Batch evaluation metrics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchMetrics {
    pub total_rows: usize,
    pub surebet_rows: usize,
    pub hit_rate: f64,

    // Yield, in percent
    pub avg_yield: f64,
    pub max_yield: f64,
    pub min_yield: f64,

    pub total_profit: f64,
    /// Row index with the highest yield
    pub best_row: Option<usize>,
}

/// Calculate metrics from surebet rows
pub fn calculate_metrics(hits: &[SurebetRow], total_rows: usize) -> BatchMetrics {
    if hits.is_empty() {
        return BatchMetrics {
            total_rows,
            ..Default::default()
        };
    }

    let surebet_rows = hits.len();
    let hit_rate = if total_rows > 0 {
        surebet_rows as f64 / total_rows as f64
    } else {
        0.0
    };

    let avg_yield = hits.iter().map(|h| h.yield_percent).sum::<f64>() / surebet_rows as f64;
    let max_yield = hits
        .iter()
        .map(|h| h.yield_percent)
        .fold(f64::NEG_INFINITY, f64::max);
    let min_yield = hits
        .iter()
        .map(|h| h.yield_percent)
        .fold(f64::INFINITY, f64::min);
    let total_profit = hits.iter().map(|h| h.profit).sum();

    // First row wins ties
    let best_row = hits
        .iter()
        .fold(None::<&SurebetRow>, |best, h| match best {
            Some(b) if b.yield_percent >= h.yield_percent => Some(b),
            _ => Some(h),
        })
        .map(|h| h.row_index);

    BatchMetrics {
        total_rows,
        surebet_rows,
        hit_rate,
        avg_yield,
        max_yield,
        min_yield,
        total_profit,
        best_row,
    }
}

/// Analysis results by dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionAnalysis {
    pub key: String,
    pub rows: usize,
    pub total_profit: f64,
    pub avg_yield: f64,
    pub max_yield: f64,
}

fn summarize(grouped: HashMap<String, Vec<&SurebetRow>>) -> Vec<DimensionAnalysis> {
    let mut results: Vec<DimensionAnalysis> = grouped
        .into_iter()
        .map(|(key, group)| {
            let rows = group.len();
            let total_profit = group.iter().map(|h| h.profit).sum();
            let avg_yield = group.iter().map(|h| h.yield_percent).sum::<f64>() / rows as f64;
            let max_yield = group
                .iter()
                .map(|h| h.yield_percent)
                .fold(f64::NEG_INFINITY, f64::max);

            DimensionAnalysis {
                key,
                rows,
                total_profit,
                avg_yield,
                max_yield,
            }
        })
        .collect();

    results.sort_by(|a, b| a.key.cmp(&b.key));
    results
}

/// Analyze surebets by market shape (2-way / 3-way)
pub fn analyze_by_market(hits: &[SurebetRow]) -> Vec<DimensionAnalysis> {
    let mut grouped: HashMap<String, Vec<&SurebetRow>> = HashMap::new();
    for hit in hits {
        grouped
            .entry(format!("{}-way", hit.outcomes))
            .or_default()
            .push(hit);
    }
    summarize(grouped)
}

/// Analyze surebets by yield range
pub fn analyze_by_yield_range(hits: &[SurebetRow]) -> Vec<DimensionAnalysis> {
    let mut grouped: HashMap<String, Vec<&SurebetRow>> = HashMap::new();
    for hit in hits {
        let key = if hit.yield_percent < 1.0 {
            "low (<1%)"
        } else if hit.yield_percent < 3.0 {
            "mid (1-3%)"
        } else {
            "high (>=3%)"
        };
        grouped.entry(key.to_string()).or_default().push(hit);
    }
    summarize(grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_hits() -> Vec<SurebetRow> {
        vec![
            SurebetRow {
                row_index: 1,
                outcomes: 2,
                profit: 5.0,
                yield_percent: 5.0,
            },
            SurebetRow {
                row_index: 3,
                outcomes: 3,
                profit: 0.18,
                yield_percent: 0.18,
            },
            SurebetRow {
                row_index: 7,
                outcomes: 3,
                profit: 1.5,
                yield_percent: 1.5,
            },
        ]
    }

    #[test]
    fn test_calculate_metrics() {
        let hits = create_test_hits();
        let metrics = calculate_metrics(&hits, 10);

        assert_eq!(metrics.total_rows, 10);
        assert_eq!(metrics.surebet_rows, 3);
        assert!((metrics.hit_rate - 0.3).abs() < 1e-9);
        assert!((metrics.avg_yield - 2.2267).abs() < 0.001);
        assert_eq!(metrics.max_yield, 5.0);
        assert_eq!(metrics.min_yield, 0.18);
        assert!((metrics.total_profit - 6.68).abs() < 1e-9);
        assert_eq!(metrics.best_row, Some(1));
    }

    #[test]
    fn test_calculate_metrics_empty() {
        let metrics = calculate_metrics(&[], 4);

        assert_eq!(metrics.total_rows, 4);
        assert_eq!(metrics.surebet_rows, 0);
        assert_eq!(metrics.hit_rate, 0.0);
        assert_eq!(metrics.best_row, None);
    }

    #[test]
    fn test_best_row_tie_keeps_first() {
        let mut hits = create_test_hits();
        hits[2].yield_percent = 5.0;
        let metrics = calculate_metrics(&hits, 3);
        assert_eq!(metrics.best_row, Some(1));
    }

    #[test]
    fn test_analyze_by_market() {
        let analysis = analyze_by_market(&create_test_hits());

        assert_eq!(analysis.len(), 2);
        assert_eq!(analysis[0].key, "2-way");
        assert_eq!(analysis[0].rows, 1);
        assert_eq!(analysis[1].key, "3-way");
        assert_eq!(analysis[1].rows, 2);
        assert!((analysis[1].total_profit - 1.68).abs() < 1e-9);
        assert_eq!(analysis[1].max_yield, 1.5);
    }

    #[test]
    fn test_analyze_by_yield_range() {
        let analysis = analyze_by_yield_range(&create_test_hits());

        // Sorted by key: high, low, mid
        assert_eq!(analysis.len(), 3);
        assert_eq!(analysis[0].key, "high (>=3%)");
        assert_eq!(analysis[1].key, "low (<1%)");
        assert_eq!(analysis[2].key, "mid (1-3%)");
        assert!(analysis.iter().all(|a| a.rows == 1));
    }
}
