//! Batch analysis over historical odds tables

pub mod batch;
pub mod metrics;

pub use batch::{BatchAnalyzer, BatchError, BatchReport, SkippedRow, SurebetRow};
pub use metrics::{
    analyze_by_market, analyze_by_yield_range, calculate_metrics, BatchMetrics, DimensionAnalysis,
};
