//! Export of batch analysis results

use polars::prelude::*;
use std::fs::File;
use std::path::Path;

use super::csv_loader::LoadError;
use crate::analysis::{BatchReport, SurebetRow};

/// Convert surebet rows to a DataFrame
pub fn hits_to_dataframe(hits: &[SurebetRow]) -> PolarsResult<DataFrame> {
    let row_index: Vec<u64> = hits.iter().map(|h| h.row_index as u64).collect();
    let outcomes: Vec<u32> = hits.iter().map(|h| h.outcomes as u32).collect();
    let profit: Vec<f64> = hits.iter().map(|h| h.profit).collect();
    let yield_percent: Vec<f64> = hits.iter().map(|h| h.yield_percent).collect();

    df!(
        "row_index" => row_index,
        "outcomes" => outcomes,
        "profit" => profit,
        "yield_percent" => yield_percent
    )
}

/// Write surebet rows as CSV
pub fn write_hits_csv<P: AsRef<Path>>(hits: &[SurebetRow], path: P) -> Result<(), LoadError> {
    let mut df = hits_to_dataframe(hits)?;
    let mut file = File::create(path.as_ref())?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;

    Ok(())
}

/// Write the full report as pretty JSON
pub fn write_report_json<P: AsRef<Path>>(report: &BatchReport, path: P) -> Result<(), LoadError> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path.as_ref(), json)?;
    Ok(())
}
