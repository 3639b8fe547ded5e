//! CSV data loading for historical odds tables

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::OddsRow;

/// Text markers read as missing cells (the usual spreadsheet and pandas set)
pub const NA_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Errors raised while loading an odds table or writing results
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read CSV: {0}")]
    Polars(#[from] PolarsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("No numeric odds columns found")]
    NoOddsColumns,
}

/// Historical odds table
///
/// Each row holds the odds of one event, one column per outcome. Missing
/// cells are dropped per row, so a table with three odds columns can mix
/// 3-way rows with 2-way rows.
pub struct OddsTable {
    df: DataFrame,
    /// Odds columns, cast to Float64
    columns: Vec<Series>,
    /// Cells that were present but not numeric
    coerced_cells: usize,
}

impl OddsTable {
    /// Load a CSV, using every numeric column as an odds column
    pub fn load<P: AsRef<Path>>(csv_path: P) -> Result<Self, LoadError> {
        let df = Self::read_csv(csv_path.as_ref())?;
        Self::from_dataframe(df, None)
    }

    /// Load a CSV, using the named columns as odds columns
    ///
    /// Named columns holding text are coerced to numbers; cells that do not
    /// parse become missing.
    pub fn load_with_columns<P: AsRef<Path>>(
        csv_path: P,
        columns: &[String],
    ) -> Result<Self, LoadError> {
        let df = Self::read_csv(csv_path.as_ref())?;
        Self::from_dataframe(df, Some(columns))
    }

    fn read_csv(path: &Path) -> Result<DataFrame, LoadError> {
        if !path.exists() {
            return Err(LoadError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        }

        let null_values =
            NullValues::AllColumns(NA_MARKERS.iter().map(|m| m.to_string()).collect());
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_parse_options(CsvParseOptions::default().with_null_values(Some(null_values)))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;

        info!(
            "Loaded {} rows x {} columns from {:?}",
            df.height(),
            df.width(),
            path
        );
        Ok(df)
    }

    /// Build from an in-memory DataFrame
    pub fn from_dataframe(df: DataFrame, columns: Option<&[String]>) -> Result<Self, LoadError> {
        let selected: Vec<&Series> = match columns {
            Some(names) => {
                let mut selected = Vec::with_capacity(names.len());
                for name in names {
                    let series = df
                        .get_columns()
                        .iter()
                        .find(|s| s.name() == name.as_str())
                        .ok_or_else(|| LoadError::MissingColumn(name.clone()))?;
                    selected.push(series);
                }
                selected
            }
            None => {
                let (numeric, other): (Vec<&Series>, Vec<&Series>) = df
                    .get_columns()
                    .iter()
                    .partition(|s| s.dtype().is_numeric());
                for series in other {
                    warn!(
                        "Column '{}' ({}) is not numeric, not used as odds",
                        series.name(),
                        series.dtype()
                    );
                }
                numeric
            }
        };

        if selected.is_empty() {
            return Err(LoadError::NoOddsColumns);
        }

        let mut cast = Vec::with_capacity(selected.len());
        let mut coerced_cells = 0;
        for series in selected {
            let as_f64 = series.cast(&DataType::Float64)?;
            let lost = as_f64.null_count().saturating_sub(series.null_count());
            if lost > 0 {
                warn!(
                    "Column '{}': {} non-numeric cells treated as missing",
                    series.name(),
                    lost
                );
            }
            coerced_cells += lost;
            cast.push(as_f64);
        }

        debug!(
            "Odds columns: {:?}",
            cast.iter().map(|s| s.name().to_string()).collect::<Vec<_>>()
        );

        Ok(Self {
            df,
            columns: cast,
            coerced_cells,
        })
    }

    /// Names of the columns used as odds
    pub fn odds_columns(&self) -> Vec<String> {
        self.columns.iter().map(|s| s.name().to_string()).collect()
    }

    /// Number of cells that were present but could not be read as numbers
    pub fn coerced_cells(&self) -> usize {
        self.coerced_cells
    }

    /// First `n` rows of the raw table
    pub fn preview(&self, n: usize) -> DataFrame {
        self.df.head(Some(n))
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.df.height()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Extract odds per row, dropping missing cells
    ///
    /// Row indices are 1-based positions in the file, header excluded.
    pub fn rows(&self) -> Result<Vec<OddsRow>, LoadError> {
        let columns = self
            .columns
            .iter()
            .map(|s| s.f64())
            .collect::<Result<Vec<_>, _>>()?;

        let rows = (0..self.df.height())
            .map(|i| OddsRow {
                row_index: i + 1,
                odds: columns.iter().filter_map(|c| c.get(i)).collect(),
            })
            .collect();

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_numeric_columns() {
        let file = write_csv("Quote1,Quote2,Quote3\n2.5,3.2,3.5\n2.0,2.0,\n2.1,2.1,\n");
        let table = OddsTable::load(file.path()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.odds_columns(), vec!["Quote1", "Quote2", "Quote3"]);
        assert_eq!(table.coerced_cells(), 0);

        let rows = table.rows().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].row_index, 1);
        assert_eq!(rows[0].odds, vec![2.5, 3.2, 3.5]);
        // Missing third cell is dropped
        assert_eq!(rows[1].odds, vec![2.0, 2.0]);
        assert_eq!(rows[2].row_index, 3);
        assert_eq!(rows[2].odds, vec![2.1, 2.1]);
    }

    #[test]
    fn test_text_columns_ignored_by_default() {
        let file = write_csv("match,home,away\nA vs B,2.1,2.1\nC vs D,1.9,1.9\n");
        let table = OddsTable::load(file.path()).unwrap();

        assert_eq!(table.odds_columns(), vec!["home", "away"]);
        let rows = table.rows().unwrap();
        assert_eq!(rows[0].odds, vec![2.1, 2.1]);
    }

    #[test]
    fn test_named_columns_coerce_text() {
        let file = write_csv("home,draw,away\n2.5,closed,3.5\n3.1,3.4,3.3\n");
        let columns = vec!["home".to_string(), "draw".to_string(), "away".to_string()];
        let table = OddsTable::load_with_columns(file.path(), &columns).unwrap();

        assert_eq!(table.coerced_cells(), 1);
        let rows = table.rows().unwrap();
        assert_eq!(rows[0].odds, vec![2.5, 3.5]);
        assert_eq!(rows[1].odds, vec![3.1, 3.4, 3.3]);
    }

    #[test]
    fn test_na_markers_are_missing_cells() {
        let file = write_csv("Quote1,Quote2,Quote3\n2.1,2.1,NA\n2.5,3.2,3.5\nN/A,1.9,null\n");
        let table = OddsTable::load(file.path()).unwrap();

        assert_eq!(table.odds_columns(), vec!["Quote1", "Quote2", "Quote3"]);
        assert_eq!(table.coerced_cells(), 0);

        let rows = table.rows().unwrap();
        assert_eq!(rows[0].odds, vec![2.1, 2.1]);
        assert_eq!(rows[1].odds, vec![2.5, 3.2, 3.5]);
        assert_eq!(rows[2].odds, vec![1.9]);
    }

    #[test]
    fn test_missing_column() {
        let file = write_csv("home,away\n2.1,2.1\n");
        let columns = vec!["home".to_string(), "draw".to_string()];
        let result = OddsTable::load_with_columns(file.path(), &columns);

        assert!(matches!(result, Err(LoadError::MissingColumn(c)) if c == "draw"));
    }

    #[test]
    fn test_no_numeric_columns() {
        let file = write_csv("home,away\nfoo,bar\n");
        assert!(matches!(
            OddsTable::load(file.path()),
            Err(LoadError::NoOddsColumns)
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = OddsTable::load("/nonexistent/odds.csv");
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn test_preview() {
        let file = write_csv("a,b\n2.1,2.1\n2.2,2.2\n2.3,2.3\n");
        let table = OddsTable::load(file.path()).unwrap();
        assert_eq!(table.preview(2).height(), 2);
        assert!(!table.is_empty());
    }
}
