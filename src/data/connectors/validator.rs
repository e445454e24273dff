use crate::error::{GnpError, Result};
use polars::prelude::*;

pub struct DataValidator;

impl DataValidator {
    /// Column count must match the configured attributes
    pub fn validate_shape(df: &DataFrame, expected_columns: usize) -> Result<()> {
        if df.width() != expected_columns {
            return Err(GnpError::Dataset(format!(
                "Expected {} columns (inputs + output), found {}",
                expected_columns,
                df.width()
            )));
        }
        Ok(())
    }

    /// Check for minimum required rows
    pub fn validate_minimum_rows(df: &DataFrame, min_rows: usize) -> Result<()> {
        if df.height() == 0 {
            return Err(GnpError::EmptyDataset);
        }
        if df.height() < min_rows {
            return Err(GnpError::Dataset(format!(
                "Insufficient data: {} rows, minimum {} required",
                df.height(),
                min_rows
            )));
        }
        Ok(())
    }

    /// Null counts per column, only columns with nulls are listed
    pub fn check_nulls(df: &DataFrame) -> Vec<(String, usize)> {
        df.get_columns()
            .iter()
            .filter(|c| c.null_count() > 0)
            .map(|c| (c.name().to_string(), c.null_count()))
            .collect()
    }

    /// Removes rows where every column is null, as produced by blank lines.
    pub fn drop_blank_rows(df: &DataFrame) -> Result<DataFrame> {
        let mut columns = df.get_columns().iter();
        let Some(first) = columns.next() else {
            return Ok(df.clone());
        };
        let keep = columns.fold(first.as_materialized_series().is_not_null(), |keep, c| {
            keep | c.as_materialized_series().is_not_null()
        });
        if keep.all() {
            return Ok(df.clone());
        }

        let filtered = df.filter(&keep)?;
        log::debug!("Dropped {} blank rows", df.height() - filtered.height());
        Ok(filtered)
    }

    /// Every column must be fully populated
    pub fn validate_no_nulls(df: &DataFrame) -> Result<()> {
        let report = Self::check_nulls(df);
        if !report.is_empty() {
            return Err(GnpError::Dataset(format!(
                "Missing values detected: {:?}",
                report
            )));
        }
        Ok(())
    }
}
