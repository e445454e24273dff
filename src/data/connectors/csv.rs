use crate::config::{DataAttribute, DatasetConfig, GnpConfig};
use crate::error::{GnpError, Result};
use crate::types::{Dataset, Sample, TaskKind};
use polars::prelude::*;
use std::path::Path;
use super::{
    types::{ColumnEncoding, DatasetMetadata},
    validator::DataValidator,
};

pub struct CsvConnector;

impl CsvConnector {
    /// Load a delimited file into a DataFrame
    pub fn load<P: AsRef<Path>>(path: P, options: &DatasetConfig) -> Result<DataFrame> {
        let path = path.as_ref();
        let parse_options = CsvParseOptions::default().with_separator(options.separator_byte()?);

        let df = CsvReadOptions::default()
            .with_has_header(options.has_header)
            .with_parse_options(parse_options)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()
            .map_err(|e| {
                GnpError::Dataset(format!("Failed to read {}: {}", path.display(), e))
            })?;

        log::debug!("Loaded {} rows x {} columns from {}", df.height(), df.width(), path.display());
        Ok(df)
    }

    /// Load a file and convert it to samples for `config`
    pub fn load_dataset<P: AsRef<Path>>(
        path: P,
        options: &DatasetConfig,
        config: &GnpConfig,
        task: TaskKind,
    ) -> Result<Dataset> {
        let df = Self::load(&path, options)?;
        let metadata = Self::create_metadata(&path, &df);
        log::debug!("Columns of {}: {:?}", metadata.file_path, metadata.columns);
        if !metadata.null_counts.is_empty() {
            log::warn!("{} has missing values: {:?}", metadata.file_path, metadata.null_counts);
        }

        let dataset = Self::to_dataset(&df, config, task)?;
        log::info!(
            "Dataset {}: {} samples, {} inputs",
            path.as_ref().display(),
            dataset.len(),
            dataset.input_width()
        );
        Ok(dataset)
    }

    pub fn create_metadata<P: AsRef<Path>>(path: P, df: &DataFrame) -> DatasetMetadata {
        DatasetMetadata {
            file_path: path.as_ref().to_string_lossy().to_string(),
            num_rows: df.height(),
            num_columns: df.width(),
            columns: df.get_column_names().iter().map(|s| s.to_string()).collect(),
            null_counts: DataValidator::check_nulls(df),
        }
    }

    /// Columns map positionally onto the input attributes followed by the
    /// single output attribute.
    /// Rows with no value at all are skipped.
    pub fn to_dataset(df: &DataFrame, config: &GnpConfig, task: TaskKind) -> Result<Dataset> {
        let output = Self::output_attribute(config, task)?;
        let df = &DataValidator::drop_blank_rows(df)?;

        let attributes: Vec<&DataAttribute> = config
            .input_attributes
            .iter()
            .chain(std::iter::once(output))
            .collect();

        DataValidator::validate_shape(df, attributes.len())?;
        DataValidator::validate_minimum_rows(df, 1)?;
        DataValidator::validate_no_nulls(df)?;

        let columns = df
            .get_columns()
            .iter()
            .zip(&attributes)
            .enumerate()
            .map(|(index, (column, attribute))| Self::encode_column(index, column, attribute))
            .collect::<Result<Vec<Vec<f64>>>>()?;

        let num_inputs = config.input_attributes.len();
        let samples = (0..df.height())
            .map(|row| {
                let input = columns[..num_inputs].iter().map(|c| c[row]).collect();
                Sample::new(input, columns[num_inputs][row])
            })
            .collect();

        Dataset::new(samples)
    }

    fn output_attribute(config: &GnpConfig, task: TaskKind) -> Result<&DataAttribute> {
        let [output] = config.output_attributes.as_slice() else {
            return Err(GnpError::Configuration(format!(
                "Exactly one output attribute is supported, {} configured",
                config.output_attributes.len()
            )));
        };

        match task {
            TaskKind::Classification if !output.is_category() => Err(GnpError::Configuration(format!(
                "Classification needs a category output, '{}' is numeric",
                output.name
            ))),
            TaskKind::Regression if !output.is_numeric() => Err(GnpError::Configuration(format!(
                "Regression needs a numeric output, '{}' is a category",
                output.name
            ))),
            _ => Ok(output),
        }
    }

    fn encoding(attribute: &DataAttribute) -> ColumnEncoding {
        if !attribute.is_category() {
            ColumnEncoding::Numeric
        } else if attribute.labels.is_empty() {
            ColumnEncoding::Category
        } else {
            ColumnEncoding::Labelled
        }
    }

    fn encode_column(index: usize, column: &Column, attribute: &DataAttribute) -> Result<Vec<f64>> {
        match Self::encoding(attribute) {
            ColumnEncoding::Labelled => {
                let text = column.cast(&DataType::String)?;
                text.str()?
                    .into_iter()
                    .map(|value| {
                        let value = value.unwrap_or_default().trim();
                        attribute
                            .label_index(value)
                            .map(|i| i as f64)
                            .ok_or_else(|| GnpError::UnknownCategory {
                                column: index,
                                value: value.to_string(),
                            })
                    })
                    .collect()
            }
            ColumnEncoding::Category => {
                let (min, max) = attribute.category_range();
                let values = column.cast(&DataType::Int64).map_err(|e| {
                    GnpError::Dataset(format!("Column {} is not an integer category: {}", index, e))
                })?;
                values
                    .i64()?
                    .into_iter()
                    .map(|value| match value {
                        Some(v) if (min..=max).contains(&v) => Ok(v as f64),
                        other => Err(GnpError::UnknownCategory {
                            column: index,
                            value: other.map(|v| v.to_string()).unwrap_or_default(),
                        }),
                    })
                    .collect()
            }
            ColumnEncoding::Numeric => {
                let values = column.cast(&DataType::Float64)?;
                values
                    .f64()?
                    .into_iter()
                    .enumerate()
                    .map(|(row, value)| {
                        value.ok_or_else(|| {
                            GnpError::Dataset(format!(
                                "Column {} row {} is not numeric",
                                index, row
                            ))
                        })
                    })
                    .collect()
            }
        }
    }
}
