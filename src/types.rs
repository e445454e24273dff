use crate::error::{GnpError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of learning task a run is scored against.
///
/// Classification fitness is an accuracy in [0, 1]; regression fitness is
/// `-ln(MSE / 10000)` and is unbounded. The two are never compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Classification,
    Regression,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Classification => "classification",
            TaskKind::Regression => "regression",
        }
    }

    pub fn is_regression(&self) -> bool {
        matches!(self, TaskKind::Regression)
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = GnpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "classification" => Ok(TaskKind::Classification),
            "regression" => Ok(TaskKind::Regression),
            other => Err(GnpError::Configuration(format!(
                "Unknown task '{}' (expected classification or regression)",
                other
            ))),
        }
    }
}

/// One (input, expected output) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub input: Vec<f64>,
    /// Class index for classification, target value for regression.
    pub expected: f64,
}

impl Sample {
    pub fn new(input: Vec<f64>, expected: f64) -> Self {
        Self { input, expected }
    }
}

/// Ordered, read-only training data.
///
/// Never empty and every input has the same width.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn new(samples: Vec<Sample>) -> Result<Self> {
        let Some(first) = samples.first() else {
            return Err(GnpError::EmptyDataset);
        };

        let width = first.input.len();
        if let Some((row, sample)) = samples
            .iter()
            .enumerate()
            .find(|(_, s)| s.input.len() != width)
        {
            return Err(GnpError::Dataset(format!(
                "Row {} has {} inputs, expected {}",
                row,
                sample.input.len(),
                width
            )));
        }

        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn input_width(&self) -> usize {
        self.samples.first().map(|s| s.input.len()).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Mean of the squared expected outputs; the loss of an all-zero estimator.
    pub fn mean_squared_expected(&self) -> f64 {
        self.samples.iter().map(|s| s.expected * s.expected).sum::<f64>() / self.len() as f64
    }
}
