// src/engines/training/stats.rs
use crate::error::{GnpError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessSummary {
    pub max: f64,
    pub mean: f64,
    /// Population variance (divides by n).
    pub variance: f64,
}

impl FitnessSummary {
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(GnpError::Statistics(
                "Cannot summarize an empty generation".to_string(),
            ));
        }

        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = Self::mean(values);
        let variance = values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;

        Ok(Self {
            max,
            mean,
            variance,
        })
    }

    fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossSummary {
    pub min: f64,
    pub mean: f64,
}

impl LossSummary {
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(GnpError::Statistics(
                "Cannot summarize empty losses".to_string(),
            ));
        }

        Ok(Self {
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            mean: FitnessSummary::mean(values),
        })
    }
}

/// Snapshot of one generation, taken right after evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub generation: usize,
    /// One value per genome, in population order.
    pub fitnesses: Vec<f64>,
    pub losses: Option<Vec<f64>>,
    pub fitness: FitnessSummary,
    pub loss: Option<LossSummary>,
}

/// Append-only per-generation history.
#[derive(Debug, Clone, Default)]
pub struct GenerationStatsRecorder {
    history: Vec<GenerationRecord>,
}

impl GenerationStatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarizes a generation and appends it. `losses`, when given, must have
    /// one value per fitness.
    pub fn record(&mut self, fitnesses: Vec<f64>, losses: Option<Vec<f64>>) -> Result<&GenerationRecord> {
        let fitness = FitnessSummary::from_values(&fitnesses)?;

        let loss = match &losses {
            Some(values) if values.len() != fitnesses.len() => {
                return Err(GnpError::Statistics(format!(
                    "{} loss values for {} fitness values",
                    values.len(),
                    fitnesses.len()
                )));
            }
            Some(values) => Some(LossSummary::from_values(values)?),
            None => None,
        };

        if let Some(previous) = self.history.last() {
            if previous.fitnesses.len() != fitnesses.len() {
                return Err(GnpError::Statistics(format!(
                    "Population size changed from {} to {}",
                    previous.fitnesses.len(),
                    fitnesses.len()
                )));
            }
        }

        self.history.push(GenerationRecord {
            generation: self.history.len(),
            fitnesses,
            losses,
            fitness,
            loss,
        });

        // Just pushed.
        Ok(&self.history[self.history.len() - 1])
    }

    pub fn history(&self) -> &[GenerationRecord] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn max_fitnesses(&self) -> Vec<f64> {
        self.history.iter().map(|r| r.fitness.max).collect()
    }

    pub fn mean_fitnesses(&self) -> Vec<f64> {
        self.history.iter().map(|r| r.fitness.mean).collect()
    }

    /// Empty unless every generation carried losses.
    pub fn min_losses(&self) -> Vec<f64> {
        self.history.iter().filter_map(|r| r.loss.map(|l| l.min)).collect()
    }

    pub fn mean_losses(&self) -> Vec<f64> {
        self.history.iter().filter_map(|r| r.loss.map(|l| l.mean)).collect()
    }

    pub fn into_history(self) -> Vec<GenerationRecord> {
        self.history
    }
}
