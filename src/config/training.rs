use super::traits::ConfigSection;
use crate::error::{GnpError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Run-level settings of the training loop and its artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub num_generations: usize,
    /// Parent of the timestamped per-run directories.
    pub results_dir: PathBuf,
    pub save_population: bool,
    pub parallel_evaluation: bool,
    pub plot_trajectories: bool,
    pub render_diagram: bool,
    /// Graphviz executable used to rasterize the best genome's diagram.
    pub dot_executable: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_generations: 100,
            results_dir: PathBuf::from("results"),
            save_population: false,
            parallel_evaluation: true,
            plot_trajectories: true,
            render_diagram: true,
            dot_executable: "dot".to_string(),
            seed: None,
        }
    }
}

impl ConfigSection for TrainingConfig {
    fn section_name() -> &'static str {
        "training"
    }

    fn validate(&self) -> Result<()> {
        if self.num_generations < 1 {
            return Err(GnpError::Configuration(
                "num_generations must be at least 1".to_string(),
            ));
        }
        if self.render_diagram && self.dot_executable.trim().is_empty() {
            return Err(GnpError::Configuration(
                "dot_executable must be set when render_diagram is enabled".to_string(),
            ));
        }
        Ok(())
    }
}
