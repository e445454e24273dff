use super::plot::{Series, TrajectoryPlot};
use super::render::GraphvizRenderer;
use crate::config::{GnpConfig, TrainingConfig};
use crate::engines::generation::{GnpGenome, GnpPopulation};
use crate::engines::generation::persist::save_json;
use crate::engines::training::{GenerationRecord, TrainingOutcome};
use crate::error::Result;
use crate::types::TaskKind;
use chrono::Local;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::ops::Range;
use std::path::{Path, PathBuf};

pub const FITNESS_PLOT: &str = "fitnesses.png";
pub const LOSS_PLOT: &str = "losses.png";
pub const BEST_GENOME: &str = "best-genome.json";
pub const BEST_DIAGRAM_SOURCE: &str = "best-genome.dot";
pub const BEST_DIAGRAM_IMAGE: &str = "best-genome.png";
pub const POPULATION: &str = "population.json";
pub const HISTORY: &str = "history.json";

/// Paths of everything written for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArtifactManifest {
    pub run_dir: PathBuf,
    pub fitness_plot: Option<PathBuf>,
    pub loss_plot: Option<PathBuf>,
    pub history: Option<PathBuf>,
    pub best_genome: Option<PathBuf>,
    pub best_diagram_source: Option<PathBuf>,
    pub best_diagram_image: Option<PathBuf>,
    pub population: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactOptions {
    pub plot_trajectories: bool,
    pub render_diagram: bool,
    pub save_population: bool,
}

impl Default for ArtifactOptions {
    fn default() -> Self {
        Self {
            plot_trajectories: true,
            render_diagram: true,
            save_population: false,
        }
    }
}

impl From<&TrainingConfig> for ArtifactOptions {
    fn from(config: &TrainingConfig) -> Self {
        Self {
            plot_trajectories: config.plot_trajectories,
            render_diagram: config.render_diagram,
            save_population: config.save_population,
        }
    }
}

/// Writes the artifacts of a finished run into a fresh directory.
///
/// Each artifact is an independent file. The first failure is returned and
/// files already written stay in place.
pub struct ArtifactWriter {
    options: ArtifactOptions,
    renderer: GraphvizRenderer,
}

impl ArtifactWriter {
    pub fn new(options: ArtifactOptions, renderer: GraphvizRenderer) -> Self {
        Self { options, renderer }
    }

    pub fn from_config(config: &TrainingConfig) -> Self {
        Self::new(
            ArtifactOptions::from(config),
            GraphvizRenderer::new(config.dot_executable.clone()),
        )
    }

    /// Creates `<results_dir>/<local timestamp with microseconds>`, adding a
    /// numeric suffix if that name is already taken.
    pub fn create_run_directory(results_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(results_dir)?;

        let stamp = Local::now().format("%Y-%m-%d_%H.%M.%S.%6f").to_string();
        let mut candidate = results_dir.join(&stamp);
        let mut suffix = 1;
        loop {
            match fs::create_dir(&candidate) {
                Ok(()) => return Ok(candidate),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    candidate = results_dir.join(format!("{}-{}", stamp, suffix));
                    suffix += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    pub fn write(
        &self,
        run_dir: &Path,
        outcome: &TrainingOutcome<GnpPopulation>,
        config: &GnpConfig,
    ) -> Result<ArtifactManifest> {
        let mut manifest = ArtifactManifest {
            run_dir: run_dir.to_path_buf(),
            ..Default::default()
        };

        // Genome files come before plots and rendering.
        match &outcome.best {
            Some(best) => self.write_best(run_dir, best, config, &mut manifest)?,
            None => log::warn!("No best individual recorded, skipping genome artifacts"),
        }

        let history_path = run_dir.join(HISTORY);
        save_json(&outcome.history, &history_path)?;
        manifest.history = Some(history_path);

        if self.options.plot_trajectories {
            manifest.fitness_plot = Some(self.write_fitness_plot(run_dir, &outcome.history, outcome.task)?);
            if outcome.task.is_regression() {
                manifest.loss_plot = Some(self.write_loss_plot(run_dir, &outcome.history)?);
            }
        }

        if let Some(dot_path) = &manifest.best_diagram_source {
            if self.options.render_diagram {
                let png_path = run_dir.join(BEST_DIAGRAM_IMAGE);
                self.renderer.render_png(dot_path, &png_path)?;
                manifest.best_diagram_image = Some(png_path);
            }
        }

        if self.options.save_population {
            let path = run_dir.join(POPULATION);
            outcome.population.serialize_to(&path)?;
            manifest.population = Some(path);
        }

        log::info!("Artifacts written to {}", run_dir.display());
        Ok(manifest)
    }

    fn write_fitness_plot(&self, run_dir: &Path, history: &[GenerationRecord], task: TaskKind) -> Result<PathBuf> {
        let max: Vec<f64> = history.iter().map(|r| r.fitness.max).collect();
        let mean: Vec<f64> = history.iter().map(|r| r.fitness.mean).collect();
        let path = run_dir.join(FITNESS_PLOT);

        TrajectoryPlot {
            caption: "Fitness",
            y_desc: "Fitness",
            series: vec![
                Series {
                    label: "max",
                    values: &max,
                },
                Series {
                    label: "mean",
                    values: &mean,
                },
            ],
            y_range: fitness_range(task),
        }
        .draw(&path)?;

        log::info!("Fitness plot: {}", path.display());
        Ok(path)
    }

    fn write_loss_plot(&self, run_dir: &Path, history: &[GenerationRecord]) -> Result<PathBuf> {
        let min: Vec<f64> = history.iter().filter_map(|r| r.loss.map(|l| l.min)).collect();
        let mean: Vec<f64> = history.iter().filter_map(|r| r.loss.map(|l| l.mean)).collect();
        let path = run_dir.join(LOSS_PLOT);

        TrajectoryPlot {
            caption: "Loss",
            y_desc: "Loss",
            series: vec![
                Series {
                    label: "min",
                    values: &min,
                },
                Series {
                    label: "mean",
                    values: &mean,
                },
            ],
            y_range: None,
        }
        .draw(&path)?;

        log::info!("Loss plot: {}", path.display());
        Ok(path)
    }

    fn write_best(
        &self,
        run_dir: &Path,
        best: &GnpGenome,
        config: &GnpConfig,
        manifest: &mut ArtifactManifest,
    ) -> Result<()> {
        let genome_path = run_dir.join(BEST_GENOME);
        best.serialize_to(&genome_path)?;
        log::info!("Best genome (fitness {:.6}): {}", best.fitness, genome_path.display());
        manifest.best_genome = Some(genome_path);

        let dot_path = run_dir.join(BEST_DIAGRAM_SOURCE);
        best.savefig(&dot_path, config)?;
        manifest.best_diagram_source = Some(dot_path);
        Ok(())
    }
}

/// Accuracy is plotted on a fixed axis; regression fitness is unbounded.
fn fitness_range(task: TaskKind) -> Option<Range<f64>> {
    match task {
        TaskKind::Classification => Some(0.0..1.0),
        TaskKind::Regression => None,
    }
}
