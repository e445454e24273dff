use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gnp_trainer::config::{AppConfig, ConfigManager};
use gnp_trainer::services::TrainingRunner;
use gnp_trainer::types::TaskKind;
use std::path::{Path, PathBuf};

/// Generational trainer for Genetic Network Programming genomes
#[derive(Debug, Parser)]
#[command(name = "gnp-trainer")]
#[command(about = "Train GNP genomes on a delimited dataset")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a training session and write its artifacts
    Train {
        /// classification or regression
        task: TaskKind,

        /// Configuration file (TOML or JSON)
        config: PathBuf,

        #[command(flatten)]
        overrides: Overrides,
    },

    /// Draw a freshly initialized genome
    Visualize {
        /// Configuration file (TOML or JSON)
        config: PathBuf,

        /// Output directory for genome.dot and genome.png
        out_dir: PathBuf,
    },
}

/// Command-line values that replace configuration file settings
#[derive(Debug, Args)]
struct Overrides {
    /// Dataset file, overrides dataset.path
    #[arg(long)]
    data: Option<PathBuf>,

    /// Number of generations
    #[arg(long)]
    generations: Option<usize>,

    /// Parent directory of the run directories
    #[arg(long)]
    results: Option<PathBuf>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Also write population.json
    #[arg(long)]
    save_population: bool,

    /// Skip the Graphviz PNG
    #[arg(long)]
    no_render: bool,

    /// Skip the trajectory plots
    #[arg(long)]
    no_plots: bool,
}

impl Overrides {
    fn apply(self, config: &mut AppConfig) {
        if let Some(data) = self.data {
            config.dataset.path = Some(data);
        }
        if let Some(generations) = self.generations {
            config.training.num_generations = generations;
        }
        if let Some(results) = self.results {
            config.training.results_dir = results;
        }
        if self.seed.is_some() {
            config.training.seed = self.seed;
        }
        if self.save_population {
            config.training.save_population = true;
        }
        if self.no_render {
            config.training.render_diagram = false;
        }
        if self.no_plots {
            config.training.plot_trajectories = false;
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Train {
            task,
            config,
            overrides,
        } => {
            let mut manager = load(&config)?;
            manager.update(|c| overrides.apply(c))?;

            let runner = TrainingRunner::new(manager.into_inner())?;
            let report = runner.train(task)?;

            log::info!(
                "Finished {} generations of {}; best fitness {:?} (generation {:?})",
                report.generations,
                report.task,
                report.best_fitness,
                report.best_generation
            );
            println!("Results: {}", report.manifest.run_dir.display());
        }
        Command::Visualize { config, out_dir } => {
            let runner = TrainingRunner::new(load(&config)?.into_inner())?;
            let visualization = runner.visualize(&out_dir)?;

            println!("{}", visualization.dot.display());
            if let Some(png) = visualization.png {
                println!("{}", png.display());
            }
        }
    }
    Ok(())
}

fn load(path: &Path) -> Result<ConfigManager> {
    ConfigManager::load_from_file(path)
        .with_context(|| format!("Failed to load configuration {}", path.display()))
}
