mod common;

use common::{classification_config, regression_config, temp_dir};
use gnp_trainer::artifacts::{ArtifactOptions, ArtifactWriter, GraphvizRenderer};
use gnp_trainer::engines::evaluation::FitnessEvaluator;
use gnp_trainer::engines::generation::{Genome, GnpGenome, GnpPopulation, Population};
use gnp_trainer::engines::training::{
    GenerationRecord, ProgressCallback, SilentProgressCallback, TrainingEngine,
};
use gnp_trainer::error::Result;
use gnp_trainer::types::{Dataset, Sample, TaskKind};

/// Answers with a fixed value, or echoes the first input when `oracle` is set
#[derive(Debug, Clone)]
struct Stub {
    oracle: bool,
    answer: f64,
    fitness: f64,
}

impl Genome for Stub {
    type Config = ();

    fn activate(&self, input: &[f64], _config: &()) -> Result<Vec<f64>> {
        if self.oracle {
            Ok(vec![input[0]])
        } else {
            Ok(vec![self.answer])
        }
    }

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

/// Advancement leaves the genomes untouched
struct Unchanging {
    genomes: Vec<Stub>,
    advanced: usize,
}

impl Population for Unchanging {
    type Genome = Stub;

    fn genomes(&self) -> &[Stub] {
        &self.genomes
    }

    fn genomes_mut(&mut self) -> &mut [Stub] {
        &mut self.genomes
    }

    fn run(&mut self, _config: &()) -> Result<()> {
        self.advanced += 1;
        Ok(())
    }
}

#[derive(Default)]
struct Recording {
    started: Vec<usize>,
    completed: Vec<usize>,
    improvements: Vec<(usize, f64)>,
}

impl ProgressCallback for Recording {
    fn on_generation_start(&mut self, generation: usize) {
        self.started.push(generation);
    }

    fn on_generation_complete(&mut self, record: &GenerationRecord) {
        self.completed.push(record.generation);
    }

    fn on_best_improved(&mut self, generation: usize, fitness: f64) {
        self.improvements.push((generation, fitness));
    }
}

fn stub(answer: f64) -> Stub {
    Stub {
        oracle: false,
        answer,
        fitness: 0.0,
    }
}

/// Input is the class index itself, so echoing it is always right
fn echo_dataset() -> Dataset {
    Dataset::new(vec![
        Sample::new(vec![0.0], 0.0),
        Sample::new(vec![1.0], 1.0),
    ])
    .unwrap()
}

#[test]
fn test_perfect_genomes_reach_full_accuracy() {
    let dataset = echo_dataset();
    let population = Unchanging {
        genomes: (0..4)
            .map(|_| Stub {
                oracle: true,
                answer: 0.0,
                fitness: 0.0,
            })
            .collect(),
        advanced: 0,
    };
    let evaluator = FitnessEvaluator::new(&dataset, TaskKind::Classification, &());
    let mut engine = TrainingEngine::new(population, evaluator, 1);
    let mut progress = Recording::default();

    engine.run(&mut progress).unwrap();
    assert_eq!(engine.population().advanced, 1);

    let outcome = engine.into_outcome().unwrap();
    assert_eq!(outcome.history.len(), 1);
    assert_eq!(outcome.history[0].fitnesses, vec![1.0; 4]);
    assert_eq!(outcome.history[0].fitness.max, 1.0);
    assert_eq!(outcome.history[0].fitness.mean, 1.0);
    assert_eq!(outcome.history[0].fitness.variance, 0.0);
    assert!(outcome.history[0].loss.is_none());
    assert_eq!(outcome.best.unwrap().fitness(), 1.0);
    assert_eq!(progress.improvements, vec![(0, 1.0)]);
}

#[test]
fn test_unchanging_population_keeps_first_best() {
    let dataset = echo_dataset();
    let population = Unchanging {
        genomes: vec![stub(0.0), stub(1.0), stub(2.0)],
        advanced: 0,
    };
    let evaluator = FitnessEvaluator::new(&dataset, TaskKind::Classification, &());
    let mut engine = TrainingEngine::new(population, evaluator, 100);
    let mut progress = Recording::default();

    engine.run(&mut progress).unwrap();
    let first_best = engine.history()[0].fitness.max;
    assert_eq!(engine.population().advanced, 100);

    let outcome = engine.into_outcome().unwrap();
    assert_eq!(outcome.history.len(), 100);
    assert_eq!(outcome.history[99].fitness.max, first_best);
    assert_eq!(outcome.best_generation, Some(0));
    // Two genomes tie at 0.5; the earlier one is kept.
    assert_eq!(outcome.best.unwrap().answer, 0.0);

    assert_eq!(progress.started, (0..100).collect::<Vec<_>>());
    assert_eq!(progress.completed, (0..100).collect::<Vec<_>>());
    assert_eq!(progress.improvements, vec![(0, 0.5)]);
}

#[test]
fn test_regression_history_carries_losses() {
    let dataset = Dataset::new(vec![
        Sample::new(vec![0.0], 10.0),
        Sample::new(vec![1.0], 12.0),
    ])
    .unwrap();
    let population = Unchanging {
        genomes: vec![stub(11.0), stub(0.0)],
        advanced: 0,
    };
    let evaluator = FitnessEvaluator::new(&dataset, TaskKind::Regression, &());
    let mut engine = TrainingEngine::new(population, evaluator, 2);
    engine.run(&mut SilentProgressCallback).unwrap();

    let outcome = engine.into_outcome().unwrap();
    let record = &outcome.history[1];
    assert_eq!(record.losses.as_deref(), Some(&[1.0, 122.0][..]));
    assert_eq!(record.loss.unwrap().min, 1.0);
    assert_eq!(record.loss.unwrap().mean, 61.5);
    assert!((record.fitnesses[0] - 10000f64.ln()).abs() < 1e-12);
    assert_eq!(outcome.best.unwrap().answer, 11.0);
}

fn iris_like() -> Dataset {
    let rows = [
        (1.4, 0.2, 0.0),
        (1.3, 0.2, 0.0),
        (4.7, 1.4, 1.0),
        (4.5, 1.5, 1.0),
        (6.0, 2.5, 2.0),
        (5.1, 1.9, 2.0),
    ];
    Dataset::new(
        rows.iter()
            .map(|&(length, width, class)| Sample::new(vec![length, width], class))
            .collect(),
    )
    .unwrap()
}

/// Seeds whose first generation has no correct answer at all fail selection;
/// the first seed that trains through is used.
fn train_gnp(
    dataset: &Dataset,
    task: TaskKind,
    config: &gnp_trainer::config::GnpConfig,
    generations: usize,
) -> gnp_trainer::engines::training::TrainingOutcome<GnpPopulation> {
    (0..20u64)
        .find_map(|seed| {
            let population = GnpPopulation::new(config, Some(seed));
            let evaluator = FitnessEvaluator::new(dataset, task, config);
            let mut engine = TrainingEngine::new(population, evaluator, generations);
            engine.run(&mut SilentProgressCallback).ok()?;
            engine.into_outcome().ok()
        })
        .unwrap()
}

#[test]
fn test_gnp_classification_run() {
    let config = classification_config();
    let dataset = iris_like();
    let outcome = train_gnp(&dataset, TaskKind::Classification, &config, 5);

    assert_eq!(outcome.history.len(), 5);
    assert_eq!(outcome.population.len(), config.population_size());
    for record in &outcome.history {
        assert_eq!(record.fitnesses.len(), config.population_size());
        assert!((0.0..=1.0).contains(&record.fitness.max));
    }

    // Elites survive unchanged, so the best never gets worse.
    let maxima: Vec<f64> = outcome.history.iter().map(|r| r.fitness.max).collect();
    assert!(maxima.windows(2).all(|w| w[1] >= w[0]));

    let best = outcome.best.unwrap();
    let overall = maxima.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(best.fitness(), overall);
    assert!(best.check_structure(&config).is_ok());
}

#[test]
fn test_gnp_run_artifacts() {
    let config = classification_config();
    let dataset = iris_like();
    let outcome = train_gnp(&dataset, TaskKind::Classification, &config, 3);

    let results = temp_dir("artifacts");
    let run_dir = ArtifactWriter::create_run_directory(results.path()).unwrap();
    let writer = ArtifactWriter::new(
        ArtifactOptions {
            plot_trajectories: false,
            render_diagram: false,
            save_population: true,
        },
        GraphvizRenderer::default(),
    );
    let manifest = writer.write(&run_dir, &outcome, &config).unwrap();

    let best_path = manifest.best_genome.unwrap();
    let restored = GnpGenome::deserialize_from(&best_path, &config).unwrap();
    assert_eq!(&restored, outcome.best.as_ref().unwrap());

    let dot = std::fs::read_to_string(manifest.best_diagram_source.unwrap()).unwrap();
    assert!(dot.starts_with("digraph"));
    assert!(manifest.best_diagram_image.is_none());

    let population = GnpPopulation::deserialize_from(&manifest.population.unwrap(), &config).unwrap();
    assert_eq!(population, outcome.population);
    assert!(manifest.history.unwrap().exists());
}

#[test]
fn test_gnp_regression_run() {
    let config = regression_config();
    let dataset = Dataset::new(vec![
        Sample::new(vec![0.0, 0.45], 9.0),
        Sample::new(vec![1.0, 0.53], 11.0),
        Sample::new(vec![2.0, 0.2], 4.0),
        Sample::new(vec![0.0, 0.6], 14.0),
    ])
    .unwrap();
    let outcome = train_gnp(&dataset, TaskKind::Regression, &config, 4);

    for record in &outcome.history {
        let losses = record.losses.as_ref().unwrap();
        assert_eq!(losses.len(), config.population_size());
        assert!(losses.iter().all(|&l| l > 0.0));
        assert!(record.loss.unwrap().min <= record.loss.unwrap().mean);
    }
}
