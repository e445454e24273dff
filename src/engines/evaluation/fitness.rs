use crate::engines::generation::Genome;
use crate::error::{GnpError, Result};
use crate::types::{Dataset, TaskKind};
use rayon::prelude::*;

/// Result of scoring one genome against the dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub fitness: f64,
    /// Mean squared error, regression only.
    pub loss: Option<f64>,
}

/// Scores genomes against a fixed dataset for one task.
///
/// Built once per run and shared by every generation. Scoring is a pure
/// function of the genome and the dataset, so a population can be scored in
/// parallel.
pub struct FitnessEvaluator<'a, C> {
    dataset: &'a Dataset,
    task: TaskKind,
    config: &'a C,
    parallel: bool,
}

impl<'a, C: Sync> FitnessEvaluator<'a, C> {
    pub fn new(dataset: &'a Dataset, task: TaskKind, config: &'a C) -> Self {
        Self {
            dataset,
            task,
            config,
            parallel: true,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn task(&self) -> TaskKind {
        self.task
    }

    pub fn config(&self) -> &'a C {
        self.config
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn evaluate<G: Genome<Config = C>>(&self, genome: &G) -> Result<f64> {
        Ok(self.score(genome)?.fitness)
    }

    pub fn score<G: Genome<Config = C>>(&self, genome: &G) -> Result<Evaluation> {
        if self.dataset.is_empty() {
            return Err(GnpError::EmptyDataset);
        }

        match self.task {
            TaskKind::Classification => {
                let mut num_correct = 0usize;
                for sample in self.dataset.iter() {
                    if let Some(estimation) = self.estimate(genome, &sample.input)? {
                        // Exact match against the class index, no tolerance.
                        if estimation == sample.expected {
                            num_correct += 1;
                        }
                    }
                }
                Ok(Evaluation {
                    fitness: num_correct as f64 / self.dataset.len() as f64,
                    loss: None,
                })
            }
            TaskKind::Regression => {
                let mse = self.loss(genome)?;
                Ok(Evaluation {
                    fitness: -(mse / 10000.0).ln(),
                    loss: Some(mse),
                })
            }
        }
    }

    /// Mean squared error; a missing estimation counts as 0.
    pub fn loss<G: Genome<Config = C>>(&self, genome: &G) -> Result<f64> {
        if self.dataset.is_empty() {
            return Err(GnpError::EmptyDataset);
        }

        let mut error = 0.0;
        for sample in self.dataset.iter() {
            let estimation = self.estimate(genome, &sample.input)?.unwrap_or(0.0);
            error += (estimation - sample.expected).powi(2);
        }
        Ok(error / self.dataset.len() as f64)
    }

    /// Scores every genome and assigns its fitness. All assignments are done
    /// when this returns; on error no statistics should be taken.
    pub fn score_population<G: Genome<Config = C>>(&self, genomes: &mut [G]) -> Result<Vec<Evaluation>> {
        let score_one = |genome: &mut G| -> Result<Evaluation> {
            let evaluation = self.score(genome)?;
            genome.set_fitness(evaluation.fitness);
            Ok(evaluation)
        };

        if self.parallel {
            genomes.par_iter_mut().map(score_one).collect()
        } else {
            genomes.iter_mut().map(score_one).collect()
        }
    }

    fn estimate<G: Genome<Config = C>>(&self, genome: &G, input: &[f64]) -> Result<Option<f64>> {
        let output = genome.activate(input, self.config)?;
        match output.as_slice() {
            [] => Ok(None),
            [value] => Ok(Some(*value)),
            _ => Err(GnpError::Evaluation(format!(
                "Activation produced {} values, expected at most one",
                output.len()
            ))),
        }
    }
}
