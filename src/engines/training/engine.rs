use super::best::BestIndividualTracker;
use super::progress::ProgressCallback;
use super::stats::{GenerationRecord, GenerationStatsRecorder};
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::{Genome, Population};
use crate::error::{GnpError, Result};
use crate::types::TaskKind;

type ConfigOf<P> = <<P as Population>::Genome as Genome>::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingState {
    Initialized,
    Running { generation: usize },
    Completed,
}

/// Everything a finished run leaves behind.
pub struct TrainingOutcome<P: Population> {
    pub task: TaskKind,
    pub history: Vec<GenerationRecord>,
    pub best: Option<P::Genome>,
    pub best_generation: Option<usize>,
    /// Population after the last advancement step.
    pub population: P,
}

/// Drives a fixed number of generations: evaluate, record, track the best,
/// report, advance. Any error aborts the run; statistics recorded before the
/// failure stay in the history.
pub struct TrainingEngine<'a, P: Population> {
    population: P,
    evaluator: FitnessEvaluator<'a, ConfigOf<P>>,
    num_generations: usize,
    recorder: GenerationStatsRecorder,
    tracker: BestIndividualTracker<P::Genome>,
    state: TrainingState,
}

impl<'a, P: Population> TrainingEngine<'a, P> {
    pub fn new(population: P, evaluator: FitnessEvaluator<'a, ConfigOf<P>>, num_generations: usize) -> Self {
        Self {
            population,
            evaluator,
            num_generations,
            recorder: GenerationStatsRecorder::new(),
            tracker: BestIndividualTracker::new(),
            state: TrainingState::Initialized,
        }
    }

    pub fn state(&self) -> TrainingState {
        self.state
    }

    pub fn run<C: ProgressCallback + ?Sized>(&mut self, callback: &mut C) -> Result<()> {
        if self.state != TrainingState::Initialized {
            return Err(GnpError::Configuration(format!(
                "Training cannot start from state {:?}",
                self.state
            )));
        }

        log::info!(
            "Training {} genomes for {} generations ({})",
            self.population.len(),
            self.num_generations,
            self.evaluator.task()
        );

        let config = self.evaluator.config();
        let regression = self.evaluator.task().is_regression();

        for generation in 0..self.num_generations {
            self.state = TrainingState::Running { generation };
            callback.on_generation_start(generation);

            let evaluations = self
                .evaluator
                .score_population(self.population.genomes_mut())?;

            let fitnesses = evaluations.iter().map(|e| e.fitness).collect();
            let losses = regression.then(|| evaluations.iter().filter_map(|e| e.loss).collect());
            let record = self.recorder.record(fitnesses, losses)?;

            if self.tracker.consider(generation, self.population.genomes()) {
                if let Some(fitness) = self.tracker.best_fitness() {
                    callback.on_best_improved(generation, fitness);
                }
            }

            callback.on_generation_complete(record);

            self.population.run(config)?;
        }

        self.state = TrainingState::Completed;
        log::info!(
            "Training completed, best fitness {:?} found in generation {:?}",
            self.tracker.best_fitness(),
            self.tracker.found_in_generation()
        );
        Ok(())
    }

    pub fn history(&self) -> &[GenerationRecord] {
        self.recorder.history()
    }

    pub fn recorder(&self) -> &GenerationStatsRecorder {
        &self.recorder
    }

    pub fn best(&self) -> Option<&P::Genome> {
        self.tracker.best()
    }

    pub fn population(&self) -> &P {
        &self.population
    }

    pub fn into_outcome(self) -> Result<TrainingOutcome<P>> {
        if self.state != TrainingState::Completed {
            return Err(GnpError::Configuration(format!(
                "Training outcome requested in state {:?}",
                self.state
            )));
        }

        Ok(TrainingOutcome {
            task: self.evaluator.task(),
            best_generation: self.tracker.found_in_generation(),
            best: self.tracker.into_best(),
            history: self.recorder.into_history(),
            population: self.population,
        })
    }
}
