use crate::engines::generation::Genome;

/// Best genome seen so far in a run.
///
/// Holds a snapshot taken when the genome was found, so later generations
/// replacing the population cannot alter it. Only strictly greater fitness
/// replaces the incumbent; ties keep the earliest. NaN fitness is never
/// adopted, and a NaN incumbent counts as no incumbent.
#[derive(Debug, Clone)]
pub struct BestIndividualTracker<G> {
    best: Option<G>,
    found_in_generation: Option<usize>,
}

impl<G> Default for BestIndividualTracker<G> {
    fn default() -> Self {
        Self {
            best: None,
            found_in_generation: None,
        }
    }
}

impl<G: Genome> BestIndividualTracker<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans an evaluated generation. Returns true if the best changed.
    pub fn consider(&mut self, generation: usize, genomes: &[G]) -> bool {
        let mut candidate: Option<&G> = None;
        for genome in genomes.iter().filter(|g| !g.fitness().is_nan()) {
            let threshold = candidate
                .map(|c| c.fitness())
                .or_else(|| self.best_fitness().filter(|f| !f.is_nan()));
            match threshold {
                Some(fitness) if !(genome.fitness() > fitness) => {}
                _ => candidate = Some(genome),
            }
        }

        match candidate {
            Some(genome) => {
                self.best = Some(genome.clone());
                self.found_in_generation = Some(generation);
                true
            }
            None => false,
        }
    }

    pub fn best(&self) -> Option<&G> {
        self.best.as_ref()
    }

    pub fn best_fitness(&self) -> Option<f64> {
        self.best.as_ref().map(|g| g.fitness())
    }

    pub fn found_in_generation(&self) -> Option<usize> {
        self.found_in_generation
    }

    pub fn into_best(self) -> Option<G> {
        self.best
    }
}
