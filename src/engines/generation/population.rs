use super::genome::GnpGenome;
use super::operators::roulette_wheel;
use super::persist::{load_json, save_json};
use super::traits::{Genome, Population};
use crate::config::GnpConfig;
use crate::error::{GnpError, Result};
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn entropy_rng() -> StdRng {
    StdRng::from_entropy()
}

/// A fixed-size generation of GNP genomes together with the random source
/// driving its genetic operators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GnpPopulation {
    genomes: Vec<GnpGenome>,
    #[serde(skip, default = "entropy_rng")]
    rng: StdRng,
}

impl PartialEq for GnpPopulation {
    fn eq(&self, other: &Self) -> bool {
        self.genomes == other.genomes
    }
}

impl GnpPopulation {
    /// `num_genomes + num_elites` random genomes; the same seed yields the same population.
    pub fn new(config: &GnpConfig, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let seeds: Vec<u64> = (0..config.population_size()).map(|_| rng.gen()).collect();
        let genomes = seeds
            .into_par_iter()
            .map(|seed| GnpGenome::new_random(&mut StdRng::seed_from_u64(seed), config))
            .collect();

        log::debug!(
            "Initialized population of {} genomes ({} nodes each)",
            config.population_size(),
            config.num_nodes()
        );

        Self { genomes, rng }
    }

    pub fn from_genomes(genomes: Vec<GnpGenome>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { genomes, rng }
    }

    pub fn best(&self) -> Option<&GnpGenome> {
        self.genomes
            .iter()
            .reduce(|best, g| if g.fitness > best.fitness { g } else { best })
    }

    pub fn serialize_to(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    pub fn deserialize_from(path: &Path, config: &GnpConfig) -> Result<Self> {
        let population: Self = load_json(path)?;
        for (i, genome) in population.genomes.iter().enumerate() {
            genome.check_structure(config).map_err(|e| {
                GnpError::Serialization(format!("Genome {}: {}", i, e))
            })?;
        }
        Ok(population)
    }
}

impl Population for GnpPopulation {
    type Genome = GnpGenome;

    fn genomes(&self) -> &[GnpGenome] {
        &self.genomes
    }

    fn genomes_mut(&mut self) -> &mut [GnpGenome] {
        &mut self.genomes
    }

    /// Replaces the genomes with the next generation: crossover offspring,
    /// mutated copies and unchanged elites, in that order.
    fn run(&mut self, config: &GnpConfig) -> Result<()> {
        let fitnesses: Vec<f64> = self.genomes.iter().map(|g| g.fitness).collect();
        let wheel = roulette_wheel(&fitnesses)?;
        let parents = &self.genomes;

        let num_crossover = config.num_crossover_offspring();
        let num_mutants = config.num_genomes - num_crossover;

        let seeds: Vec<u64> = (0..config.num_genomes).map(|_| self.rng.gen()).collect();
        let mut offspring: Vec<GnpGenome> = seeds
            .into_par_iter()
            .enumerate()
            .map(|(i, seed)| {
                let mut rng = StdRng::seed_from_u64(seed);
                if i < num_crossover {
                    let parent1 = &parents[wheel.sample(&mut rng)];
                    let parent2 = &parents[wheel.sample(&mut rng)];
                    GnpGenome::crossover(&mut rng, parent1, parent2)
                } else {
                    let mut child = parents[wheel.sample(&mut rng)].clone();
                    child.mutate(&mut rng, config);
                    child
                }
            })
            .collect();

        let mut ranked: Vec<&GnpGenome> = parents.iter().collect();
        ranked.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        offspring.extend(ranked.into_iter().take(config.num_elites).cloned());

        log::debug!(
            "Advanced population: {} crossover, {} mutated, {} elites",
            num_crossover,
            num_mutants,
            config.num_elites.min(self.genomes.len())
        );

        self.genomes = offspring;
        Ok(())
    }
}
