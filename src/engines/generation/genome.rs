//! Genetic Network Programming genome
//!
//! A genome is a directed graph of nodes stored as a flat gene vector. Gene 0
//! is the initial node, followed by the category judgement nodes, the numeric
//! judgement nodes and finally the processing nodes. Each gene records the
//! index of the gene(s) it transitions to, so crossover can swap genes
//! position by position without breaking the graph.
//!
//! # Activation
//!
//! Starting from the initial node with a budget of `time_limit`, every visited
//! node consumes its delay. Processing nodes additionally emit their value
//! vector. The activation stops once the budget is exhausted, so the output
//! holds `k * output_attributes.len()` values for some `k >= 0`.
use super::diagram::render_dot;
use super::node::NodeGene;
use super::operators::uniform_crossover;
use super::persist::{finite_or_null, load_json, save_json};
use super::traits::{Diagram, Genome};
use crate::config::GnpConfig;
use crate::error::{GnpError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GnpGenome {
    #[serde(with = "finite_or_null", default)]
    pub fitness: f64,
    genes: Vec<NodeGene>,
}

impl PartialEq for GnpGenome {
    // Fitness is an evaluation result, not part of the genome's identity.
    fn eq(&self, other: &Self) -> bool {
        self.genes == other.genes
    }
}

impl GnpGenome {
    /// Gene layout for `config` with every gene still unset.
    fn allocate(config: &GnpConfig) -> Vec<NodeGene> {
        let mut genes = Vec::with_capacity(config.num_nodes());
        genes.push(NodeGene::initial());
        for _ in 0..config.num_category_judgement_nodes {
            genes.push(NodeGene::category_judgement(genes.len(), config));
        }
        for _ in 0..config.num_numeric_judgement_nodes {
            genes.push(NodeGene::numeric_judgement(genes.len(), config));
        }
        for _ in 0..config.num_processing_nodes {
            genes.push(NodeGene::processing(genes.len(), config));
        }
        genes
    }

    pub fn new_random<R: Rng>(rng: &mut R, config: &GnpConfig) -> Self {
        let mut genes = Self::allocate(config);
        for gene in genes.iter_mut() {
            gene.mutate(rng, config, true);
        }
        Self {
            fitness: 0.0,
            genes,
        }
    }

    /// Wraps existing genes after checking them against `config`.
    pub fn from_genes(genes: Vec<NodeGene>, config: &GnpConfig) -> Result<Self> {
        let genome = Self {
            fitness: 0.0,
            genes,
        };
        genome.check_structure(config)?;
        Ok(genome)
    }

    pub fn crossover<R: Rng>(rng: &mut R, parent1: &Self, parent2: &Self) -> Self {
        Self {
            fitness: 0.0,
            genes: uniform_crossover(rng, &parent1.genes, &parent2.genes),
        }
    }

    pub fn mutate<R: Rng>(&mut self, rng: &mut R, config: &GnpConfig) {
        for gene in self.genes.iter_mut() {
            gene.mutate(rng, config, false);
        }
    }

    pub fn genes(&self) -> &[NodeGene] {
        &self.genes
    }

    pub fn check_structure(&self, config: &GnpConfig) -> Result<()> {
        if self.genes.len() != config.num_nodes() {
            return Err(GnpError::Serialization(format!(
                "Genome has {} genes, configuration expects {}",
                self.genes.len(),
                config.num_nodes()
            )));
        }

        let template = Self::allocate(config);
        for (position, (gene, expected)) in self.genes.iter().zip(&template).enumerate() {
            if gene.kind_name() != expected.kind_name() {
                return Err(GnpError::Serialization(format!(
                    "Gene {} is a {} node, configuration expects {}",
                    position,
                    gene.kind_name(),
                    expected.kind_name()
                )));
            }
            gene.check(position, config)?;
        }
        Ok(())
    }

    pub fn serialize_to(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    pub fn deserialize_from(path: &Path, config: &GnpConfig) -> Result<Self> {
        let genome: Self = load_json(path)?;
        genome.check_structure(config)?;
        Ok(genome)
    }

    /// Writes the Graphviz source of this genome to `path`.
    pub fn savefig(&self, path: &Path, config: &GnpConfig) -> Result<()> {
        fs::write(path, self.to_dot(config)?)?;
        Ok(())
    }
}

impl Genome for GnpGenome {
    type Config = GnpConfig;

    fn activate(&self, input: &[f64], config: &GnpConfig) -> Result<Vec<f64>> {
        if input.len() != config.input_attributes.len() {
            return Err(GnpError::Activation(format!(
                "Input has {} values, {} input attributes are configured",
                input.len(),
                config.input_attributes.len()
            )));
        }

        let mut outputs = Vec::new();
        let mut remaining = config.time_limit;
        let mut current = 0;

        while remaining > 0.0 {
            let node = self.genes.get(current).ok_or_else(|| {
                GnpError::Activation(format!("Transition to missing node {}", current))
            })?;
            if let Some(value) = node.output() {
                outputs.extend_from_slice(value);
            }
            remaining -= node.delay;
            current = node.next(input)?;
        }

        Ok(outputs)
    }

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl Diagram for GnpGenome {
    fn to_dot(&self, config: &GnpConfig) -> Result<String> {
        render_dot(&self.genes, config)
    }
}
