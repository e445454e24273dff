//! Capability seams between the training core and the evolvable programs.
//!
//! The core never looks inside a genome: it activates it, reads and assigns
//! its fitness, and asks the population to advance one generation.

use crate::error::Result;

/// A single evolvable program.
pub trait Genome: Clone + Send + Sync {
    /// Shared, read-only context needed to run the program.
    type Config: Sync;

    /// Runs the program on one input vector.
    ///
    /// An empty result means the program produced no estimation.
    fn activate(&self, input: &[f64], config: &Self::Config) -> Result<Vec<f64>>;

    fn fitness(&self) -> f64;

    fn set_fitness(&mut self, fitness: f64);
}

/// A fixed-size, ordered collection of genomes evolved together.
pub trait Population {
    type Genome: Genome;

    fn genomes(&self) -> &[Self::Genome];

    fn genomes_mut(&mut self) -> &mut [Self::Genome];

    /// Selection, crossover and mutation; replaces genomes in place.
    fn run(&mut self, config: &<Self::Genome as Genome>::Config) -> Result<()>;

    fn len(&self) -> usize {
        self.genomes().len()
    }

    fn is_empty(&self) -> bool {
        self.genomes().is_empty()
    }
}

/// Genomes whose structure can be drawn as a Graphviz graph.
pub trait Diagram: Genome {
    fn to_dot(&self, config: &Self::Config) -> Result<String>;
}
