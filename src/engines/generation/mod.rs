pub mod traits;
pub mod operators;
pub mod node;
pub mod genome;
pub mod population;
pub mod diagram;
pub mod persist;

pub use traits::{Diagram, Genome, Population};
pub use node::{NodeGene, NodeKind};
pub use genome::GnpGenome;
pub use population::GnpPopulation;
pub use diagram::render_dot;
