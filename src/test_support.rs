//! Fixtures shared by the unit tests.

use crate::config::{DataAttribute, GnpConfig};
use tempfile::TempDir;

/// Empty directory removed when the guard drops.
pub fn temp_dir(name: &str) -> TempDir {
    tempfile::Builder::new()
        .prefix(&format!("gnp-trainer-{}-", name))
        .tempdir()
        .unwrap()
}

/// Small mixed-type configuration: one category and one numeric input,
/// a two-class category output.
pub fn sample_gnp_config() -> GnpConfig {
    GnpConfig {
        num_genomes: 8,
        num_elites: 2,
        num_category_judgement_nodes: 2,
        num_numeric_judgement_nodes: 3,
        num_processing_nodes: 3,
        num_branches: 3,
        crossover_rate: 0.5,
        branch_mutation_rate: 0.1,
        data_source_mutation_rate: 0.1,
        judgement_function_mutation_rate: 0.1,
        output_mutation_rate: 0.1,
        time_limit: 10.0,
        delay_time_processing_node: 10.0,
        delay_time_judgement_node: 1.0,
        input_attributes: vec![
            DataAttribute::category("colour", vec!["red", "green", "blue"]),
            DataAttribute::numeric("size", 0.0, 10.0),
        ],
        output_attributes: vec![DataAttribute::category("class", vec!["small", "large"])],
    }
}
