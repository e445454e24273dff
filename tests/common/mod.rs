#![allow(dead_code)]

use gnp_trainer::config::{DataAttribute, GnpConfig};
use tempfile::TempDir;

/// Empty directory removed when the guard drops
pub fn temp_dir(name: &str) -> TempDir {
    tempfile::Builder::new()
        .prefix(&format!("gnp-trainer-it-{}-", name))
        .tempdir()
        .unwrap()
}

/// Iris-like layout: two numeric measurements, a labelled species output
pub fn classification_config() -> GnpConfig {
    GnpConfig {
        num_genomes: 10,
        num_elites: 2,
        num_category_judgement_nodes: 0,
        num_numeric_judgement_nodes: 6,
        num_processing_nodes: 4,
        num_branches: 2,
        crossover_rate: 0.4,
        branch_mutation_rate: 0.05,
        data_source_mutation_rate: 0.05,
        judgement_function_mutation_rate: 0.05,
        output_mutation_rate: 0.05,
        time_limit: 10.0,
        delay_time_processing_node: 10.0,
        delay_time_judgement_node: 1.0,
        input_attributes: vec![
            DataAttribute::numeric("petal length", 1.0, 7.0),
            DataAttribute::numeric("petal width", 0.0, 2.5),
        ],
        output_attributes: vec![DataAttribute::category(
            "species",
            vec!["setosa", "versicolor", "virginica"],
        )],
    }
}

/// Abalone-like layout: labelled sex, one measurement, numeric ring count
pub fn regression_config() -> GnpConfig {
    GnpConfig {
        num_category_judgement_nodes: 3,
        num_numeric_judgement_nodes: 4,
        num_processing_nodes: 5,
        num_branches: 3,
        input_attributes: vec![
            DataAttribute::category("sex", vec!["M", "F", "I"]),
            DataAttribute::numeric("length", 0.0, 1.0),
        ],
        output_attributes: vec![DataAttribute::numeric("rings", 1.0, 29.0)],
        ..classification_config()
    }
}
