mod common;

use common::{classification_config, regression_config, temp_dir};
use gnp_trainer::engines::generation::{Genome, GnpGenome, GnpPopulation, NodeKind, Population};
use gnp_trainer::error::GnpError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;

#[test]
fn test_random_genome_round_trip() {
    let config = regression_config();
    let dir = temp_dir("genome-round-trip");
    let mut rng = StdRng::seed_from_u64(3);

    for i in 0..5 {
        let mut genome = GnpGenome::new_random(&mut rng, &config);
        genome.set_fitness(0.25 * i as f64);
        let path = dir.path().join(format!("genome-{}.json", i));

        genome.serialize_to(&path).unwrap();
        let restored = GnpGenome::deserialize_from(&path, &config).unwrap();

        assert_eq!(restored, genome);
        assert_eq!(restored.fitness(), genome.fitness());
    }
}

#[test]
fn test_independent_genomes_differ() {
    let config = classification_config();
    let mut rng = StdRng::seed_from_u64(11);
    let a = GnpGenome::new_random(&mut rng, &config);
    let b = GnpGenome::new_random(&mut rng, &config);
    assert_ne!(a, b);
}

#[test]
fn test_population_round_trip() {
    let config = classification_config();
    let dir = temp_dir("population-round-trip");
    let population = GnpPopulation::new(&config, Some(5));
    let path = dir.path().join("population.json");

    population.serialize_to(&path).unwrap();
    let restored = GnpPopulation::deserialize_from(&path, &config).unwrap();

    assert_eq!(restored.len(), config.population_size());
    assert_eq!(restored, population);
    assert_ne!(restored, GnpPopulation::new(&config, Some(6)));
}

#[test]
fn test_non_finite_fitness_written_as_null() {
    let config = classification_config();
    let dir = temp_dir("non-finite");
    let mut genome = GnpGenome::new_random(&mut StdRng::seed_from_u64(1), &config);
    genome.set_fitness(f64::INFINITY);
    let path = dir.path().join("genome.json");

    genome.serialize_to(&path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"fitness\": null"));

    let restored = GnpGenome::deserialize_from(&path, &config).unwrap();
    assert_eq!(restored.fitness(), 0.0);
    assert_eq!(restored, genome);
}

#[test]
fn test_document_for_other_configuration_rejected() {
    let dir = temp_dir("mismatch");
    let genome = GnpGenome::new_random(&mut StdRng::seed_from_u64(2), &regression_config());
    let path = dir.path().join("genome.json");
    genome.serialize_to(&path).unwrap();

    assert!(matches!(
        GnpGenome::deserialize_from(&path, &classification_config()),
        Err(GnpError::Serialization(_))
    ));
}

#[test]
fn test_malformed_and_missing_documents() {
    let config = classification_config();
    let dir = temp_dir("malformed");
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"genes\": [").unwrap();

    assert!(matches!(
        GnpGenome::deserialize_from(&path, &config),
        Err(GnpError::Serialization(_))
    ));
    assert!(matches!(
        GnpPopulation::deserialize_from(&dir.path().join("absent.json"), &config),
        Err(GnpError::Serialization(_))
    ));
}

#[test]
fn test_first_gene_is_initial() {
    let config = regression_config();
    let genome = GnpGenome::new_random(&mut StdRng::seed_from_u64(9), &config);
    assert_eq!(genome.genes().len(), config.num_nodes());
    assert!(matches!(genome.genes()[0].kind, NodeKind::Initial { .. }));
}
