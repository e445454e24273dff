use crate::error::{GnpError, Result};
use rand::distributions::WeightedIndex;
use rand::Rng;

/// True when a gene should be redrawn: always when forced, else with `rate`.
pub fn should_mutate<R: Rng>(rng: &mut R, rate: f64, force: bool) -> bool {
    force || rng.gen::<f64>() < rate
}

/// Uniform node index, never the initial node (0) and never `own_index`.
///
/// Requires `num_nodes >= 3`, which configuration validation guarantees.
pub fn random_target<R: Rng>(rng: &mut R, num_nodes: usize, own_index: usize) -> usize {
    if own_index == 0 {
        return rng.gen_range(1..num_nodes);
    }
    let target = rng.gen_range(1..num_nodes - 1);
    if target >= own_index {
        target + 1
    } else {
        target
    }
}

/// Uniform real in `[min, max)`, or `min` for a degenerate range.
pub fn random_numeric<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    if min < max {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Uniform category in `[min, max]`.
pub fn random_category<R: Rng>(rng: &mut R, min: i64, max: i64) -> i64 {
    if min < max {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

/// Fitness-proportional (roulette wheel) selection over `fitnesses`.
pub fn roulette_wheel(fitnesses: &[f64]) -> Result<WeightedIndex<f64>> {
    if let Some(bad) = fitnesses.iter().find(|f| !f.is_finite() || **f < 0.0) {
        return Err(GnpError::Selection(format!(
            "Fitness must be finite and non-negative, got {}",
            bad
        )));
    }
    if fitnesses.iter().sum::<f64>() <= 0.0 {
        return Err(GnpError::Selection("All fitness values are 0".to_string()));
    }
    WeightedIndex::new(fitnesses).map_err(|e| GnpError::Selection(e.to_string()))
}

/// Uniform crossover: each position comes from either parent with p = 0.5.
pub fn uniform_crossover<R: Rng, T: Clone>(rng: &mut R, parent1: &[T], parent2: &[T]) -> Vec<T> {
    parent1
        .iter()
        .zip(parent2)
        .map(|(a, b)| if rng.gen_bool(0.5) { a.clone() } else { b.clone() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::distributions::Distribution;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_target_excludes_initial_and_self() {
        let mut rng = StdRng::seed_from_u64(7);
        for own in 0..5 {
            for _ in 0..200 {
                let target = random_target(&mut rng, 5, own);
                assert!(target >= 1 && target < 5);
                assert_ne!(target, own);
            }
        }
    }

    #[test]
    fn test_random_target_reaches_every_candidate() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 4];
        for _ in 0..500 {
            seen[random_target(&mut rng, 4, 2)] = true;
        }
        assert_eq!(seen, [false, true, false, true]);
    }

    #[test]
    fn test_roulette_rejects_invalid_fitness() {
        assert!(roulette_wheel(&[0.0, 0.0]).is_err());
        assert!(roulette_wheel(&[0.5, -0.1]).is_err());
        assert!(roulette_wheel(&[0.5, f64::INFINITY]).is_err());
        assert!(roulette_wheel(&[]).is_err());
    }

    #[test]
    fn test_roulette_never_picks_zero_fitness() {
        let mut rng = StdRng::seed_from_u64(3);
        let wheel = roulette_wheel(&[0.0, 1.0, 0.0]).unwrap();
        for _ in 0..100 {
            assert_eq!(wheel.sample(&mut rng), 1);
        }
    }

    #[test]
    fn test_uniform_crossover_takes_from_parents() {
        let mut rng = StdRng::seed_from_u64(5);
        let child = uniform_crossover(&mut rng, &[1usize, 2, 3, 4], &[10usize, 20, 30, 40]);
        assert_eq!(child.len(), 4);
        for (i, gene) in child.iter().enumerate() {
            assert!(*gene == i + 1 || *gene == (i + 1) * 10);
        }
    }

    #[test]
    fn test_random_numeric_degenerate_range() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_numeric(&mut rng, 2.0, 2.0), 2.0);
        assert_eq!(random_category(&mut rng, 3, 3), 3);
    }
}
