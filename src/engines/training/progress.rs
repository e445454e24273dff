use super::stats::GenerationRecord;

/// Observer of the training loop.
pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, record: &GenerationRecord);
    fn on_best_improved(&mut self, generation: usize, fitness: f64);
}

/// Prints one fixed-point line per generation.
pub struct ConsoleProgressCallback;

impl ConsoleProgressCallback {
    pub fn format_line(record: &GenerationRecord) -> String {
        format!(
            "[{}] best:{:.6} mean:{:.6} variance:{:.6}",
            record.generation, record.fitness.max, record.fitness.mean, record.fitness.variance
        )
    }
}

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("Generation {} starting", generation);
    }

    fn on_generation_complete(&mut self, record: &GenerationRecord) {
        println!("{}", Self::format_line(record));
        if let Some(loss) = record.loss {
            log::debug!("  loss min:{:.6} mean:{:.6}", loss.min, loss.mean);
        }
    }

    fn on_best_improved(&mut self, generation: usize, fitness: f64) {
        log::info!("New best individual in generation {}: fitness {:.6}", generation, fitness);
    }
}

/// Discards all progress events.
pub struct SilentProgressCallback;

impl ProgressCallback for SilentProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, _record: &GenerationRecord) {}

    fn on_best_improved(&mut self, _generation: usize, _fitness: f64) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::training::stats::FitnessSummary;

    #[test]
    fn test_console_line_format() {
        let record = GenerationRecord {
            generation: 7,
            fitnesses: vec![0.25, 0.75],
            losses: None,
            fitness: FitnessSummary::from_values(&[0.25, 0.75]).unwrap(),
            loss: None,
        };
        assert_eq!(
            ConsoleProgressCallback::format_line(&record),
            "[7] best:0.750000 mean:0.500000 variance:0.062500"
        );
    }
}
