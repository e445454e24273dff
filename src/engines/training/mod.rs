pub mod stats;
pub mod best;
pub mod progress;
pub mod engine;

pub use stats::{FitnessSummary, GenerationRecord, GenerationStatsRecorder, LossSummary};
pub use best::BestIndividualTracker;
pub use progress::{ConsoleProgressCallback, ProgressCallback, SilentProgressCallback};
pub use engine::{TrainingEngine, TrainingOutcome, TrainingState};
