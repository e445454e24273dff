pub mod training_runner;

pub use training_runner::{TrainingReport, TrainingRunner, Visualization};
