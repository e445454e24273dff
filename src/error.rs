use thiserror::Error;

#[derive(Error, Debug)]
pub enum GnpError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Unknown category '{value}' in column {column}")]
    UnknownCategory { column: usize, value: String },

    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("Activation error: {0}")]
    Activation(String),

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error("Statistics error: {0}")]
    Statistics(String),

    #[error("Selection error: {0}")]
    Selection(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Format error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("Serde error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GnpError>;
