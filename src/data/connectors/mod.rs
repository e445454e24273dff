mod csv;
mod types;
mod validator;

pub use csv::CsvConnector;
pub use types::{ColumnEncoding, DatasetMetadata};
pub use validator::DataValidator;
