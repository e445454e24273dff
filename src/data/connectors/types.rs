use serde::{Deserialize, Serialize};

/// Metadata about a loaded delimited file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub file_path: String,
    pub num_rows: usize,
    pub num_columns: usize,
    pub columns: Vec<String>,
    pub null_counts: Vec<(String, usize)>,
}

/// How a column's raw values become numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnEncoding {
    /// Text matched against the attribute's labels, replaced by the label index.
    Labelled,
    /// Integer category within the attribute's range.
    Category,
    Numeric,
}
