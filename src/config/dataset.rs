use super::traits::ConfigSection;
use crate::error::{GnpError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Location and layout of the delimited dataset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub has_header: bool,
    pub separator: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: None,
            has_header: false,
            separator: ",".to_string(),
        }
    }
}

impl DatasetConfig {
    pub fn separator_byte(&self) -> Result<u8> {
        match self.separator.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(GnpError::Configuration(format!(
                "separator must be a single ASCII character, got '{}'",
                self.separator
            ))),
        }
    }
}

impl ConfigSection for DatasetConfig {
    fn section_name() -> &'static str {
        "dataset"
    }

    fn validate(&self) -> Result<()> {
        self.separator_byte().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_byte() {
        let config = DatasetConfig {
            separator: ";".to_string(),
            ..Default::default()
        };
        assert_eq!(config.separator_byte().unwrap(), b';');

        let config = DatasetConfig {
            separator: "::".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
