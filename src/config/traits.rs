use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A named, self-validating section of the application configuration.
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<()>;
}
