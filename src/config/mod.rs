pub mod traits;
pub mod gnp;
pub mod training;
pub mod dataset;
pub mod manager;

pub use manager::{AppConfig, ConfigManager};
pub use gnp::{AttributeKind, DataAttribute, GnpConfig};
pub use training::TrainingConfig;
pub use dataset::DatasetConfig;
pub use traits::ConfigSection;
