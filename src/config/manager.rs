use super::{
    dataset::DatasetConfig,
    gnp::GnpConfig,
    training::TrainingConfig,
    traits::ConfigSection,
};
use crate::error::{GnpError, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub gnp: GnpConfig,
    #[serde(default)]
    pub training: TrainingConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        validate_section(&self.gnp)?;
        validate_section(&self.training)?;
        validate_section(&self.dataset)?;
        Ok(())
    }
}

fn validate_section<S: ConfigSection>(section: &S) -> Result<()> {
    section.validate().map_err(|e| match e {
        GnpError::Configuration(message) => {
            GnpError::Configuration(format!("[{}] {}", S::section_name(), message))
        }
        other => other,
    })
}

/// Owns the validated application configuration.
///
/// Files are read with the `config` crate, so JSON and TOML both work and
/// `GNP__<SECTION>__<KEY>` environment variables override file values. A
/// document without a `gnp` table is read as a bare GNP configuration.
pub struct ConfigManager {
    config: AppConfig,
}

impl ConfigManager {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(File::from(path))
            .add_source(
                Environment::with_prefix("GNP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| {
                GnpError::Configuration(format!("Failed to read config {}: {}", path.display(), e))
            })?;

        let parse_error =
            |e: config::ConfigError| GnpError::Configuration(format!("Failed to parse config: {}", e));
        let config = if settings.get_table(GnpConfig::section_name()).is_ok() {
            settings.try_deserialize::<AppConfig>().map_err(parse_error)?
        } else {
            // Flat document: GNP keys at the root, other sections defaulted.
            let gnp = settings.try_deserialize::<GnpConfig>().map_err(parse_error)?;
            AppConfig {
                gnp,
                training: TrainingConfig::default(),
                dataset: DatasetConfig::default(),
            }
        };

        log::debug!("Loaded configuration from {}", path.display());
        Self::new(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let contents = if is_json {
            serde_json::to_string_pretty(&self.config)?
        } else {
            toml::to_string_pretty(&self.config)
                .map_err(|e| GnpError::Configuration(format!("Failed to serialize: {}", e)))?
        };

        std::fs::write(path, contents)
            .map_err(|e| GnpError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    pub fn into_inner(self) -> AppConfig {
        self.config
    }

    /// Applies `f` and keeps the result only if it still validates.
    pub fn update<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.config.clone();
        f(&mut candidate);
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }
}
