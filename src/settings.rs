use crate::config;
use geocoder_core::settings::{FeatureSettings, SettingsProvider};
use std::path::PathBuf;

/// Feature settings that are read from the configuration file on demand.
#[derive(Debug, Clone)]
pub struct ConfigFileSettings {
    file_path: PathBuf,
}

impl ConfigFileSettings {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }
}

impl SettingsProvider for ConfigFileSettings {
    fn load_feature_settings(&self) -> FeatureSettings {
        config::load_feature_settings(&self.file_path).unwrap_or_else(|err| {
            log::warn!(
                "Unable to load the geocoding settings from {}: {err}",
                self.file_path.display()
            );
            FeatureSettings::default()
        })
    }
}
