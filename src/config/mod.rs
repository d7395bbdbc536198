use anyhow::Result;
use geocoder_core::settings::{FeatureSettings, ProviderKind};
use geocoder_gateways::{nominatim, pdok};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

mod raw;

pub const DEFAULT_CONFIG_FILE_NAME: &str = "geocoder.toml";

const ENV_NAME_STORE_DIR: &str = "GEOCODER_STORE_DIR";

pub struct Config {
    pub store: Store,
    pub geocoding: FeatureSettings,
    pub gateway: Gateway,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path = file_path_or_default(file_path);
        let raw_config = read_raw_config(&file_path)?;
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(dir) = env::var(ENV_NAME_STORE_DIR) {
            cfg.store.dir = dir.into();
        }
        Ok(cfg)
    }
}

pub struct Store {
    /// File system directory of the JSON record files.
    pub dir: PathBuf,
}

pub struct Gateway {
    pub pdok_api_url: String,
    pub nominatim_api_url: String,
}

pub fn file_path_or_default<P: AsRef<Path>>(file_path: Option<P>) -> PathBuf {
    match file_path {
        Some(p) => p.as_ref().to_path_buf(),
        None => {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            PathBuf::from(DEFAULT_CONFIG_FILE_NAME)
        }
    }
}

fn read_raw_config(file_path: &Path) -> Result<raw::Config> {
    let raw_config = match fs::read_to_string(file_path) {
        Ok(cfg_string) => toml::from_str(&cfg_string)?,
        Err(err) => match err.kind() {
            ErrorKind::NotFound => {
                log::debug!(
                    "{} not found => load default configuration.",
                    file_path.display()
                );
                raw::Config::default()
            }
            _ => return Err(err.into()),
        },
    };
    Ok(raw_config)
}

/// Reads the `[geocoding]` section of the configuration file.
///
/// The file is read again on every call, so changes
/// take effect without restarting a running batch.
pub fn load_feature_settings(file_path: &Path) -> Result<FeatureSettings> {
    let raw::Config { geocoding, .. } = read_raw_config(file_path)?;
    feature_settings(geocoding.unwrap_or_default())
}

fn feature_settings(from: raw::Geocoding) -> Result<FeatureSettings> {
    let raw::Geocoding {
        auto_geocode,
        default_provider,
        fallback_to_nominatim,
        rate_limit_ms,
        overwrite_existing,
        dutch_country_values,
        nominatim_user_agent,
    } = from;
    let default_provider = default_provider
        .as_deref()
        .map(str::parse::<ProviderKind>)
        .transpose()?;
    Ok(FeatureSettings {
        auto_geocode,
        default_provider,
        fallback_to_nominatim,
        rate_limit_ms,
        overwrite_existing,
        dutch_country_values,
        nominatim_user_agent,
    })
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            store,
            geocoding,
            gateway,
        } = from;

        let raw::Store { dir } = store.unwrap_or_default();
        let store = Store { dir };

        let geocoding = feature_settings(geocoding.unwrap_or_default())?;

        let raw::Gateway { pdok, nominatim } = gateway.unwrap_or_default();
        let pdok_api_url = pdok
            .and_then(|api| api.api_url)
            .unwrap_or_else(|| pdok::DEFAULT_API_URL.to_owned());
        let nominatim_api_url = nominatim
            .and_then(|api| api.api_url)
            .unwrap_or_else(|| nominatim::DEFAULT_API_URL.to_owned());
        let gateway = Gateway {
            pdok_api_url,
            nominatim_api_url,
        };

        Ok(Self {
            store,
            geocoding,
            gateway,
        })
    }
}
