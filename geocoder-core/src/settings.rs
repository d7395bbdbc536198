use std::{collections::HashSet, fmt, str::FromStr, time::Duration};
use thiserror::Error;

pub const DEFAULT_RATE_LIMIT_MS: u64 = 1100;
pub const DEFAULT_DUTCH_COUNTRY_VALUES: &str = "Netherlands,Nederland,NL,";
pub const DEFAULT_USER_AGENT: &str = "MauticGeocoder/1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderKind {
    /// The Dutch national address registry (PDOK Locatieserver).
    #[default]
    National,
    /// The worldwide OpenStreetMap search (Nominatim).
    International,
}

impl ProviderKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::National => "pdok",
            Self::International => "nominatim",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown geocoding provider '{0}'")]
pub struct UnknownProvider(String);

impl FromStr for ProviderKind {
    type Err = UnknownProvider;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pdok" => Ok(Self::National),
            "nominatim" => Ok(Self::International),
            _ => Err(UnknownProvider(s.to_owned())),
        }
    }
}

/// The feature settings as stored by the host.
///
/// Every missing value falls back to its default,
/// i.e. `FeatureSettings::default()` describes a
/// freshly installed integration.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeatureSettings {
    pub auto_geocode          : Option<bool>,
    pub default_provider      : Option<ProviderKind>,
    pub fallback_to_nominatim : Option<bool>,
    pub rate_limit_ms         : Option<u64>,
    pub overwrite_existing    : Option<bool>,
    pub dutch_country_values  : Option<String>,
    pub nominatim_user_agent  : Option<String>,
}

impl FeatureSettings {
    pub fn is_enabled(&self) -> bool {
        self.auto_geocode.unwrap_or(true)
    }
}

/// Source of the feature settings.
///
/// The settings might change at any time and
/// must therefore be loaded again for each operation.
pub trait SettingsProvider {
    fn load_feature_settings(&self) -> FeatureSettings;
}

impl SettingsProvider for FeatureSettings {
    fn load_feature_settings(&self) -> FeatureSettings {
        self.clone()
    }
}

impl<S> SettingsProvider for &S
where
    S: SettingsProvider + ?Sized,
{
    fn load_feature_settings(&self) -> FeatureSettings {
        (**self).load_feature_settings()
    }
}

/// Configuration of a single geocoding operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub default_provider: ProviderKind,
    pub fallback_enabled: bool,
    pub rate_limit: Duration,
    pub overwrite_existing: bool,
    pub dutch_country_aliases: HashSet<String>,
    pub user_agent: String,
}

impl ProviderConfig {
    pub fn is_dutch_country(&self, country: &str) -> bool {
        self.dutch_country_aliases.contains(country)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::from(&FeatureSettings::default())
    }
}

impl From<&FeatureSettings> for ProviderConfig {
    fn from(from: &FeatureSettings) -> Self {
        let FeatureSettings {
            auto_geocode: _,
            default_provider,
            fallback_to_nominatim,
            rate_limit_ms,
            overwrite_existing,
            dutch_country_values,
            nominatim_user_agent,
        } = from;
        let dutch_country_aliases = parse_country_aliases(
            dutch_country_values
                .as_deref()
                .unwrap_or(DEFAULT_DUTCH_COUNTRY_VALUES),
        );
        Self {
            default_provider: default_provider.unwrap_or_default(),
            fallback_enabled: fallback_to_nominatim.unwrap_or(false),
            rate_limit: Duration::from_millis(rate_limit_ms.unwrap_or(DEFAULT_RATE_LIMIT_MS)),
            overwrite_existing: overwrite_existing.unwrap_or(false),
            dutch_country_aliases,
            user_agent: nominatim_user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
        }
    }
}

impl From<FeatureSettings> for ProviderConfig {
    fn from(from: FeatureSettings) -> Self {
        Self::from(&from)
    }
}

/// Comma separated list of country values.
///
/// An empty entry (e.g. a trailing comma) matches
/// addresses without a country.
pub fn parse_country_aliases(values: &str) -> HashSet<String> {
    values.split(',').map(|v| v.trim().to_owned()).collect()
}
