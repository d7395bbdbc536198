use super::{prelude::*, rate_limit::RateLimiter};
use crate::{
    gateways::geocode::GeoCodingGateway,
    settings::{FeatureSettings, ProviderConfig, ProviderKind, SettingsProvider},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationMode {
    /// A single record is geocoded on behalf of a user
    /// who is waiting for the response.
    Interactive,
    /// Many records are processed sequentially and the
    /// requests must respect the usage policy of the services.
    Batch,
}

/// Resolves addresses into positions.
pub trait AddressGeocoding {
    fn feature_settings(&self) -> FeatureSettings;

    fn geocode(&self, addr: &AddressInput, mode: InvocationMode) -> Option<GeocodeResult>;

    fn is_enabled(&self) -> bool {
        self.feature_settings().is_enabled()
    }

    fn geocode_record(&self, record: &Record, mode: InvocationMode) -> Option<GeocodeResult> {
        if !record.has_address() {
            log::debug!("Record {} has no address", record.id);
            return None;
        }
        self.geocode(&record.address_input(), mode)
    }
}

impl<G> AddressGeocoding for &G
where
    G: AddressGeocoding + ?Sized,
{
    fn feature_settings(&self) -> FeatureSettings {
        (**self).feature_settings()
    }
    fn geocode(&self, addr: &AddressInput, mode: InvocationMode) -> Option<GeocodeResult> {
        (**self).geocode(addr, mode)
    }
}

/// Picks the provider that is asked first.
pub fn select_provider(cfg: &ProviderConfig, is_dutch: bool) -> ProviderKind {
    use ProviderKind as P;
    match cfg.default_provider {
        P::National if is_dutch => P::National,
        P::International => P::International,
        P::National if cfg.fallback_enabled => P::International,
        P::National => P::National,
    }
}

/// Only a failed national lookup is retried with the international provider.
pub fn should_fall_back(cfg: &ProviderConfig, primary: ProviderKind) -> bool {
    primary == ProviderKind::National
        && cfg.default_provider == ProviderKind::National
        && cfg.fallback_enabled
}

/// Geocoding with a national and an international provider.
///
/// An instance must not be shared between threads,
/// requests are strictly sequential.
#[derive(Debug)]
pub struct Geocoder<S, N, I> {
    settings: S,
    national: N,
    international: I,
    rate_limiter: RateLimiter,
}

impl<S, N, I> Geocoder<S, N, I>
where
    S: SettingsProvider,
    N: GeoCodingGateway,
    I: GeoCodingGateway,
{
    pub fn new(settings: S, national: N, international: I) -> Self {
        Self {
            settings,
            national,
            international,
            rate_limiter: RateLimiter::new(),
        }
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::from(self.settings.load_feature_settings())
    }

    pub fn is_dutch_address(&self, country: &str) -> bool {
        self.provider_config().is_dutch_country(country)
    }

    fn gateway(&self, kind: ProviderKind) -> &dyn GeoCodingGateway {
        match kind {
            ProviderKind::National => &self.national,
            ProviderKind::International => &self.international,
        }
    }

    fn request(
        &self,
        kind: ProviderKind,
        query: &str,
        mode: InvocationMode,
        cfg: &ProviderConfig,
    ) -> Option<GeocodeResult> {
        if mode == InvocationMode::Batch {
            self.rate_limiter.wait(cfg.rate_limit);
        }
        let gw = self.gateway(kind);
        log::debug!("Using {} for query '{query}'", gw.name());
        match gw.geocode(query, &cfg.user_agent) {
            Ok(Some(res)) => {
                log::debug!("{} resolved '{query}' to {}", gw.name(), res.pos);
                Some(res)
            }
            Ok(None) => {
                log::debug!("{} found no results for '{query}'", gw.name());
                None
            }
            Err(err) => {
                log::warn!("{} failed to resolve '{query}': {err}", gw.name());
                None
            }
        }
    }
}

impl<S, N, I> AddressGeocoding for Geocoder<S, N, I>
where
    S: SettingsProvider,
    N: GeoCodingGateway,
    I: GeoCodingGateway,
{
    fn feature_settings(&self) -> FeatureSettings {
        self.settings.load_feature_settings()
    }

    fn geocode(&self, addr: &AddressInput, mode: InvocationMode) -> Option<GeocodeResult> {
        if addr.is_empty() {
            return None;
        }
        let cfg = self.provider_config();
        let is_dutch = cfg.is_dutch_country(addr.country());
        let primary = select_provider(&cfg, is_dutch);
        let query = self.gateway(primary).build_query(addr);
        if query.trim().is_empty() {
            log::debug!("Nothing to geocode for {primary}");
            return None;
        }
        let result = self.request(primary, &query, mode, &cfg);
        if result.is_some() || !should_fall_back(&cfg, primary) {
            return result;
        }
        let fallback = ProviderKind::International;
        let query = self.gateway(fallback).build_query(addr);
        if query.trim().is_empty() {
            return None;
        }
        log::debug!(
            "Falling back to {} for query '{query}'",
            self.gateway(fallback).name()
        );
        self.request(fallback, &query, mode, &cfg)
    }
}
