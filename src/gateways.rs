use crate::{config::Config, settings::ConfigFileSettings};
use anyhow::Result;
use geocoder_core::usecases::Geocoder;
use geocoder_gateways::{nominatim::Nominatim, pdok::Pdok};

pub type AppGeocoder = Geocoder<ConfigFileSettings, Pdok, Nominatim>;

/// The `User-Agent` of the requests is taken from
/// the settings of each call and not fixed here.
pub fn geocoder(cfg: &Config, settings: ConfigFileSettings) -> Result<AppGeocoder> {
    log::info!("Use PDOK gateway ({})", cfg.gateway.pdok_api_url);
    let pdok = Pdok::try_new(&cfg.gateway.pdok_api_url)?;
    log::info!("Use Nominatim gateway ({})", cfg.gateway.nominatim_api_url);
    let nominatim = Nominatim::try_new(&cfg.gateway.nominatim_api_url)?;
    Ok(Geocoder::new(settings, pdok, nominatim))
}
