//! Worldwide address search of OpenStreetMap.
//!
//! The public instance allows at most one request per second
//! and requires an identifying `User-Agent`.

use crate::http;
use geocoder_core::{
    entities::*,
    gateways::geocode::{GatewayError, GeoCodingGateway},
    query,
};
use reqwest::blocking::Client;
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://nominatim.openstreetmap.org/search";

#[derive(Debug, Clone)]
pub struct Nominatim {
    client: Client,
    api_url: String,
}

impl Nominatim {
    pub fn try_new(api_url: impl Into<String>) -> Result<Self, GatewayError> {
        Ok(Self {
            client: http::client()?,
            api_url: api_url.into(),
        })
    }
}

impl GeoCodingGateway for Nominatim {
    fn name(&self) -> &str {
        "Nominatim"
    }

    fn build_query(&self, addr: &AddressInput) -> String {
        query::free_text_query(addr)
    }

    fn geocode(
        &self,
        query: &str,
        user_agent: &str,
    ) -> Result<Option<GeocodeResult>, GatewayError> {
        if query.trim().is_empty() {
            return Ok(None);
        }
        let params = [("q", query), ("format", "json"), ("limit", "1")];
        let places: Vec<Place> = http::get_json(&self.client, &self.api_url, &params, user_agent)?;
        first_position(places)
    }
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

fn first_position(places: Vec<Place>) -> Result<Option<GeocodeResult>, GatewayError> {
    let Some(Place { lat, lon }) = places.into_iter().next() else {
        log::debug!("Nominatim: no place found");
        return Ok(None);
    };
    MapPoint::parse_lat_lng_deg(&lat, &lon)
        .map(GeocodeResult::new)
        .map(Some)
        .map_err(|err| GatewayError::MalformedResponse(err.to_string()))
}
