//! Dutch national address registry (PDOK Locatieserver).

use crate::http;
use geocoder_core::{
    entities::*,
    gateways::geocode::{GatewayError, GeoCodingGateway},
    query,
};
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::blocking::Client;
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://api.pdok.nl/bzk/locatieserver/search/v3_1/free";

lazy_static! {
    static ref WKT_POINT: Regex = Regex::new(
        r"POINT\s*\(\s*([-+]?(?:\d+\.?\d*|\.\d+))\s+([-+]?(?:\d+\.?\d*|\.\d+))\s*\)"
    )
    .unwrap();
}

#[derive(Debug, Clone)]
pub struct Pdok {
    client: Client,
    api_url: String,
}

impl Pdok {
    pub fn try_new(api_url: impl Into<String>) -> Result<Self, GatewayError> {
        Ok(Self {
            client: http::client()?,
            api_url: api_url.into(),
        })
    }
}

impl GeoCodingGateway for Pdok {
    fn name(&self) -> &str {
        "PDOK"
    }

    fn build_query(&self, addr: &AddressInput) -> String {
        query::postal_code_query(addr)
    }

    fn geocode(
        &self,
        query: &str,
        user_agent: &str,
    ) -> Result<Option<GeocodeResult>, GatewayError> {
        if query.trim().is_empty() {
            return Ok(None);
        }
        let params = [("q", query), ("rows", "1"), ("fq", "type:adres")];
        let res: SearchResponse = http::get_json(&self.client, &self.api_url, &params, user_agent)?;
        Ok(res.into_result())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    response: DocList,
}

#[derive(Debug, Deserialize)]
struct DocList {
    #[serde(default)]
    docs: Vec<Doc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Doc {
    centroide_ll: Option<String>,
    straatnaam: Option<String>,
    huisnummer: Option<NumberOrString>,
    huisletter: Option<String>,
    huisnummertoevoeging: Option<String>,
    postcode: Option<String>,
    woonplaatsnaam: Option<String>,
    gemeentecode: Option<String>,
    gemeentenaam: Option<String>,
    provinciecode: Option<String>,
    provincienaam: Option<String>,
}

// The house number is delivered as a number,
// older versions of the API used strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(serde_json::Number),
    String(String),
}

impl NumberOrString {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::String(s) => s,
        }
    }
}

impl SearchResponse {
    fn into_result(self) -> Option<GeocodeResult> {
        let Some(doc) = self.response.docs.into_iter().next() else {
            log::debug!("PDOK: no address found");
            return None;
        };
        let Some(pos) = doc.centroide_ll.as_deref().and_then(parse_wkt_point) else {
            log::warn!(
                "PDOK: unable to parse centroid {:?}",
                doc.centroide_ll.unwrap_or_default()
            );
            return None;
        };
        Some(GeocodeResult::with_details(pos, doc.into()))
    }
}

impl From<Doc> for AddressDetails {
    fn from(from: Doc) -> Self {
        let Doc {
            centroide_ll: _,
            straatnaam,
            huisnummer,
            huisletter,
            huisnummertoevoeging,
            postcode,
            woonplaatsnaam,
            gemeentecode,
            gemeentenaam,
            provinciecode,
            provincienaam,
        } = from;
        let non_empty = |s: Option<String>| s.as_deref().and_then(non_empty_trimmed);
        let house_number_addition =
            non_empty(huisletter).or_else(|| non_empty(huisnummertoevoeging));
        Self {
            street_name: non_empty(straatnaam),
            house_number: non_empty(huisnummer.map(NumberOrString::into_string)),
            house_number_addition,
            municipality_code: non_empty(gemeentecode),
            municipality_name: non_empty(gemeentenaam),
            province_code: non_empty(provinciecode),
            province_name: non_empty(provincienaam),
            postal_code: non_empty(postcode),
            city: non_empty(woonplaatsnaam),
        }
    }
}

/// Parses a WKT point `POINT(<lon> <lat>)`.
pub fn parse_wkt_point(wkt: &str) -> Option<MapPoint> {
    let caps = WKT_POINT.captures(wkt)?;
    let lng = caps.get(1)?.as_str();
    let lat = caps.get(2)?.as_str();
    MapPoint::parse_lat_lng_deg(lat, lng).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<Option<GeocodeResult>, GatewayError> {
        http::parse_json::<SearchResponse>(body).map(SearchResponse::into_result)
    }

    const LOTUSBLOEMWEG: &str = r#"{
      "response": {
        "numFound": 1,
        "start": 0,
        "maxScore": 17.5,
        "numFoundExact": true,
        "docs": [{
          "type": "adres",
          "weergavenaam": "Lotusbloemweg 88B, 1338ZA Almere",
          "id": "adr-5b7f1b2bd9b1f0f3b1a0a0cf3d3a0a11",
          "centroide_ll": "POINT(5.17283 52.37451)",
          "centroide_rd": "POINT(144018.9 485873.21)",
          "straatnaam": "Lotusbloemweg",
          "huisnummer": 88,
          "huisletter": "B",
          "postcode": "1338ZA",
          "woonplaatsnaam": "Almere",
          "gemeentecode": "0034",
          "gemeentenaam": "Almere",
          "provinciecode": "PV24",
          "provincienaam": "Flevoland",
          "score": 17.5
        }]
      }
    }"#;

    #[test]
    fn parse_centroid() {
        let pos = parse_wkt_point("POINT(4.895168 52.370216)").unwrap();
        assert_eq!(52.370216, pos.lat());
        assert_eq!(4.895168, pos.lng());
    }

    #[test]
    fn parse_centroid_with_signs_and_spaces() {
        let pos = parse_wkt_point("POINT ( -4.5 -52 )").unwrap();
        assert_eq!((-52.0, -4.5), pos.to_lat_lng_deg());
    }

    #[test]
    fn parse_centroid_with_plus_sign() {
        let pos = parse_wkt_point("POINT(+4.89 +52.37)").unwrap();
        assert_eq!((52.37, 4.89), pos.to_lat_lng_deg());
    }

    #[test]
    fn parse_centroid_without_leading_digits() {
        let pos = parse_wkt_point("POINT(.5 52.)").unwrap();
        assert_eq!((52.0, 0.5), pos.to_lat_lng_deg());
    }

    #[test]
    fn reject_invalid_centroids() {
        assert!(parse_wkt_point("").is_none());
        assert!(parse_wkt_point("POINT(4.89)").is_none());
        assert!(parse_wkt_point("POINT(abc def)").is_none());
        assert!(parse_wkt_point("POINT(4.89 152.37)").is_none());
        assert!(parse_wkt_point("POINT(. 52)").is_none());
        assert!(parse_wkt_point("POINT(+-4 52)").is_none());
    }

    #[test]
    fn parse_address() {
        let res = parse(LOTUSBLOEMWEG).unwrap().unwrap();
        assert_eq!((52.37451, 5.17283), res.pos.to_lat_lng_deg());
        let details = res.details.unwrap();
        assert_eq!(
            AddressDetails {
                street_name: Some("Lotusbloemweg".into()),
                house_number: Some("88".into()),
                house_number_addition: Some("B".into()),
                municipality_code: Some("0034".into()),
                municipality_name: Some("Almere".into()),
                province_code: Some("PV24".into()),
                province_name: Some("Flevoland".into()),
                postal_code: Some("1338ZA".into()),
                city: Some("Almere".into()),
            },
            details
        );
    }

    #[test]
    fn house_number_as_string_and_addition_fallback() {
        let body = r#"{"response":{"docs":[{
            "centroide_ll": "POINT(4.9 52.3)",
            "huisnummer": "12",
            "huisletter": "",
            "huisnummertoevoeging": "2"
        }]}}"#;
        let details = parse(body).unwrap().unwrap().details.unwrap();
        assert_eq!(Some("12".into()), details.house_number);
        assert_eq!(Some("2".into()), details.house_number_addition);
        assert_eq!(None, details.street_name);
    }

    #[test]
    fn no_docs() {
        assert_eq!(None, parse(r#"{"response":{"numFound":0,"docs":[]}}"#).unwrap());
        assert_eq!(None, parse(r#"{"response":{}}"#).unwrap());
    }

    #[test]
    fn doc_without_centroid() {
        let _ = env_logger::builder().is_test(true).try_init();
        let body = r#"{"response":{"docs":[{"straatnaam":"Lotusbloemweg"}]}}"#;
        assert_eq!(None, parse(body).unwrap());
    }

    #[test]
    fn malformed_responses() {
        assert!(matches!(
            parse("Service Unavailable"),
            Err(GatewayError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse(r#"{"error":"invalid query"}"#),
            Err(GatewayError::MalformedResponse(_))
        ));
    }

    #[test]
    fn empty_query_is_not_sent() {
        let gw = Pdok::try_new("http://127.0.0.1:1/free").unwrap();
        assert_eq!(None, gw.geocode("  ", "test").unwrap());
    }

    #[test]
    fn build_postal_code_query() {
        use geocoder_entities::builders::Builder;
        let gw = Pdok::try_new(DEFAULT_API_URL).unwrap();
        let addr = AddressInput::build()
            .zipcode("1338ZA")
            .house_number("88")
            .addition("b")
            .finish();
        assert_eq!("1338ZA 88b", gw.build_query(&addr));
    }
}
