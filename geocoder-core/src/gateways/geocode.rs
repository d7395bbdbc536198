use crate::entities::{AddressInput, GeocodeResult};
use thiserror::Error;

/// A remote service that resolves addresses into positions.
pub trait GeoCodingGateway {
    /// Human readable name of the service, used for logging.
    fn name(&self) -> &str;

    /// Build the search query for this service.
    ///
    /// An empty query means that there is nothing to look up.
    fn build_query(&self, addr: &AddressInput) -> String;

    /// Search for the (best) position of the query.
    ///
    /// The `user_agent` identifies the client and may
    /// change between two requests.
    /// `Ok(None)` means that the service did not find anything.
    fn geocode(
        &self,
        query: &str,
        user_agent: &str,
    ) -> Result<Option<GeocodeResult>, GatewayError>;
}

impl<G> GeoCodingGateway for &G
where
    G: GeoCodingGateway + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }
    fn build_query(&self, addr: &AddressInput) -> String {
        (**self).build_query(addr)
    }
    fn geocode(
        &self,
        query: &str,
        user_agent: &str,
    ) -> Result<Option<GeocodeResult>, GatewayError> {
        (**self).geocode(query, user_agent)
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("Unexpected response status {0}")]
    Status(u16),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
