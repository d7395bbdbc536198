#![deny(missing_debug_implementations)]

mod http;

pub mod nominatim;
pub mod pdok;

pub use http::REQUEST_TIMEOUT;
