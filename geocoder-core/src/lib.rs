pub mod gateways;
pub mod query;
pub mod repositories;
pub mod settings;
pub mod usecases;

pub mod entities {
    pub use geocoder_entities::{address::*, geo::*, geocode::*, record::*};
}
