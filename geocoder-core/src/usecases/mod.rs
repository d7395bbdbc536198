mod error;
mod geocode_address;
mod geocode_records;
mod geocode_saved_record;
mod rate_limit;
mod sync_fields;

#[cfg(test)]
pub mod tests;

pub use self::{
    error::Error, geocode_address::*, geocode_records::*, geocode_saved_record::*,
    rate_limit::*, sync_fields::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, repositories::*};
}
