// Access to the records of the host.
// Persistence itself is the business of the host,
// these traits only describe what is needed for geocoding.

use crate::entities::*;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

/// Context of a save operation that is handed over
/// to the post-save hooks of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveScope {
    /// Regular save, e.g. by a user.
    #[default]
    Default,
    /// The save has been issued by the geocoding trigger itself
    /// and must not trigger geocoding again.
    SuppressGeocoding,
}

impl SaveScope {
    pub fn suppresses_geocoding(self) -> bool {
        self == Self::SuppressGeocoding
    }
}

pub trait RecordRepo {
    fn get_record(&self, id: RecordId) -> Result<Option<Record>>;

    /// Persist all pending changes of the record.
    fn save_record(&self, record: &mut Record, scope: SaveScope) -> Result<()>;

    /// Records with at least one address component in ascending order.
    ///
    /// Unless `force` is set only records without coordinates are selected.
    fn find_geocoding_candidates(&self, force: bool, limit: Option<usize>)
        -> Result<Vec<RecordId>>;

    /// Release cached records, e.g. between batches.
    fn clear_cache(&self) {}
}

/// The event that the host emits after a record has been saved.
#[derive(Debug, Clone)]
pub struct RecordSaved {
    pub record: Record,
    pub is_new: bool,
    /// Aliases of all fields that have been changed by the save.
    pub changed_fields: Vec<String>,
}

impl RecordSaved {
    pub fn only_coordinates_changed(&self) -> bool {
        !self.changed_fields.is_empty()
            && self
                .changed_fields
                .iter()
                .all(|f| fields::GEO_FIELDS.contains(&f.as_str()))
    }

    pub fn address_changed(&self) -> bool {
        self.changed_fields
            .iter()
            .any(|f| fields::ADDRESS_FIELDS.contains(&f.as_str()))
    }
}
