use crate::store::JsonRecordStore;
use geocoder_core::{
    entities::*,
    repositories::{Error as RepoError, RecordRepo, RecordSaved, SaveScope},
    usecases::{self, AddressGeocoding, TriggerOutcome},
};

/// Saves records and emits the post-save event
/// that keeps the positions up to date.
pub struct Host<'a, G> {
    store: &'a JsonRecordStore,
    geocoder: &'a G,
}

impl<'a, G> Host<'a, G>
where
    G: AddressGeocoding,
{
    pub const fn new(store: &'a JsonRecordStore, geocoder: &'a G) -> Self {
        Self { store, geocoder }
    }

    pub fn save(&self, record: &mut Record, scope: SaveScope) -> Result<TriggerOutcome, RepoError> {
        let is_new = self.store.get_record(record.id)?.is_none();
        let changed_fields = self.store.store(record)?;
        let event = RecordSaved {
            record: record.clone(),
            is_new,
            changed_fields,
        };
        let outcome = usecases::geocode_saved_record(self, self.geocoder, &event, scope);
        log::debug!("Post-save geocoding of record {}: {outcome:?}", record.id);
        Ok(outcome)
    }
}

impl<G> RecordRepo for Host<'_, G>
where
    G: AddressGeocoding,
{
    fn get_record(&self, id: RecordId) -> Result<Option<Record>, RepoError> {
        self.store.get_record(id)
    }

    fn save_record(&self, record: &mut Record, scope: SaveScope) -> Result<(), RepoError> {
        self.save(record, scope)?;
        Ok(())
    }

    fn find_geocoding_candidates(
        &self,
        force: bool,
        limit: Option<usize>,
    ) -> Result<Vec<RecordId>, RepoError> {
        self.store.find_geocoding_candidates(force, limit)
    }

    fn clear_cache(&self) {
        self.store.clear_cache();
    }
}
