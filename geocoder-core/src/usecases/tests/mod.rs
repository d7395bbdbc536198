use super::prelude::*;
use crate::{
    gateways::geocode::{GatewayError, GeoCodingGateway},
    query,
    settings::{FeatureSettings, ProviderKind, SettingsProvider},
};
use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    time::Instant,
};

pub fn found(lat: f64, lng: f64) -> GeocodeResult {
    GeocodeResult::new(MapPoint::try_from_lat_lng_deg(lat, lng).unwrap())
}

pub struct MockGeoCodingGw {
    kind: ProviderKind,
    result: Option<GeocodeResult>,
    fail: bool,
    calls: RefCell<Vec<(String, String, Instant)>>,
}

impl MockGeoCodingGw {
    fn new(kind: ProviderKind, result: Option<GeocodeResult>) -> Self {
        Self {
            kind,
            result,
            fail: false,
            calls: Default::default(),
        }
    }
    pub fn national(result: Option<GeocodeResult>) -> Self {
        Self::new(ProviderKind::National, result)
    }
    pub fn international(result: Option<GeocodeResult>) -> Self {
        Self::new(ProviderKind::International, result)
    }
    pub fn failing(kind: ProviderKind) -> Self {
        Self {
            fail: true,
            ..Self::new(kind, None)
        }
    }
    pub fn queries(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(q, _, _)| q.clone()).collect()
    }
    pub fn user_agents(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(_, ua, _)| ua.clone()).collect()
    }
    pub fn called_at(&self) -> Vec<Instant> {
        self.calls.borrow().iter().map(|(_, _, at)| *at).collect()
    }
}

impl GeoCodingGateway for MockGeoCodingGw {
    fn name(&self) -> &str {
        self.kind.as_str()
    }
    fn build_query(&self, addr: &AddressInput) -> String {
        match self.kind {
            ProviderKind::National => query::postal_code_query(addr),
            ProviderKind::International => query::free_text_query(addr),
        }
    }
    fn geocode(
        &self,
        query: &str,
        user_agent: &str,
    ) -> std::result::Result<Option<GeocodeResult>, GatewayError> {
        self.calls
            .borrow_mut()
            .push((query.to_owned(), user_agent.to_owned(), Instant::now()));
        if self.fail {
            return Err(GatewayError::Status(503));
        }
        Ok(self.result.clone())
    }
}

#[derive(Default)]
pub struct MutableSettings(RefCell<FeatureSettings>);

impl MutableSettings {
    pub fn replace(&self, settings: FeatureSettings) {
        *self.0.borrow_mut() = settings;
    }
}

impl SettingsProvider for MutableSettings {
    fn load_feature_settings(&self) -> FeatureSettings {
        self.0.borrow().clone()
    }
}

#[derive(Default)]
pub struct MockDb {
    pub records: RefCell<BTreeMap<RecordId, Record>>,
    pub saved: RefCell<Vec<(RecordId, SaveScope)>>,
    pub cleared: Cell<usize>,
    pub fail_on_save: Cell<bool>,
}

impl MockDb {
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let db = Self::default();
        db.records
            .borrow_mut()
            .extend(records.into_iter().map(|r| (r.id, r)));
        db
    }

    pub fn record(&self, id: u64) -> Record {
        self.records.borrow()[&RecordId::from(id)].clone()
    }
}

impl RecordRepo for MockDb {
    fn get_record(&self, id: RecordId) -> std::result::Result<Option<Record>, RepoError> {
        Ok(self.records.borrow().get(&id).cloned())
    }

    fn save_record(
        &self,
        record: &mut Record,
        scope: SaveScope,
    ) -> std::result::Result<(), RepoError> {
        if self.fail_on_save.get() {
            return Err(RepoError::Other(anyhow::anyhow!("database is locked")));
        }
        record.apply_pending();
        self.records.borrow_mut().insert(record.id, record.clone());
        self.saved.borrow_mut().push((record.id, scope));
        Ok(())
    }

    fn find_geocoding_candidates(
        &self,
        force: bool,
        limit: Option<usize>,
    ) -> std::result::Result<Vec<RecordId>, RepoError> {
        Ok(self
            .records
            .borrow()
            .values()
            .filter(|r| r.has_address())
            .filter(|r| force || !r.has_coordinates())
            .map(|r| r.id)
            .take(limit.unwrap_or(usize::MAX))
            .collect())
    }

    fn clear_cache(&self) {
        self.cleared.set(self.cleared.get() + 1);
    }
}

pub use crate::repositories::Error as RepoError;
