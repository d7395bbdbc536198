use geocoder_core::{
    entities::*,
    repositories::{Error as RepoError, RecordRepo, SaveScope},
};
use jfs::Store;
use serde::{Deserialize, Serialize};
use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    io,
    path::Path,
};

type Result<T> = std::result::Result<T, RepoError>;

/// Records as JSON files, one file per record.
pub struct JsonRecordStore {
    json_store: Store,
    cache: RefCell<HashMap<RecordId, Record>>,
}

#[derive(Debug, Deserialize, Serialize)]
struct JsonRecord {
    id: u64,
    fields: BTreeMap<String, String>,
}

impl From<&Record> for JsonRecord {
    fn from(from: &Record) -> Self {
        Self {
            id: from.id.to_u64(),
            fields: from.fields().clone(),
        }
    }
}

impl From<JsonRecord> for Record {
    fn from(from: JsonRecord) -> Self {
        let JsonRecord { id, fields } = from;
        Record::with_fields(id.into(), fields)
    }
}

impl JsonRecordStore {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let json_store = Store::new(directory)?;
        Ok(Self {
            json_store,
            cache: Default::default(),
        })
    }

    pub fn path(&self) -> &Path {
        self.json_store.path()
    }

    /// Merges the pending changes into the record, writes it
    /// and returns the aliases of the changed fields.
    pub fn store(&self, record: &mut Record) -> Result<Vec<String>> {
        let changed_fields = record.apply_pending();
        let key = record.id.to_u64().to_string();
        self.json_store
            .save_with_id(&JsonRecord::from(&*record), &key)?;
        self.cache.borrow_mut().insert(record.id, record.clone());
        Ok(changed_fields)
    }

    fn load_all(&self) -> Result<Vec<Record>> {
        let mut records: Vec<Record> = self
            .json_store
            .all::<JsonRecord>()?
            .into_values()
            .map(Record::from)
            .collect();
        records.sort_by_key(|r| r.id);
        Ok(records)
    }
}

impl RecordRepo for JsonRecordStore {
    fn get_record(&self, id: RecordId) -> Result<Option<Record>> {
        if let Some(record) = self.cache.borrow().get(&id) {
            return Ok(Some(record.clone()));
        }
        let key = id.to_u64().to_string();
        let record = match self.json_store.get::<JsonRecord>(&key) {
            Ok(record) => Record::from(record),
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        self.cache.borrow_mut().insert(id, record.clone());
        Ok(Some(record))
    }

    fn save_record(&self, record: &mut Record, _: SaveScope) -> Result<()> {
        self.store(record)?;
        Ok(())
    }

    fn find_geocoding_candidates(&self, force: bool, limit: Option<usize>) -> Result<Vec<RecordId>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(Record::has_address)
            .filter(|r| force || !r.has_coordinates())
            .map(|r| r.id)
            .take(limit.unwrap_or(usize::MAX))
            .collect())
    }

    fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }
}
