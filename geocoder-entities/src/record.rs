use crate::address::{non_empty_trimmed, AddressInput};
use std::{collections::BTreeMap, fmt, num::ParseIntError, str::FromStr};

/// Aliases of the record fields that are read or written.
pub mod fields {
    pub const ADDRESS1: &str = "address1";
    pub const ADDRESS2: &str = "address2";
    pub const CITY: &str = "city";
    pub const STATE: &str = "state";
    pub const ZIPCODE: &str = "zipcode";
    pub const COUNTRY: &str = "country";
    pub const HOUSE_NUMBER: &str = "house_number";
    pub const HOUSE_NUMBER_ADDITION: &str = "house_number_addition";
    pub const STREET_NAME: &str = "straatnaam";
    pub const MUNICIPALITY_CODE: &str = "gemeente_code";
    pub const MUNICIPALITY_NAME: &str = "gemeente_naam";
    pub const PROVINCE_CODE: &str = "provincie_code";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";

    /// Changing one of these fields invalidates the position.
    pub const ADDRESS_FIELDS: [&str; 6] = [ADDRESS1, ADDRESS2, CITY, STATE, ZIPCODE, COUNTRY];

    pub const GEO_FIELDS: [&str; 2] = [LATITUDE, LONGITUDE];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u64);

impl RecordId {
    pub const fn to_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for RecordId {
    fn from(from: u64) -> Self {
        Self(from)
    }
}

impl FromStr for RecordId {
    type Err = ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A contact or company of the CRM.
///
/// Field values are addressed by their alias. Updates are
/// collected as pending changes until the record gets saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    fields: BTreeMap<String, String>,
    pending: BTreeMap<String, String>,
}

impl Record {
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            fields: Default::default(),
            pending: Default::default(),
        }
    }

    pub fn with_fields<I, K, V>(id: RecordId, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            id,
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            pending: Default::default(),
        }
    }

    /// The current value of a field or an empty string.
    pub fn get(&self, alias: &str) -> &str {
        self.fields.get(alias).map(String::as_str).unwrap_or_default()
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn set_pending(&mut self, alias: &str, value: impl Into<String>) {
        self.pending.insert(alias.to_owned(), value.into());
    }

    pub fn pending(&self) -> &BTreeMap<String, String> {
        &self.pending
    }

    /// Merges all pending changes into the current field values
    /// and returns the aliases of the fields that actually changed.
    pub fn apply_pending(&mut self) -> Vec<String> {
        let mut changed = Vec::with_capacity(self.pending.len());
        for (alias, value) in std::mem::take(&mut self.pending) {
            if self.fields.get(&alias) != Some(&value) {
                changed.push(alias.clone());
                self.fields.insert(alias, value);
            }
        }
        changed
    }

    /// At least one of address line, city and zipcode is filled in.
    pub fn has_address(&self) -> bool {
        [fields::ADDRESS1, fields::CITY, fields::ZIPCODE]
            .into_iter()
            .any(|alias| !self.get(alias).trim().is_empty())
    }

    /// Both coordinates are set and differ from zero.
    pub fn has_coordinates(&self) -> bool {
        let is_set = |alias| {
            self.get(alias)
                .trim()
                .parse::<f64>()
                .is_ok_and(|deg| deg != 0.0)
        };
        is_set(fields::LATITUDE) && is_set(fields::LONGITUDE)
    }

    pub fn address_input(&self) -> AddressInput {
        let value = |alias| non_empty_trimmed(self.get(alias));
        AddressInput {
            zipcode: value(fields::ZIPCODE),
            house_number: value(fields::HOUSE_NUMBER),
            house_number_addition: value(fields::HOUSE_NUMBER_ADDITION),
            address_line: value(fields::ADDRESS1),
            city: value(fields::CITY),
            country: value(fields::COUNTRY),
        }
    }
}
