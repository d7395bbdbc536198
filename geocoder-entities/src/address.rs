/// The components of a postal address that are used to
/// look up a position.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressInput {
    pub zipcode               : Option<String>,
    pub house_number          : Option<String>,
    pub house_number_addition : Option<String>,
    pub address_line          : Option<String>,
    pub city                  : Option<String>,
    pub country               : Option<String>,
}

impl AddressInput {
    pub fn is_empty(&self) -> bool {
        [
            &self.zipcode,
            &self.house_number,
            &self.house_number_addition,
            &self.address_line,
            &self.city,
            &self.country,
        ]
        .into_iter()
        .all(|part| part.as_deref().is_none_or(str::is_empty))
    }

    pub fn zipcode(&self) -> &str {
        self.zipcode.as_deref().unwrap_or_default()
    }

    pub fn house_number(&self) -> &str {
        self.house_number.as_deref().unwrap_or_default()
    }

    pub fn house_number_addition(&self) -> &str {
        self.house_number_addition.as_deref().unwrap_or_default()
    }

    pub fn address_line(&self) -> &str {
        self.address_line.as_deref().unwrap_or_default()
    }

    pub fn city(&self) -> &str {
        self.city.as_deref().unwrap_or_default()
    }

    /// The country or an empty string if it is missing.
    pub fn country(&self) -> &str {
        self.country.as_deref().unwrap_or_default()
    }
}

/// Trims the value and drops it if nothing is left.
pub fn non_empty_trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}
