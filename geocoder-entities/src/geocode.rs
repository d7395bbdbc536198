use crate::geo::MapPoint;

/// The outcome of a successful address lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub pos: MapPoint,
    /// Normalized address as known by the provider.
    ///
    /// Only providers with an authoritative address
    /// registry deliver these details.
    pub details: Option<AddressDetails>,
}

impl GeocodeResult {
    pub const fn new(pos: MapPoint) -> Self {
        Self { pos, details: None }
    }

    pub fn with_details(pos: MapPoint, details: AddressDetails) -> Self {
        Self {
            pos,
            details: Some(details),
        }
    }

    pub const fn lat(&self) -> f64 {
        self.pos.lat()
    }

    pub const fn lng(&self) -> f64 {
        self.pos.lng()
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressDetails {
    pub street_name           : Option<String>,
    pub house_number          : Option<String>,
    pub house_number_addition : Option<String>,
    pub municipality_code     : Option<String>,
    pub municipality_name     : Option<String>,
    pub province_code         : Option<String>,
    pub province_name         : Option<String>,
    pub postal_code           : Option<String>,
    pub city                  : Option<String>,
}

impl AddressDetails {
    /// Street name, house number and addition as a single line,
    /// e.g. `Lotusbloemweg 88b`.
    ///
    /// Requires both the street name and the house number.
    pub fn street_line(&self) -> Option<String> {
        let street = self.street_name.as_deref().map(str::trim).unwrap_or_default();
        let number = self.house_number.as_deref().map(str::trim).unwrap_or_default();
        if street.is_empty() || number.is_empty() {
            return None;
        }
        let addition = self
            .house_number_addition
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        Some(format!("{street} {number}{addition}"))
    }
}
