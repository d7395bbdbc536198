//! Free-text search queries derived from address components.

use crate::entities::AddressInput;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DIGITS: Regex = Regex::new(r"\d+").unwrap();
}

/// Query for an address registry that is keyed by
/// postal code and house number.
///
/// In order of precedence:
///
/// 1. `{zipcode} {house_number}{addition}`
/// 2. `{zipcode} {first digits of address line}`
/// 3. `{zipcode} {city}`
/// 4. `{address line} {city}`
pub fn postal_code_query(addr: &AddressInput) -> String {
    let zipcode = addr.zipcode();
    let house_number = addr.house_number();
    if !zipcode.is_empty() && !house_number.is_empty() {
        return format!("{zipcode} {house_number}{}", addr.house_number_addition());
    }
    if !zipcode.is_empty() {
        return match DIGITS.find(addr.address_line()) {
            Some(digits) => format!("{zipcode} {}", digits.as_str()),
            None => format!("{zipcode} {}", addr.city()).trim().to_owned(),
        };
    }
    format!("{} {}", addr.address_line(), addr.city())
        .trim()
        .to_owned()
}

/// Comma separated query for a worldwide free-text search,
/// e.g. `Lotusbloemweg 88, Amsterdam, 1011AB, Netherlands`.
pub fn free_text_query(addr: &AddressInput) -> String {
    let street = street_with_house_number(addr);
    let query = [street.as_str(), addr.city(), addr.zipcode(), addr.country()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .join(", ");
    query
}

fn street_with_house_number(addr: &AddressInput) -> String {
    let address_line = addr.address_line();
    let house_number = addr.house_number();
    if house_number.is_empty() || address_line.is_empty() || address_line.contains(house_number) {
        return address_line.to_owned();
    }
    format!(
        "{address_line} {house_number}{}",
        addr.house_number_addition()
    )
}
