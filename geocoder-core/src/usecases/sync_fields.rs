use super::prelude::*;

/// Writes the position and the normalized address
/// of a geocoding result into the pending changes of the record.
///
/// Empty details are skipped. The address line is composed
/// from street name, house number and addition.
pub fn sync_fields(record: &mut Record, result: &GeocodeResult) {
    record.set_pending(fields::LATITUDE, result.lat().to_string());
    record.set_pending(fields::LONGITUDE, result.lng().to_string());

    let Some(details) = &result.details else {
        return;
    };
    let AddressDetails {
        street_name,
        house_number,
        house_number_addition,
        municipality_code,
        municipality_name,
        province_code,
        province_name,
        postal_code: _,
        city,
    } = details;
    let mapping = [
        (fields::STREET_NAME, street_name),
        (fields::HOUSE_NUMBER, house_number),
        (fields::HOUSE_NUMBER_ADDITION, house_number_addition),
        (fields::MUNICIPALITY_CODE, municipality_code),
        (fields::MUNICIPALITY_NAME, municipality_name),
        (fields::PROVINCE_CODE, province_code),
        (fields::STATE, province_name),
        (fields::CITY, city),
    ];
    for (alias, value) in mapping {
        let Some(value) = value.as_deref().map(str::trim) else {
            continue;
        };
        if !value.is_empty() {
            record.set_pending(alias, value);
        }
    }
    if let Some(address_line) = details.street_line() {
        record.set_pending(fields::ADDRESS1, address_line);
    }
}

#[cfg(test)]
mod tests {
    use super::{super::tests::found, *};
    use geocoder_entities::builders::Builder;

    fn pdok_result() -> GeocodeResult {
        let details = AddressDetails {
            street_name: Some("Lotusbloemweg".into()),
            house_number: Some("88".into()),
            house_number_addition: Some("b".into()),
            municipality_code: Some("GM0034".into()),
            municipality_name: Some("Almere".into()),
            province_code: Some("PV24".into()),
            province_name: Some("Flevoland".into()),
            postal_code: Some("1338ZA".into()),
            city: Some("Almere".into()),
        };
        GeocodeResult::with_details(found(52.370216, 4.895168).pos, details)
    }

    #[test]
    fn sync_coordinates_only() {
        let mut record = Record::build().zipcode("1338ZA").finish();
        sync_fields(&mut record, &found(52.370216, 4.895168));
        let pending = record.pending();
        assert_eq!(2, pending.len());
        assert_eq!("52.370216", pending["latitude"]);
        assert_eq!("4.895168", pending["longitude"]);
    }

    #[test]
    fn sync_address_details() {
        let mut record = Record::build().zipcode("1338ZA").finish();
        sync_fields(&mut record, &pdok_result());
        let pending = record.pending();
        assert_eq!("Lotusbloemweg", pending["straatnaam"]);
        assert_eq!("88", pending["house_number"]);
        assert_eq!("b", pending["house_number_addition"]);
        assert_eq!("GM0034", pending["gemeente_code"]);
        assert_eq!("Almere", pending["gemeente_naam"]);
        assert_eq!("PV24", pending["provincie_code"]);
        assert_eq!("Flevoland", pending["state"]);
        assert_eq!("Almere", pending["city"]);
        assert_eq!("Lotusbloemweg 88b", pending["address1"]);
        assert!(!pending.contains_key("zipcode"));
    }

    #[test]
    fn skip_empty_details() {
        let mut result = pdok_result();
        let details = result.details.as_mut().unwrap();
        details.house_number_addition = Some("  ".into());
        details.province_name = None;
        details.house_number = None;
        let mut record = Record::build().zipcode("1338ZA").finish();
        sync_fields(&mut record, &result);
        let pending = record.pending();
        assert!(!pending.contains_key("house_number_addition"));
        assert!(!pending.contains_key("state"));
        assert!(!pending.contains_key("house_number"));
        // no house number => no composed address line
        assert!(!pending.contains_key("address1"));
        assert_eq!("Lotusbloemweg", pending["straatnaam"]);
    }

    #[test]
    fn sync_is_idempotent() {
        let result = pdok_result();
        let mut record = Record::build()
            .address1("Lotusbloemweg 88")
            .zipcode("1338ZA")
            .finish();
        sync_fields(&mut record, &result);
        let first = record.pending().clone();
        sync_fields(&mut record, &result);
        assert_eq!(&first, record.pending());

        record.apply_pending();
        let fields_after_first_save = record.fields().clone();
        sync_fields(&mut record, &result);
        assert!(record.apply_pending().is_empty());
        assert_eq!(&fields_after_first_save, record.fields());
        assert_eq!("Lotusbloemweg 88b", record.get("address1"));
    }
}
