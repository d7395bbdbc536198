pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{address_builder::*, record_builder::*};

pub mod address_builder {

    use super::*;
    use crate::address::*;

    #[derive(Debug)]
    pub struct AddressInputBuild {
        addr: AddressInput,
    }

    impl AddressInputBuild {
        pub fn zipcode(mut self, zipcode: &str) -> Self {
            self.addr.zipcode = Some(zipcode.into());
            self
        }
        pub fn house_number(mut self, house_number: &str) -> Self {
            self.addr.house_number = Some(house_number.into());
            self
        }
        pub fn addition(mut self, addition: &str) -> Self {
            self.addr.house_number_addition = Some(addition.into());
            self
        }
        pub fn address_line(mut self, address_line: &str) -> Self {
            self.addr.address_line = Some(address_line.into());
            self
        }
        pub fn city(mut self, city: &str) -> Self {
            self.addr.city = Some(city.into());
            self
        }
        pub fn country(mut self, country: &str) -> Self {
            self.addr.country = Some(country.into());
            self
        }
        pub fn finish(self) -> AddressInput {
            self.addr
        }
    }

    impl Builder for AddressInput {
        type Build = AddressInputBuild;
        fn build() -> AddressInputBuild {
            AddressInputBuild {
                addr: AddressInput::default(),
            }
        }
    }
}

pub mod record_builder {

    use super::*;
    use crate::record::*;

    #[derive(Debug)]
    pub struct RecordBuild {
        record: Record,
    }

    impl RecordBuild {
        pub fn id(self, id: u64) -> Self {
            let fields = self.record.fields().clone();
            Self {
                record: Record::with_fields(id.into(), fields),
            }
        }
        pub fn field(self, alias: &str, value: &str) -> Self {
            let mut fields = self.record.fields().clone();
            fields.insert(alias.into(), value.into());
            Self {
                record: Record::with_fields(self.record.id, fields),
            }
        }
        pub fn address1(self, address1: &str) -> Self {
            self.field(fields::ADDRESS1, address1)
        }
        pub fn zipcode(self, zipcode: &str) -> Self {
            self.field(fields::ZIPCODE, zipcode)
        }
        pub fn city(self, city: &str) -> Self {
            self.field(fields::CITY, city)
        }
        pub fn country(self, country: &str) -> Self {
            self.field(fields::COUNTRY, country)
        }
        pub fn coordinates(self, lat: &str, lng: &str) -> Self {
            self.field(fields::LATITUDE, lat)
                .field(fields::LONGITUDE, lng)
        }
        pub fn finish(self) -> Record {
            self.record
        }
    }

    impl Builder for Record {
        type Build = RecordBuild;
        fn build() -> RecordBuild {
            RecordBuild {
                record: Record::new(RecordId::from(1)),
            }
        }
    }
}
