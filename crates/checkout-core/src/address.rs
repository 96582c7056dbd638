//! Address Model
//!
//! Shipping and contact fields exactly as the user typed them. There is no
//! validation here; the payment provider rejects malformed input.

use serde::{Deserialize, Serialize};

/// Countries offered by the address form: (code, label)
pub const COUNTRIES: &[(&str, &str)] = &[("UK", "United Kingdom"), ("US", "United States")];

const DEFAULT_COUNTRY: &str = "UK";

/// Shipping address, serialized with the camelCase names the backend reads
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub full_name: String,
    pub street: String,
    pub city: String,
    pub postcode: String,
    pub country: String,
    pub phone: String,
    pub email: String,
}

impl Default for Address {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            street: String::new(),
            city: String::new(),
            postcode: String::new(),
            country: DEFAULT_COUNTRY.into(),
            phone: String::new(),
            email: String::new(),
        }
    }
}

/// One input of the address form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressField {
    FullName,
    Street,
    City,
    Postcode,
    Country,
    Phone,
    Email,
}

impl AddressField {
    pub const ALL: [Self; 7] = [
        Self::FullName,
        Self::Street,
        Self::City,
        Self::Postcode,
        Self::Country,
        Self::Phone,
        Self::Email,
    ];

    /// Form/wire name of the field
    pub const fn name(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Street => "street",
            Self::City => "city",
            Self::Postcode => "postcode",
            Self::Country => "country",
            Self::Phone => "phone",
            Self::Email => "email",
        }
    }

    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Street => "Street Address",
            Self::City => "City",
            Self::Postcode => "Postcode",
            Self::Country => "Country",
            Self::Phone => "Phone Number",
            Self::Email => "Email Address",
        }
    }

    /// HTML input type for the field
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Email => "email",
            _ => "text",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl Address {
    /// Set a field by its form name. Unknown names are ignored.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        match AddressField::from_name(name) {
            Some(field) => {
                self.assign(field, value);
                true
            }
            None => {
                tracing::debug!(field = %name, "Ignoring unknown address field");
                false
            }
        }
    }

    pub fn assign(&mut self, field: AddressField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::FullName => &self.full_name,
            AddressField::Street => &self.street,
            AddressField::City => &self.city,
            AddressField::Postcode => &self.postcode,
            AddressField::Country => &self.country,
            AddressField::Phone => &self.phone,
            AddressField::Email => &self.email,
        }
    }

    /// Restore every field to its default
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn slot_mut(&mut self, field: AddressField) -> &mut String {
        match field {
            AddressField::FullName => &mut self.full_name,
            AddressField::Street => &mut self.street,
            AddressField::City => &mut self.city,
            AddressField::Postcode => &mut self.postcode,
            AddressField::Country => &mut self.country,
            AddressField::Phone => &mut self.phone,
            AddressField::Email => &mut self.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_field_by_name() {
        let mut address = Address::default();
        assert!(address.set_field("fullName", "Ada Lovelace"));
        assert!(address.set_field("postcode", "SW1A 1AA"));
        assert!(!address.set_field("state", "London"));

        assert_eq!(address.full_name, "Ada Lovelace");
        assert_eq!(address.get(AddressField::Postcode), "SW1A 1AA");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut address = Address::default();
        address.assign(AddressField::Email, "ada@example.com");
        address.assign(AddressField::Country, "US");
        address.reset();

        assert_eq!(address, Address::default());
        assert_eq!(address.country, "UK");
        assert!(address.email.is_empty());
    }

    #[test]
    fn test_wire_names() {
        let mut address = Address::default();
        address.assign(AddressField::FullName, "Ada");
        let json = serde_json::to_value(&address).unwrap();

        assert_eq!(json["fullName"], "Ada");
        assert_eq!(json["country"], "UK");
        for field in AddressField::ALL {
            assert!(json.get(field.name()).is_some(), "missing {}", field.name());
        }
    }
}
