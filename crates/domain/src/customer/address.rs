use serde::Serialize;

use crate::ValidationError;
use crate::error::require_text;

/// Postal address of a customer.
///
/// Immutable once built; a customer changes address by receiving a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    street: String,
    number: u32,
    zip: String,
    city: String,
}

impl Address {
    /// Creates a validated address.
    pub fn new(
        street: impl Into<String>,
        number: u32,
        zip: impl Into<String>,
        city: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let address = Self {
            street: street.into(),
            number,
            zip: zip.into(),
            city: city.into(),
        };
        address.validate()?;
        Ok(address)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.street, "Address", "street")?;
        if self.number == 0 {
            return Err(ValidationError::InvalidAddressNumber);
        }
        require_text(&self.zip, "Address", "zip")?;
        require_text(&self.city, "Address", "city")?;
        Ok(())
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {} {}",
            self.street, self.number, self.zip, self.city
        )
    }
}
