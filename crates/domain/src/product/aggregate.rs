use common::Money;
use serde::Serialize;

use crate::ValidationError;
use crate::error::require_text;

use super::ProductId;

/// A product that can be ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
}

impl Product {
    /// Creates a validated product. Price may be zero but not negative.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
    ) -> Result<Self, ValidationError> {
        let product = Self {
            id: id.into(),
            name: name.into(),
            price,
        };
        require_text(product.id.as_str(), "Product", "id")?;
        require_text(&product.name, "Product", "name")?;
        check_price(price)?;
        Ok(product)
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        require_text(&name, "Product", "name")?;
        self.name = name;
        Ok(())
    }

    pub fn change_price(&mut self, price: Money) -> Result<(), ValidationError> {
        check_price(price)?;
        self.price = price;
        Ok(())
    }
}

pub(super) fn check_price(price: Money) -> Result<(), ValidationError> {
    if price.is_negative() {
        return Err(ValidationError::NegativePrice {
            entity: "Product",
            price,
        });
    }
    Ok(())
}
