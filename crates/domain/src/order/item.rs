use common::Money;
use serde::Serialize;

use crate::ValidationError;
use crate::error::require_text;
use crate::product::ProductId;

use super::OrderItemId;

/// A line of an order.
///
/// Owned by exactly one [`Order`](super::Order). The product is referenced by
/// id only; name and price are copied at the time the item is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    id: OrderItemId,
    name: String,
    price: Money,
    product_id: ProductId,
    quantity: u32,
}

impl OrderItem {
    /// Creates a validated order item.
    pub fn new(
        id: impl Into<OrderItemId>,
        name: impl Into<String>,
        price: Money,
        product_id: impl Into<ProductId>,
        quantity: u32,
    ) -> Result<Self, ValidationError> {
        let item = Self {
            id: id.into(),
            name: name.into(),
            price,
            product_id: product_id.into(),
            quantity,
        };
        require_text(item.id.as_str(), "OrderItem", "id")?;
        require_text(&item.name, "OrderItem", "name")?;
        require_text(item.product_id.as_str(), "OrderItem", "product_id")?;
        if price.is_negative() {
            return Err(ValidationError::NegativePrice {
                entity: "OrderItem",
                price,
            });
        }
        if quantity == 0 {
            return Err(ValidationError::InvalidQuantity { quantity });
        }
        if price.checked_multiply(quantity).is_none() {
            return Err(ValidationError::AmountOverflow {
                entity: "OrderItem",
            });
        }
        Ok(item)
    }

    pub fn id(&self) -> &OrderItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price.
    pub fn price(&self) -> Money {
        self.price
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns `price * quantity`.
    pub fn total(&self) -> Money {
        // Checked in `new`.
        self.price
            .checked_multiply(self.quantity)
            .unwrap_or(Money::from_cents(i64::MAX))
    }
}
