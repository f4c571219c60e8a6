//! Domain error types.

use common::Money;
use thiserror::Error;

/// An invariant of a domain object was violated.
///
/// Raised synchronously by constructors and mutators. The object is left
/// untouched when a mutation is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field or identifier is empty.
    #[error("{entity}: {field} is required")]
    Required {
        entity: &'static str,
        field: &'static str,
    },

    /// Address number must be positive.
    #[error("Address: number must be greater than 0")]
    InvalidAddressNumber,

    /// Price must not be negative.
    #[error("{entity}: price must not be negative (got {price})")]
    NegativePrice { entity: &'static str, price: Money },

    /// Quantity must be positive.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// Order has no items.
    #[error("Order must have at least one item")]
    NoItems,

    /// Two items of one order share an id.
    #[error("Duplicate order item: {item_id}")]
    DuplicateItem { item_id: String },

    /// Item not found in order.
    #[error("Item not found: {item_id}")]
    ItemNotFound { item_id: String },

    /// Customer cannot be activated without an address.
    #[error("Address is mandatory to activate a customer")]
    AddressRequired,

    /// Reward points only accumulate.
    #[error("Reward points must not be negative (got {points})")]
    NegativeRewardPoints { points: i64 },

    /// A price, total or other amount does not fit in 64-bit cents.
    #[error("{entity}: amount out of range")]
    AmountOverflow { entity: &'static str },

    /// Adding points would exceed the largest representable balance.
    #[error("Reward points overflow: {current} + {points}")]
    RewardPointsOverflow { current: i64, points: i64 },
}

/// Rejects blank text.
pub(crate) fn require_text(
    value: &str,
    entity: &'static str,
    field: &'static str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { entity, field });
    }
    Ok(())
}
