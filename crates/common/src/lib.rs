//! Shared primitives for the order-management workspace.
//!
//! - [`define_id!`] declares caller-assigned string identifiers
//! - [`Money`] is a fixed-point amount in cents

mod money;
mod types;

pub use money::Money;

#[doc(hidden)]
pub use serde as __serde;
