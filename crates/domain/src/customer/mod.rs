//! Customer aggregate and its address value object.

mod address;
mod aggregate;
mod factory;

pub use address::Address;
pub use aggregate::Customer;
pub use factory::CustomerFactory;

common::define_id!(
    /// Identifier of a customer, chosen by the caller.
    CustomerId
);
