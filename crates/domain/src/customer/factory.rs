use crate::ValidationError;

use super::{Address, Customer, CustomerId};

/// Builds customers in their common starting shapes.
pub struct CustomerFactory;

impl CustomerFactory {
    /// Creates an inactive customer without address.
    pub fn create(
        id: impl Into<CustomerId>,
        name: impl Into<String>,
    ) -> Result<Customer, ValidationError> {
        Customer::new(id, name)
    }

    /// Creates a customer that already has an address and is active.
    pub fn create_with_address(
        id: impl Into<CustomerId>,
        name: impl Into<String>,
        address: Address,
    ) -> Result<Customer, ValidationError> {
        let mut customer = Customer::new(id, name)?;
        customer.change_address(address);
        customer.activate()?;
        Ok(customer)
    }
}
