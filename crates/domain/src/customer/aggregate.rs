//! Customer aggregate implementation.

use serde::Serialize;

use crate::ValidationError;
use crate::error::require_text;

use super::{Address, CustomerId};

/// A customer who places orders.
///
/// A customer is created inactive, without address and with zero reward
/// points. Activation requires an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    address: Option<Address>,
    active: bool,
    reward_points: i64,
}

impl Customer {
    /// Creates a new customer.
    pub fn new(id: impl Into<CustomerId>, name: impl Into<String>) -> Result<Self, ValidationError> {
        Self::restore(id, name, None, false, 0)
    }

    /// Rebuilds a customer from previously persisted state.
    ///
    /// Applies the same validation as [`Customer::new`], plus the activation
    /// and reward point invariants.
    pub fn restore(
        id: impl Into<CustomerId>,
        name: impl Into<String>,
        address: Option<Address>,
        active: bool,
        reward_points: i64,
    ) -> Result<Self, ValidationError> {
        let customer = Self {
            id: id.into(),
            name: name.into(),
            address,
            active,
            reward_points,
        };
        customer.validate()?;
        Ok(customer)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(self.id.as_str(), "Customer", "id")?;
        require_text(&self.name, "Customer", "name")?;
        if self.active && self.address.is_none() {
            return Err(ValidationError::AddressRequired);
        }
        if self.reward_points < 0 {
            return Err(ValidationError::NegativeRewardPoints {
                points: self.reward_points,
            });
        }
        Ok(())
    }
}

// Query methods
impl Customer {
    pub fn id(&self) -> &CustomerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reward_points(&self) -> i64 {
        self.reward_points
    }
}

// Mutations
impl Customer {
    /// Renames the customer. An empty name is rejected and the old one kept.
    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        require_text(&name, "Customer", "name")?;
        self.name = name;
        Ok(())
    }

    /// Replaces the address wholesale.
    pub fn change_address(&mut self, address: Address) {
        self.address = Some(address);
    }

    /// Activates the customer.
    pub fn activate(&mut self) -> Result<(), ValidationError> {
        if self.address.is_none() {
            return Err(ValidationError::AddressRequired);
        }
        self.active = true;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Adds reward points. Points never decrease.
    pub fn add_reward_points(&mut self, points: i64) -> Result<(), ValidationError> {
        if points < 0 {
            return Err(ValidationError::NegativeRewardPoints { points });
        }
        self.reward_points = self.reward_points.checked_add(points).ok_or(
            ValidationError::RewardPointsOverflow {
                current: self.reward_points,
                points,
            },
        )?;
        Ok(())
    }
}
