//! Domain events raised by customers and products.

mod handlers;

use chrono::{DateTime, Utc};
use common::Money;
use dispatcher::Event;
use serde::Serialize;

use crate::customer::{Address, Customer, CustomerId};
use crate::product::{Product, ProductId};

pub use handlers::{
    LogWhenCustomerAddressChanged, SendEmailWhenCustomerIsCreated, SendEmailWhenProductIsCreated,
    SendToCloudWhenCustomerIsCreated, register_default_handlers,
};

/// Names under which handlers are registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    CustomerCreated,
    CustomerAddressChanged,
    ProductCreated,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::CustomerCreated => "CustomerCreated",
            EventKind::CustomerAddressChanged => "CustomerAddressChanged",
            EventKind::ProductCreated => "ProductCreated",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A domain event: when it happened plus what happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainEvent {
    occurred_at: DateTime<Utc>,
    payload: DomainEventPayload,
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum DomainEventPayload {
    /// A customer was created.
    CustomerCreated(CustomerCreatedData),

    /// A customer received a new address.
    CustomerAddressChanged(CustomerAddressChangedData),

    /// A product was created.
    ProductCreated(ProductCreatedData),
}

/// Data for CustomerCreated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerCreatedData {
    pub customer_id: CustomerId,
    pub name: String,
}

/// Data for CustomerAddressChanged event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerAddressChangedData {
    pub customer_id: CustomerId,
    pub name: String,
    pub address: Address,
}

/// Data for ProductCreated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCreatedData {
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
}

impl DomainEvent {
    /// Wraps a payload, stamping the current time.
    pub fn new(payload: DomainEventPayload) -> Self {
        Self::at(Utc::now(), payload)
    }

    /// Wraps a payload with an explicit occurrence time.
    pub fn at(occurred_at: DateTime<Utc>, payload: DomainEventPayload) -> Self {
        Self {
            occurred_at,
            payload,
        }
    }

    pub fn customer_created(customer: &Customer) -> Self {
        Self::new(DomainEventPayload::CustomerCreated(CustomerCreatedData {
            customer_id: customer.id().clone(),
            name: customer.name().to_string(),
        }))
    }

    /// Returns `None` if the customer has no address.
    pub fn customer_address_changed(customer: &Customer) -> Option<Self> {
        let address = customer.address()?.clone();
        Some(Self::new(DomainEventPayload::CustomerAddressChanged(
            CustomerAddressChangedData {
                customer_id: customer.id().clone(),
                name: customer.name().to_string(),
                address,
            },
        )))
    }

    pub fn product_created(product: &Product) -> Self {
        Self::new(DomainEventPayload::ProductCreated(ProductCreatedData {
            product_id: product.id().clone(),
            name: product.name().to_string(),
            price: product.price(),
        }))
    }

    pub fn payload(&self) -> &DomainEventPayload {
        &self.payload
    }
}

impl DomainEventPayload {
    pub fn kind(&self) -> EventKind {
        match self {
            DomainEventPayload::CustomerCreated(_) => EventKind::CustomerCreated,
            DomainEventPayload::CustomerAddressChanged(_) => EventKind::CustomerAddressChanged,
            DomainEventPayload::ProductCreated(_) => EventKind::ProductCreated,
        }
    }
}

impl Event for DomainEvent {
    type Kind = EventKind;

    fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
