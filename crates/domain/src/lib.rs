//! Domain layer for order management.
//!
//! This crate provides the domain model and its notifications:
//! - [`Customer`] with its [`Address`] value object
//! - [`Product`]
//! - [`Order`] aggregate root owning its [`OrderItem`]s
//! - [`DomainEvent`] values and the handlers that react to them
//! - Services and factories spanning several objects

pub mod customer;
pub mod error;
pub mod events;
pub mod order;
pub mod product;

pub use customer::{Address, Customer, CustomerFactory, CustomerId};
pub use error::ValidationError;
pub use events::{
    CustomerAddressChangedData, CustomerCreatedData, DomainEvent, DomainEventPayload, EventKind,
    ProductCreatedData, register_default_handlers,
};
pub use order::{
    Order, OrderFactory, OrderId, OrderItem, OrderItemId, OrderItemProps, OrderProps,
    OrderService,
};
pub use product::{Product, ProductId, ProductService};
