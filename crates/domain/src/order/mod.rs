//! Order aggregate and related types.

mod aggregate;
mod factory;
mod item;
mod service;

pub use aggregate::Order;
pub use factory::{OrderFactory, OrderItemProps, OrderProps};
pub use item::OrderItem;
pub use service::OrderService;

common::define_id!(
    /// Identifier of an order, chosen by the caller.
    OrderId
);

common::define_id!(
    /// Identifier of an item within an order.
    OrderItemId
);
