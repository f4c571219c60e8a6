//! Product aggregate and pricing service.

mod aggregate;
mod service;

pub use aggregate::Product;
pub use service::ProductService;

common::define_id!(
    /// Identifier of a product, chosen by the caller.
    ProductId
);
