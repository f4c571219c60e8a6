//! Persistence for customers, products and orders.
//!
//! Every aggregate goes through the [`Repository`] contract. Two backends
//! implement it over the same relational schema:
//!
//! - [`PgOrderRepository`] and friends store rows in PostgreSQL
//! - [`InMemoryStore`] keeps the same rows in memory for tests
//!
//! An order is always written as one unit: its root row and all of its item
//! rows commit together or not at all.

pub mod config;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod rows;

pub use config::{StoreConfig, run_migrations};
pub use error::{RepositoryError, Result};
pub use memory::{
    InMemoryCustomerRepository, InMemoryOrderRepository, InMemoryProductRepository,
    InMemoryStore,
};
pub use postgres::{PgCustomerRepository, PgOrderRepository, PgProductRepository};
pub use repository::{CustomerRepository, OrderRepository, ProductRepository, Repository};
