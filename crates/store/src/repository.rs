use async_trait::async_trait;
use domain::{Customer, CustomerId, Order, OrderId, Product, ProductId};

use crate::Result;

/// Persistence of one aggregate type.
///
/// Every write is all-or-nothing: after an error, readers see either the
/// previous state or nothing, never a partly written aggregate.
#[async_trait]
pub trait Repository: Send + Sync {
    /// The aggregate root stored by this repository.
    type Entity: Send + Sync;

    /// Identifier of the aggregate root.
    type Id: Send + Sync;

    /// Stores a new aggregate. Fails with `AlreadyExists` if the id is taken.
    async fn create(&self, entity: &Self::Entity) -> Result<()>;

    /// Overwrites a stored aggregate. Fails with `NotFound` if it is missing.
    async fn update(&self, entity: &Self::Entity) -> Result<()>;

    /// Loads one aggregate. Fails with `NotFound` if it is missing.
    async fn find(&self, id: &Self::Id) -> Result<Self::Entity>;

    /// Loads every aggregate in persisted order.
    async fn find_all(&self) -> Result<Vec<Self::Entity>>;
}

/// Repository of [`Customer`]s.
pub trait CustomerRepository: Repository<Entity = Customer, Id = CustomerId> {}

impl<T: Repository<Entity = Customer, Id = CustomerId> + ?Sized> CustomerRepository for T {}

/// Repository of [`Product`]s.
pub trait ProductRepository: Repository<Entity = Product, Id = ProductId> {}

impl<T: Repository<Entity = Product, Id = ProductId> + ?Sized> ProductRepository for T {}

/// Repository of [`Order`] aggregates, root and items together.
///
/// `update` replaces the whole item set, so the stored items always match
/// the in-memory collection. Referenced customers and products are never
/// loaded or checked.
pub trait OrderRepository: Repository<Entity = Order, Id = OrderId> {}

impl<T: Repository<Entity = Order, Id = OrderId> + ?Sized> OrderRepository for T {}
