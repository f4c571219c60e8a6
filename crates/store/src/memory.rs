use std::sync::Arc;

use async_trait::async_trait;
use domain::{Customer, CustomerId, Order, OrderId, Product, ProductId};
use tokio::sync::RwLock;

use crate::rows::{
    CustomerRow, OrderItemRow, OrderRow, ProductRow, order_from_rows, order_to_rows,
};
use crate::{RepositoryError, Result, repository::Repository};

/// Tables of the in-memory store, rows kept in persisted order.
#[derive(Debug, Default)]
struct Tables {
    orders: Vec<OrderRow>,
    order_items: Vec<OrderItemRow>,
    customers: Vec<CustomerRow>,
    products: Vec<ProductRow>,
}

impl Tables {
    fn items_of(&self, order_id: &str) -> Vec<OrderItemRow> {
        self.order_items
            .iter()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect()
    }
}

/// In-memory store for testing.
///
/// Holds the same rows as the PostgreSQL schema behind a single lock. Each
/// write takes the lock once, so an aggregate's rows change together.
/// Clones share the same tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> InMemoryOrderRepository {
        InMemoryOrderRepository {
            store: self.clone(),
        }
    }

    pub fn customers(&self) -> InMemoryCustomerRepository {
        InMemoryCustomerRepository {
            store: self.clone(),
        }
    }

    pub fn products(&self) -> InMemoryProductRepository {
        InMemoryProductRepository {
            store: self.clone(),
        }
    }

    /// Returns the stored root row of an order.
    pub async fn order_row(&self, id: &OrderId) -> Option<OrderRow> {
        let tables = self.tables.read().await;
        tables.orders.iter().find(|row| row.id == id.as_str()).cloned()
    }

    /// Returns the stored item rows of an order, in position order.
    pub async fn order_item_rows(&self, id: &OrderId) -> Vec<OrderItemRow> {
        let mut items = self.tables.read().await.items_of(id.as_str());
        items.sort_by_key(|item| item.position);
        items
    }

    /// Returns the number of item rows across all orders.
    pub async fn order_item_count(&self) -> usize {
        self.tables.read().await.order_items.len()
    }

    /// Clears every table.
    pub async fn clear(&self) {
        *self.tables.write().await = Tables::default();
    }
}

/// In-memory repository of [`Order`] aggregates.
#[derive(Clone)]
pub struct InMemoryOrderRepository {
    store: InMemoryStore,
}

#[async_trait]
impl Repository for InMemoryOrderRepository {
    type Entity = Order;
    type Id = OrderId;

    #[tracing::instrument(skip(self, order), fields(order_id = %order.id()))]
    async fn create(&self, order: &Order) -> Result<()> {
        let (root, items) = order_to_rows(order)?;

        let mut tables = self.store.tables.write().await;
        if tables.orders.iter().any(|row| row.id == root.id) {
            return Err(RepositoryError::already_exists("Order", &root.id));
        }

        tables.orders.push(root);
        tables.order_items.extend(items);
        metrics::counter!("repository_writes", "entity" => "order").increment(1);
        Ok(())
    }

    #[tracing::instrument(skip(self, order), fields(order_id = %order.id()))]
    async fn update(&self, order: &Order) -> Result<()> {
        let (root, items) = order_to_rows(order)?;

        let mut tables = self.store.tables.write().await;
        let Some(stored) = tables.orders.iter_mut().find(|row| row.id == root.id) else {
            return Err(RepositoryError::not_found("Order", &root.id));
        };

        *stored = root;
        tables.order_items.retain(|item| item.order_id != order.id().as_str());
        tables.order_items.extend(items);
        metrics::counter!("repository_writes", "entity" => "order").increment(1);
        Ok(())
    }

    async fn find(&self, id: &OrderId) -> Result<Order> {
        let tables = self.store.tables.read().await;
        let root = tables
            .orders
            .iter()
            .find(|row| row.id == id.as_str())
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("Order", id))?;
        let items = tables.items_of(id.as_str());
        drop(tables);

        order_from_rows(root, items)
    }

    async fn find_all(&self) -> Result<Vec<Order>> {
        let snapshot: Vec<(OrderRow, Vec<OrderItemRow>)> = {
            let tables = self.store.tables.read().await;
            tables
                .orders
                .iter()
                .map(|root| (root.clone(), tables.items_of(&root.id)))
                .collect()
        };

        snapshot
            .into_iter()
            .map(|(root, items)| order_from_rows(root, items))
            .collect()
    }
}

/// In-memory repository of [`Customer`]s.
#[derive(Clone)]
pub struct InMemoryCustomerRepository {
    store: InMemoryStore,
}

#[async_trait]
impl Repository for InMemoryCustomerRepository {
    type Entity = Customer;
    type Id = CustomerId;

    #[tracing::instrument(skip(self, customer), fields(customer_id = %customer.id()))]
    async fn create(&self, customer: &Customer) -> Result<()> {
        let row = CustomerRow::from(customer);

        let mut tables = self.store.tables.write().await;
        if tables.customers.iter().any(|stored| stored.id == row.id) {
            return Err(RepositoryError::already_exists("Customer", &row.id));
        }
        tables.customers.push(row);
        metrics::counter!("repository_writes", "entity" => "customer").increment(1);
        Ok(())
    }

    #[tracing::instrument(skip(self, customer), fields(customer_id = %customer.id()))]
    async fn update(&self, customer: &Customer) -> Result<()> {
        let row = CustomerRow::from(customer);

        let mut tables = self.store.tables.write().await;
        let Some(stored) = tables.customers.iter_mut().find(|stored| stored.id == row.id) else {
            return Err(RepositoryError::not_found("Customer", &row.id));
        };
        *stored = row;
        metrics::counter!("repository_writes", "entity" => "customer").increment(1);
        Ok(())
    }

    async fn find(&self, id: &CustomerId) -> Result<Customer> {
        let tables = self.store.tables.read().await;
        tables
            .customers
            .iter()
            .find(|row| row.id == id.as_str())
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("Customer", id))?
            .try_into()
    }

    async fn find_all(&self) -> Result<Vec<Customer>> {
        let tables = self.store.tables.read().await;
        tables
            .customers
            .iter()
            .cloned()
            .map(Customer::try_from)
            .collect()
    }
}

/// In-memory repository of [`Product`]s.
#[derive(Clone)]
pub struct InMemoryProductRepository {
    store: InMemoryStore,
}

#[async_trait]
impl Repository for InMemoryProductRepository {
    type Entity = Product;
    type Id = ProductId;

    #[tracing::instrument(skip(self, product), fields(product_id = %product.id()))]
    async fn create(&self, product: &Product) -> Result<()> {
        let row = ProductRow::from(product);

        let mut tables = self.store.tables.write().await;
        if tables.products.iter().any(|stored| stored.id == row.id) {
            return Err(RepositoryError::already_exists("Product", &row.id));
        }
        tables.products.push(row);
        metrics::counter!("repository_writes", "entity" => "product").increment(1);
        Ok(())
    }

    #[tracing::instrument(skip(self, product), fields(product_id = %product.id()))]
    async fn update(&self, product: &Product) -> Result<()> {
        let row = ProductRow::from(product);

        let mut tables = self.store.tables.write().await;
        let Some(stored) = tables.products.iter_mut().find(|stored| stored.id == row.id) else {
            return Err(RepositoryError::not_found("Product", &row.id));
        };
        *stored = row;
        metrics::counter!("repository_writes", "entity" => "product").increment(1);
        Ok(())
    }

    async fn find(&self, id: &ProductId) -> Result<Product> {
        let tables = self.store.tables.read().await;
        tables
            .products
            .iter()
            .find(|row| row.id == id.as_str())
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("Product", id))?
            .try_into()
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        let tables = self.store.tables.read().await;
        tables
            .products
            .iter()
            .cloned()
            .map(Product::try_from)
            .collect()
    }
}
