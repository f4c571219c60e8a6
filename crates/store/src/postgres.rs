//! PostgreSQL-backed repositories.

use std::collections::HashMap;

use async_trait::async_trait;
use domain::{Customer, CustomerId, Order, OrderId, Product, ProductId};
use sqlx::{PgPool, Postgres, Transaction};

use crate::rows::{
    CustomerRow, OrderItemRow, OrderRow, ProductRow, order_from_rows, order_to_rows,
};
use crate::{RepositoryError, Result, repository::Repository};

/// Opens a read transaction that sees one consistent snapshot.
async fn begin_snapshot(pool: &PgPool) -> Result<Transaction<'static, Postgres>> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}

/// PostgreSQL repository of [`Order`] aggregates.
///
/// The root row and its item rows are always written in one transaction.
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn insert_items(
        tx: &mut Transaction<'static, Postgres>,
        items: &[OrderItemRow],
    ) -> Result<()> {
        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_item (id, name, price, quantity, order_id, product_id, position)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(&item.id)
            .bind(&item.name)
            .bind(item.price)
            .bind(item.quantity)
            .bind(&item.order_id)
            .bind(&item.product_id)
            .bind(item.position)
            .execute(&mut **tx)
            .await
            .map_err(|e| RepositoryError::on_insert(e, "OrderItem", &item.id))?;
        }
        Ok(())
    }
}

#[async_trait]
impl Repository for PgOrderRepository {
    type Entity = Order;
    type Id = OrderId;

    #[tracing::instrument(skip(self, order), fields(order_id = %order.id()))]
    async fn create(&self, order: &Order) -> Result<()> {
        let (root, items) = order_to_rows(order)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(r#"INSERT INTO "order" (id, customer_id, total) VALUES ($1, $2, $3)"#)
            .bind(&root.id)
            .bind(&root.customer_id)
            .bind(root.total)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::on_insert(e, "Order", &root.id))?;

        Self::insert_items(&mut tx, &items).await?;

        tx.commit().await?;
        metrics::counter!("repository_writes", "entity" => "order").increment(1);
        Ok(())
    }

    #[tracing::instrument(skip(self, order), fields(order_id = %order.id()))]
    async fn update(&self, order: &Order) -> Result<()> {
        let (root, items) = order_to_rows(order)?;

        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(r#"UPDATE "order" SET customer_id = $2, total = $3 WHERE id = $1"#)
            .bind(&root.id)
            .bind(&root.customer_id)
            .bind(root.total)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(RepositoryError::not_found("Order", &root.id));
        }

        sqlx::query("DELETE FROM order_item WHERE order_id = $1")
            .bind(&root.id)
            .execute(&mut *tx)
            .await?;

        Self::insert_items(&mut tx, &items).await?;

        tx.commit().await?;
        metrics::counter!("repository_writes", "entity" => "order").increment(1);
        Ok(())
    }

    async fn find(&self, id: &OrderId) -> Result<Order> {
        let mut tx = begin_snapshot(&self.pool).await?;

        let root: Option<OrderRow> =
            sqlx::query_as(r#"SELECT id, customer_id, total FROM "order" WHERE id = $1"#)
                .bind(id.as_str())
                .fetch_optional(&mut *tx)
                .await?;

        let Some(root) = root else {
            return Err(RepositoryError::not_found("Order", id));
        };

        let items: Vec<OrderItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, price, quantity, order_id, product_id, position
            FROM order_item
            WHERE order_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(id.as_str())
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        order_from_rows(root, items)
    }

    async fn find_all(&self) -> Result<Vec<Order>> {
        let mut tx = begin_snapshot(&self.pool).await?;

        let roots: Vec<OrderRow> =
            sqlx::query_as(r#"SELECT id, customer_id, total FROM "order" ORDER BY seq ASC"#)
                .fetch_all(&mut *tx)
                .await?;

        let item_rows: Vec<OrderItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, price, quantity, order_id, product_id, position
            FROM order_item
            ORDER BY order_id ASC, position ASC
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let mut items_by_order: HashMap<String, Vec<OrderItemRow>> = HashMap::new();
        for item in item_rows {
            items_by_order
                .entry(item.order_id.clone())
                .or_default()
                .push(item);
        }

        roots
            .into_iter()
            .map(|root| {
                let items = items_by_order.remove(&root.id).unwrap_or_default();
                order_from_rows(root, items)
            })
            .collect()
    }
}

/// PostgreSQL repository of [`Customer`]s.
#[derive(Clone)]
pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgCustomerRepository {
    type Entity = Customer;
    type Id = CustomerId;

    #[tracing::instrument(skip(self, customer), fields(customer_id = %customer.id()))]
    async fn create(&self, customer: &Customer) -> Result<()> {
        let row = CustomerRow::from(customer);

        sqlx::query(
            r#"
            INSERT INTO customer (id, name, street, number, zipcode, city, active, reward_points)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.street)
        .bind(row.number)
        .bind(&row.zipcode)
        .bind(&row.city)
        .bind(row.active)
        .bind(row.reward_points)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::on_insert(e, "Customer", &row.id))?;

        metrics::counter!("repository_writes", "entity" => "customer").increment(1);
        Ok(())
    }

    #[tracing::instrument(skip(self, customer), fields(customer_id = %customer.id()))]
    async fn update(&self, customer: &Customer) -> Result<()> {
        let row = CustomerRow::from(customer);

        let updated = sqlx::query(
            r#"
            UPDATE customer
            SET name = $2, street = $3, number = $4, zipcode = $5, city = $6,
                active = $7, reward_points = $8
            WHERE id = $1
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.street)
        .bind(row.number)
        .bind(&row.zipcode)
        .bind(&row.city)
        .bind(row.active)
        .bind(row.reward_points)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(RepositoryError::not_found("Customer", &row.id));
        }

        metrics::counter!("repository_writes", "entity" => "customer").increment(1);
        Ok(())
    }

    async fn find(&self, id: &CustomerId) -> Result<Customer> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, name, street, number, zipcode, city, active, reward_points
            FROM customer
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| RepositoryError::not_found("Customer", id))?
            .try_into()
    }

    async fn find_all(&self) -> Result<Vec<Customer>> {
        let rows: Vec<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, name, street, number, zipcode, city, active, reward_points
            FROM customer
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Customer::try_from).collect()
    }
}

/// PostgreSQL repository of [`Product`]s.
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgProductRepository {
    type Entity = Product;
    type Id = ProductId;

    #[tracing::instrument(skip(self, product), fields(product_id = %product.id()))]
    async fn create(&self, product: &Product) -> Result<()> {
        let row = ProductRow::from(product);

        sqlx::query("INSERT INTO product (id, name, price) VALUES ($1, $2, $3)")
            .bind(&row.id)
            .bind(&row.name)
            .bind(row.price)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::on_insert(e, "Product", &row.id))?;

        metrics::counter!("repository_writes", "entity" => "product").increment(1);
        Ok(())
    }

    #[tracing::instrument(skip(self, product), fields(product_id = %product.id()))]
    async fn update(&self, product: &Product) -> Result<()> {
        let row = ProductRow::from(product);

        let updated = sqlx::query("UPDATE product SET name = $2, price = $3 WHERE id = $1")
            .bind(&row.id)
            .bind(&row.name)
            .bind(row.price)
            .execute(&self.pool)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(RepositoryError::not_found("Product", &row.id));
        }

        metrics::counter!("repository_writes", "entity" => "product").increment(1);
        Ok(())
    }

    async fn find(&self, id: &ProductId) -> Result<Product> {
        let row: Option<ProductRow> =
            sqlx::query_as("SELECT id, name, price FROM product WHERE id = $1")
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await?;

        row.ok_or_else(|| RepositoryError::not_found("Product", id))?
            .try_into()
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        let rows: Vec<ProductRow> =
            sqlx::query_as("SELECT id, name, price FROM product ORDER BY seq ASC")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Product::try_from).collect()
    }
}
