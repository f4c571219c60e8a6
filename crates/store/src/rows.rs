//! Row shapes of the relational schema and their mapping to aggregates.
//!
//! Both backends store exactly these rows, so the conversion rules live here
//! once.

use common::Money;
use domain::{Address, Customer, Order, OrderItem, Product};

use crate::{RepositoryError, Result};

/// Row of the `order` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct OrderRow {
    pub id: String,
    pub customer_id: String,
    /// Denormalized snapshot of the order total, in cents.
    pub total: i64,
}

/// Row of the `order_item` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct OrderItemRow {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub quantity: i64,
    pub order_id: String,
    pub product_id: String,
    /// Index of the item within its order.
    pub position: i32,
}

/// Row of the `customer` table. Address columns are all set or all null.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CustomerRow {
    pub id: String,
    pub name: String,
    pub street: Option<String>,
    pub number: Option<i64>,
    pub zipcode: Option<String>,
    pub city: Option<String>,
    pub active: bool,
    pub reward_points: i64,
}

/// Row of the `product` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub price: i64,
}

/// Splits an order into its root row and item rows.
pub fn order_to_rows(order: &Order) -> Result<(OrderRow, Vec<OrderItemRow>)> {
    order.validate()?;

    let root = OrderRow {
        id: order.id().to_string(),
        customer_id: order.customer_id().to_string(),
        total: order.total().cents(),
    };

    let items = order
        .items()
        .iter()
        .enumerate()
        .map(|(position, item)| -> Result<OrderItemRow> {
            let position = i32::try_from(position).map_err(|_| RepositoryError::InvalidRow {
                entity: "Order",
                id: root.id.clone(),
                reason: "too many items".to_string(),
            })?;
            Ok(OrderItemRow {
                id: item.id().to_string(),
                name: item.name().to_string(),
                price: item.price().cents(),
                quantity: i64::from(item.quantity()),
                order_id: root.id.clone(),
                product_id: item.product_id().to_string(),
                position,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((root, items))
}

/// Rebuilds an order from its root row and item rows.
///
/// Items are ordered by `position`. The total is recomputed from the items;
/// a stored snapshot that disagrees is logged and otherwise ignored.
pub fn order_from_rows(root: OrderRow, mut items: Vec<OrderItemRow>) -> Result<Order> {
    items.sort_by_key(|item| item.position);

    let items = items
        .into_iter()
        .map(|row| -> Result<OrderItem> {
            let quantity = u32::try_from(row.quantity).map_err(|_| RepositoryError::InvalidRow {
                entity: "OrderItem",
                id: row.id.clone(),
                reason: format!("quantity {} out of range", row.quantity),
            })?;
            OrderItem::new(
                row.id,
                row.name,
                Money::from_cents(row.price),
                row.product_id,
                quantity,
            )
            .map_err(RepositoryError::from)
        })
        .collect::<Result<Vec<_>>>()?;

    let order = Order::new(root.id, root.customer_id, items)?;

    if order.total().cents() != root.total {
        tracing::warn!(
            order_id = %order.id(),
            stored = root.total,
            computed = order.total().cents(),
            "order total snapshot is stale"
        );
        metrics::counter!("order_total_snapshot_mismatch").increment(1);
    }

    Ok(order)
}

impl From<&Customer> for CustomerRow {
    fn from(customer: &Customer) -> Self {
        let address = customer.address();
        Self {
            id: customer.id().to_string(),
            name: customer.name().to_string(),
            street: address.map(|a| a.street().to_string()),
            number: address.map(|a| i64::from(a.number())),
            zipcode: address.map(|a| a.zip().to_string()),
            city: address.map(|a| a.city().to_string()),
            active: customer.is_active(),
            reward_points: customer.reward_points(),
        }
    }
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self> {
        let invalid = |reason: String| RepositoryError::InvalidRow {
            entity: "Customer",
            id: row.id.clone(),
            reason,
        };

        let address = match (&row.street, row.number, &row.zipcode, &row.city) {
            (Some(street), Some(number), Some(zip), Some(city)) => {
                let number = u32::try_from(number)
                    .map_err(|_| invalid(format!("address number {number} out of range")))?;
                Some(Address::new(street.clone(), number, zip.clone(), city.clone())?)
            }
            (None, None, None, None) => None,
            _ => return Err(invalid("partial address".to_string())),
        };

        Ok(Customer::restore(
            row.id,
            row.name,
            address,
            row.active,
            row.reward_points,
        )?)
    }
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().to_string(),
            name: product.name().to_string(),
            price: product.price().cents(),
        }
    }
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self> {
        Ok(Product::new(row.id, row.name, Money::from_cents(row.price))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        let items = vec![
            OrderItem::new("1", "Product 1", Money::from_cents(10), "p1", 2).unwrap(),
            OrderItem::new("2", "Product 2", Money::from_cents(5), "p2", 3).unwrap(),
        ];
        Order::new("123", "c1", items).unwrap()
    }

    #[test]
    fn order_rows_carry_total_snapshot_and_positions() {
        let (root, items) = order_to_rows(&order()).unwrap();

        assert_eq!(
            root,
            OrderRow {
                id: "123".to_string(),
                customer_id: "c1".to_string(),
                total: 35,
            }
        );
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].position, 0);
        assert_eq!(items[1].position, 1);
        assert!(items.iter().all(|item| item.order_id == "123"));
        assert_eq!(items[1].product_id, "p2");
        assert_eq!(items[1].quantity, 3);
    }

    #[test]
    fn order_from_rows_orders_items_by_position() {
        let (root, mut items) = order_to_rows(&order()).unwrap();
        items.reverse();

        let rebuilt = order_from_rows(root, items).unwrap();

        assert_eq!(rebuilt, order());
    }

    #[test]
    fn order_from_rows_recomputes_stale_total() {
        let (mut root, items) = order_to_rows(&order()).unwrap();
        root.total = 999;

        let rebuilt = order_from_rows(root, items).unwrap();

        assert_eq!(rebuilt.total(), Money::from_cents(35));
    }

    #[test]
    fn order_without_item_rows_is_rejected() {
        let (root, _) = order_to_rows(&order()).unwrap();
        let result = order_from_rows(root, Vec::new());
        assert!(matches!(
            result,
            Err(RepositoryError::Validation(domain::ValidationError::NoItems))
        ));
    }

    #[test]
    fn rows_with_unrepresentable_total_are_rejected() {
        let root = OrderRow {
            id: "123".to_string(),
            customer_id: "c1".to_string(),
            total: 0,
        };
        let big = |id: &str, position| OrderItemRow {
            id: id.to_string(),
            name: "Big".to_string(),
            price: i64::MAX / 2,
            quantity: 2,
            order_id: "123".to_string(),
            product_id: "p1".to_string(),
            position,
        };

        let result = order_from_rows(root, vec![big("1", 0), big("2", 1)]);

        assert!(matches!(
            result,
            Err(RepositoryError::Validation(
                domain::ValidationError::AmountOverflow { entity: "Order" }
            ))
        ));
    }

    #[test]
    fn customer_row_round_trip() {
        let mut customer = Customer::new("c1", "Customer 1").unwrap();
        customer.change_address(Address::new("Street 1", 1, "Zipcode 1", "City 1").unwrap());
        customer.activate().unwrap();
        customer.add_reward_points(15).unwrap();

        let row = CustomerRow::from(&customer);
        assert_eq!(row.zipcode.as_deref(), Some("Zipcode 1"));
        assert_eq!(row.number, Some(1));

        assert_eq!(Customer::try_from(row).unwrap(), customer);
    }

    #[test]
    fn customer_without_address_maps_to_nulls() {
        let customer = Customer::new("c1", "Customer 1").unwrap();
        let row = CustomerRow::from(&customer);
        assert!(row.street.is_none() && row.number.is_none());
        assert_eq!(Customer::try_from(row).unwrap(), customer);
    }

    #[test]
    fn partial_address_row_is_invalid() {
        let row = CustomerRow {
            id: "c1".to_string(),
            name: "Customer 1".to_string(),
            street: Some("Street 1".to_string()),
            number: None,
            zipcode: None,
            city: None,
            active: false,
            reward_points: 0,
        };
        assert!(matches!(
            Customer::try_from(row),
            Err(RepositoryError::InvalidRow { .. })
        ));
    }

    #[test]
    fn product_row_round_trip() {
        let product = Product::new("p1", "Product 1", Money::from_cents(1000)).unwrap();
        let row = ProductRow::from(&product);
        assert_eq!(row.price, 1000);
        assert_eq!(Product::try_from(row).unwrap(), product);
    }
}
