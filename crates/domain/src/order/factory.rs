use common::Money;

use crate::ValidationError;

use super::{Order, OrderItem};

/// Plain data describing an order item.
#[derive(Debug, Clone)]
pub struct OrderItemProps {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub product_id: String,
    pub quantity: u32,
}

/// Plain data describing an order.
#[derive(Debug, Clone)]
pub struct OrderProps {
    pub id: String,
    pub customer_id: String,
    pub items: Vec<OrderItemProps>,
}

/// Builds orders from plain data.
pub struct OrderFactory;

impl OrderFactory {
    /// Validates every item and the order itself.
    pub fn create(props: OrderProps) -> Result<Order, ValidationError> {
        let items = props
            .items
            .into_iter()
            .map(|item| {
                OrderItem::new(item.id, item.name, item.price, item.product_id, item.quantity)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Order::new(props.id, props.customer_id, items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_order_from_props() {
        let props = OrderProps {
            id: "o1".to_string(),
            customer_id: "c1".to_string(),
            items: vec![OrderItemProps {
                id: "i1".to_string(),
                name: "Product".to_string(),
                price: Money::from_cents(100),
                product_id: "p1".to_string(),
                quantity: 1,
            }],
        };

        let order = OrderFactory::create(props).unwrap();

        assert_eq!(order.id().as_str(), "o1");
        assert_eq!(order.customer_id().as_str(), "c1");
        assert_eq!(order.items().len(), 1);
        assert_eq!(order.total(), Money::from_cents(100));
    }

    #[test]
    fn test_invalid_item_props_fail() {
        let props = OrderProps {
            id: "o1".to_string(),
            customer_id: "c1".to_string(),
            items: vec![OrderItemProps {
                id: "i1".to_string(),
                name: "Product".to_string(),
                price: Money::from_cents(100),
                product_id: "p1".to_string(),
                quantity: 0,
            }],
        };

        assert!(matches!(
            OrderFactory::create(props),
            Err(ValidationError::InvalidQuantity { .. })
        ));
    }
}
