//! Order service spanning orders and customers.

use common::Money;

use crate::ValidationError;
use crate::customer::Customer;

use super::{Order, OrderId, OrderItem};

/// Operations that involve more than one order, or an order and its customer.
pub struct OrderService;

impl OrderService {
    /// Returns the combined total of the given orders.
    ///
    /// Fails if the combined total does not fit.
    pub fn total(orders: &[Order]) -> Result<Money, ValidationError> {
        Money::checked_sum(orders.iter().map(Order::total))
            .ok_or(ValidationError::AmountOverflow { entity: "Order" })
    }

    /// Places an order for `customer` and awards reward points.
    ///
    /// The customer earns half of the order total, in cents, rounded down.
    /// Nothing changes on the customer if the order is invalid.
    #[tracing::instrument(skip_all, fields(customer_id = %customer.id()))]
    pub fn place_order(
        customer: &mut Customer,
        order_id: impl Into<OrderId>,
        items: Vec<OrderItem>,
    ) -> Result<Order, ValidationError> {
        let order = Order::new(order_id, customer.id().clone(), items)?;
        customer.add_reward_points(order.total().cents() / 2)?;
        tracing::debug!(order_id = %order.id(), total = %order.total(), "order placed");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, cents: i64, quantity: u32) -> OrderItem {
        OrderItem::new(id, "Item", Money::from_cents(cents), "p1", quantity).unwrap()
    }

    #[test]
    fn test_total_of_all_orders() {
        let order1 = Order::new("o1", "c1", vec![item("i1", 100, 1)]).unwrap();
        let order2 = Order::new("o2", "c1", vec![item("i2", 200, 2)]).unwrap();

        assert_eq!(OrderService::total(&[order1, order2]), Ok(Money::from_cents(500)));
        assert_eq!(OrderService::total(&[]), Ok(Money::zero()));
    }

    #[test]
    fn test_total_of_all_orders_out_of_range() {
        let big = item("i1", i64::MAX / 2, 2);
        let order1 = Order::new("o1", "c1", vec![big.clone()]).unwrap();
        let order2 = Order::new("o2", "c1", vec![big]).unwrap();

        assert_eq!(
            OrderService::total(&[order1, order2]),
            Err(ValidationError::AmountOverflow { entity: "Order" })
        );
    }

    #[test]
    fn test_place_order_with_full_balance_changes_nothing() {
        let mut customer = Customer::restore("c1", "Customer 1", None, false, i64::MAX).unwrap();

        let result = OrderService::place_order(&mut customer, "o1", vec![item("i1", 10, 1)]);

        assert!(matches!(
            result,
            Err(ValidationError::RewardPointsOverflow { .. })
        ));
        assert_eq!(customer.reward_points(), i64::MAX);
    }

    #[test]
    fn test_place_order_awards_reward_points() {
        let mut customer = Customer::new("c1", "Customer 1").unwrap();

        let order = OrderService::place_order(&mut customer, "o1", vec![item("i1", 10, 1)]).unwrap();

        assert_eq!(customer.reward_points(), 5);
        assert_eq!(order.total(), Money::from_cents(10));
        assert_eq!(order.customer_id(), customer.id());
    }

    #[test]
    fn test_place_order_without_items_changes_nothing() {
        let mut customer = Customer::new("c1", "Customer 1").unwrap();

        let result = OrderService::place_order(&mut customer, "o1", vec![]);

        assert_eq!(result, Err(ValidationError::NoItems));
        assert_eq!(customer.reward_points(), 0);
    }
}
