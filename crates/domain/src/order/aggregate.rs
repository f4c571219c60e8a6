//! Order aggregate implementation.

use common::Money;
use serde::Serialize;

use crate::ValidationError;
use crate::customer::CustomerId;
use crate::error::require_text;

use super::{OrderId, OrderItem, OrderItemId};

/// Order aggregate root.
///
/// Owns an ordered, never empty list of items. The customer is referenced
/// by id only. The total is always derived from the items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    items: Vec<OrderItem>,
}

impl Order {
    /// Creates a validated order.
    ///
    /// Fails if the id or customer id is empty, if there are no items, or if
    /// two items share an id.
    pub fn new(
        id: impl Into<OrderId>,
        customer_id: impl Into<CustomerId>,
        items: Vec<OrderItem>,
    ) -> Result<Self, ValidationError> {
        let order = Self {
            id: id.into(),
            customer_id: customer_id.into(),
            items,
        };
        order.validate()?;
        Ok(order)
    }

    /// Checks every invariant of the aggregate.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(self.id.as_str(), "Order", "id")?;
        require_text(self.customer_id.as_str(), "Order", "customer_id")?;
        if self.items.is_empty() {
            return Err(ValidationError::NoItems);
        }
        for (index, item) in self.items.iter().enumerate() {
            if self.items[..index].iter().any(|other| other.id() == item.id()) {
                return Err(ValidationError::DuplicateItem {
                    item_id: item.id().to_string(),
                });
            }
        }
        Money::checked_sum(self.items.iter().map(OrderItem::total))
            .ok_or(ValidationError::AmountOverflow { entity: "Order" })?;
        Ok(())
    }
}

// Query methods
impl Order {
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Returns the items in insertion order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns an item by id.
    pub fn get_item(&self, item_id: &OrderItemId) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.id() == item_id)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the sum of all item totals.
    ///
    /// Never overflows: construction and `add_item` reject item sets whose
    /// total does not fit.
    pub fn total(&self) -> Money {
        self.items.iter().map(OrderItem::total).sum()
    }
}

// Mutations
impl Order {
    /// Appends an item.
    pub fn add_item(&mut self, item: OrderItem) -> Result<(), ValidationError> {
        if self.get_item(item.id()).is_some() {
            return Err(ValidationError::DuplicateItem {
                item_id: item.id().to_string(),
            });
        }
        if self.total().checked_add(item.total()).is_none() {
            return Err(ValidationError::AmountOverflow { entity: "Order" });
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes an item and returns it.
    ///
    /// Removing the last item is rejected; an order always has items.
    pub fn remove_item(&mut self, item_id: &OrderItemId) -> Result<OrderItem, ValidationError> {
        let position = self
            .items
            .iter()
            .position(|item| item.id() == item_id)
            .ok_or_else(|| ValidationError::ItemNotFound {
                item_id: item_id.to_string(),
            })?;

        if self.items.len() == 1 {
            return Err(ValidationError::NoItems);
        }

        Ok(self.items.remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, cents: i64, quantity: u32) -> OrderItem {
        OrderItem::new(id, format!("Item {id}"), Money::from_cents(cents), "p1", quantity).unwrap()
    }

    #[test]
    fn test_create_order() {
        let order = Order::new("o1", "c1", vec![item("i1", 100, 1)]).unwrap();
        assert_eq!(order.id().as_str(), "o1");
        assert_eq!(order.customer_id().as_str(), "c1");
        assert_eq!(order.item_count(), 1);
    }

    #[test]
    fn test_empty_id_fails() {
        let result = Order::new("", "c1", vec![item("i1", 100, 1)]);
        assert!(matches!(
            result,
            Err(ValidationError::Required { field: "id", .. })
        ));
    }

    #[test]
    fn test_empty_customer_id_fails() {
        let result = Order::new("o1", "", vec![item("i1", 100, 1)]);
        assert!(matches!(
            result,
            Err(ValidationError::Required {
                field: "customer_id",
                ..
            })
        ));
    }

    #[test]
    fn test_no_items_fails() {
        let result = Order::new("o1", "c1", vec![]);
        assert_eq!(result, Err(ValidationError::NoItems));
    }

    #[test]
    fn test_duplicate_item_ids_fail() {
        let result = Order::new("o1", "c1", vec![item("i1", 100, 1), item("i1", 200, 1)]);
        assert!(matches!(result, Err(ValidationError::DuplicateItem { .. })));
    }

    #[test]
    fn test_total_is_sum_of_item_totals() {
        let mut order = Order::new("o1", "c1", vec![item("i1", 10, 2), item("i2", 5, 3)]).unwrap();
        assert_eq!(order.total(), Money::from_cents(35));

        order.add_item(item("i3", 1, 1)).unwrap();
        assert_eq!(order.total(), Money::from_cents(36));
    }

    #[test]
    fn test_add_duplicate_item_rejected() {
        let mut order = Order::new("o1", "c1", vec![item("i1", 10, 2)]).unwrap();
        let result = order.add_item(item("i1", 99, 1));
        assert!(matches!(result, Err(ValidationError::DuplicateItem { .. })));
        assert_eq!(order.item_count(), 1);
    }

    #[test]
    fn test_unrepresentable_total_fails() {
        let half = i64::MAX / 2;
        let result = Order::new("o1", "c1", vec![item("i1", half, 2), item("i2", half, 2)]);
        assert_eq!(result, Err(ValidationError::AmountOverflow { entity: "Order" }));
    }

    #[test]
    fn test_add_item_past_representable_total_rejected() {
        let half = i64::MAX / 2;
        let mut order = Order::new("o1", "c1", vec![item("i1", half, 2)]).unwrap();

        let result = order.add_item(item("i2", 2, 1));

        assert_eq!(result, Err(ValidationError::AmountOverflow { entity: "Order" }));
        assert_eq!(order.item_count(), 1);
        assert_eq!(order.total(), Money::from_cents(i64::MAX - 1));

        order.add_item(item("i3", 1, 1)).unwrap();
        assert_eq!(order.total(), Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_remove_item() {
        let mut order = Order::new("o1", "c1", vec![item("i1", 10, 2), item("i2", 5, 3)]).unwrap();

        let removed = order.remove_item(&OrderItemId::new("i1")).unwrap();

        assert_eq!(removed.id().as_str(), "i1");
        assert_eq!(order.item_count(), 1);
        assert_eq!(order.total(), Money::from_cents(15));
    }

    #[test]
    fn test_remove_last_item_rejected() {
        let mut order = Order::new("o1", "c1", vec![item("i1", 10, 2)]).unwrap();
        let result = order.remove_item(&OrderItemId::new("i1"));
        assert_eq!(result, Err(ValidationError::NoItems));
        assert_eq!(order.item_count(), 1);
    }

    #[test]
    fn test_remove_unknown_item_fails() {
        let mut order = Order::new("o1", "c1", vec![item("i1", 10, 2)]).unwrap();
        let result = order.remove_item(&OrderItemId::new("nope"));
        assert!(matches!(result, Err(ValidationError::ItemNotFound { .. })));
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let mut order = Order::new("o1", "c1", vec![item("b", 1, 1), item("a", 1, 1)]).unwrap();
        order.add_item(item("c", 1, 1)).unwrap();
        let ids: Vec<&str> = order.items().iter().map(|i| i.id().as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
