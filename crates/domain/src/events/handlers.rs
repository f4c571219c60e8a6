//! Side-effecting reactions to domain events.
//!
//! Each handler only logs; the delivery channels they stand for (email,
//! cloud notification) live outside the domain.

use std::sync::Arc;

use dispatcher::{EventDispatcher, EventHandler, HandlerError};

use super::{DomainEvent, DomainEventPayload, EventKind};

fn unexpected(handler: &str, event: &DomainEvent) -> HandlerError {
    HandlerError::UnexpectedEvent(format!(
        "{handler} cannot handle {}",
        event.payload().kind()
    ))
}

/// Emails the customer after sign-up.
#[derive(Debug, Default)]
pub struct SendEmailWhenCustomerIsCreated;

impl EventHandler<DomainEvent> for SendEmailWhenCustomerIsCreated {
    fn name(&self) -> &str {
        "SendEmailWhenCustomerIsCreated"
    }

    fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        let DomainEventPayload::CustomerCreated(data) = event.payload() else {
            return Err(unexpected(self.name(), event));
        };
        tracing::info!(customer_id = %data.customer_id, name = %data.name, "sending welcome email");
        Ok(())
    }
}

/// Publishes new customers to the cloud directory.
#[derive(Debug, Default)]
pub struct SendToCloudWhenCustomerIsCreated;

impl EventHandler<DomainEvent> for SendToCloudWhenCustomerIsCreated {
    fn name(&self) -> &str {
        "SendToCloudWhenCustomerIsCreated"
    }

    fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        let DomainEventPayload::CustomerCreated(data) = event.payload() else {
            return Err(unexpected(self.name(), event));
        };
        tracing::info!(customer_id = %data.customer_id, "publishing customer to cloud");
        Ok(())
    }
}

/// Records address changes.
#[derive(Debug, Default)]
pub struct LogWhenCustomerAddressChanged;

impl EventHandler<DomainEvent> for LogWhenCustomerAddressChanged {
    fn name(&self) -> &str {
        "LogWhenCustomerAddressChanged"
    }

    fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        let DomainEventPayload::CustomerAddressChanged(data) = event.payload() else {
            return Err(unexpected(self.name(), event));
        };
        tracing::info!(
            customer_id = %data.customer_id,
            name = %data.name,
            address = %data.address,
            "customer address changed"
        );
        Ok(())
    }
}

/// Announces new products.
#[derive(Debug, Default)]
pub struct SendEmailWhenProductIsCreated;

impl EventHandler<DomainEvent> for SendEmailWhenProductIsCreated {
    fn name(&self) -> &str {
        "SendEmailWhenProductIsCreated"
    }

    fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        let DomainEventPayload::ProductCreated(data) = event.payload() else {
            return Err(unexpected(self.name(), event));
        };
        tracing::info!(product_id = %data.product_id, price = %data.price, "sending new product email");
        Ok(())
    }
}

/// Registers every built-in handler under its event kind.
pub fn register_default_handlers(dispatcher: &mut EventDispatcher<DomainEvent>) {
    dispatcher.register(
        EventKind::CustomerCreated,
        Arc::new(SendEmailWhenCustomerIsCreated),
    );
    dispatcher.register(
        EventKind::CustomerCreated,
        Arc::new(SendToCloudWhenCustomerIsCreated),
    );
    dispatcher.register(
        EventKind::CustomerAddressChanged,
        Arc::new(LogWhenCustomerAddressChanged),
    );
    dispatcher.register(
        EventKind::ProductCreated,
        Arc::new(SendEmailWhenProductIsCreated),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::Customer;
    use crate::product::Product;
    use common::Money;

    #[test]
    fn test_default_handlers_are_registered() {
        let mut dispatcher = EventDispatcher::new();
        register_default_handlers(&mut dispatcher);

        let names: Vec<&str> = dispatcher
            .handlers_for(EventKind::CustomerCreated)
            .iter()
            .map(|h| h.name())
            .collect();
        assert_eq!(
            names,
            vec![
                "SendEmailWhenCustomerIsCreated",
                "SendToCloudWhenCustomerIsCreated"
            ]
        );
        assert_eq!(dispatcher.handler_count(EventKind::CustomerAddressChanged), 1);
        assert_eq!(dispatcher.handler_count(EventKind::ProductCreated), 1);
    }

    #[test]
    fn test_handler_rejects_other_events() {
        let product = Product::new("p1", "Product 1", Money::from_cents(10)).unwrap();
        let event = DomainEvent::product_created(&product);

        let result = SendEmailWhenCustomerIsCreated.handle(&event);

        assert!(matches!(result, Err(HandlerError::UnexpectedEvent(_))));
    }

    #[test]
    fn test_handlers_accept_their_events() {
        let customer = Customer::new("c1", "John").unwrap();
        let event = DomainEvent::customer_created(&customer);

        assert!(SendEmailWhenCustomerIsCreated.handle(&event).is_ok());
        assert!(SendToCloudWhenCustomerIsCreated.handle(&event).is_ok());
    }
}
