//! Event dispatcher delivering events to registered handlers.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{Event, EventHandler, HandlerError};

/// A handler failure collected during a [`notify`](EventDispatcher::notify) call.
#[derive(Debug)]
pub struct HandlerFailure {
    /// Position of the handler in the registration list.
    pub index: usize,

    /// Name reported by the handler.
    pub handler: String,

    /// The error the handler returned.
    pub error: HandlerError,
}

/// Outcome of a single [`notify`](EventDispatcher::notify) call.
#[derive(Debug, Default)]
pub struct NotifyReport {
    /// Number of handlers invoked.
    pub invoked: usize,

    /// Failures reported by handlers, in invocation order.
    pub failures: Vec<HandlerFailure>,
}

impl NotifyReport {
    /// Returns true if every invoked handler succeeded.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Registry mapping event kinds to ordered handler lists.
///
/// - Registration appends; registering the same handler twice delivers twice
/// - Removal matches by identity (`Arc` address), not by value
/// - Notification is synchronous and follows registration order
///
/// Mutating methods take `&mut self`. Hosts that share a dispatcher across
/// threads wrap it in a lock.
pub struct EventDispatcher<E: Event> {
    handlers: HashMap<E::Kind, Vec<Arc<dyn EventHandler<E>>>>,
}

impl<E: Event> Default for EventDispatcher<E> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<E: Event> std::fmt::Debug for EventDispatcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<String, usize> = self
            .handlers
            .iter()
            .map(|(kind, list)| (kind.to_string(), list.len()))
            .collect();
        f.debug_struct("EventDispatcher")
            .field("handlers", &counts)
            .finish()
    }
}

impl<E: Event> EventDispatcher<E> {
    /// Creates an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler to the list for `kind`.
    pub fn register(&mut self, kind: E::Kind, handler: Arc<dyn EventHandler<E>>) {
        tracing::debug!(event = %kind, handler = handler.name(), "registering handler");
        self.handlers.entry(kind).or_default().push(handler);
    }

    /// Removes the first registration of `handler` under `kind`.
    ///
    /// Does nothing if the handler is not registered for that kind.
    pub fn unregister(&mut self, kind: E::Kind, handler: &Arc<dyn EventHandler<E>>) {
        let Some(list) = self.handlers.get_mut(&kind) else {
            return;
        };

        if let Some(pos) = list
            .iter()
            .position(|registered| std::ptr::addr_eq(Arc::as_ptr(registered), Arc::as_ptr(handler)))
        {
            let removed = list.remove(pos);
            tracing::debug!(event = %kind, handler = removed.name(), "unregistered handler");
        }
    }

    /// Removes every handler for every event kind.
    pub fn unregister_all(&mut self) {
        self.handlers.clear();
    }

    /// Returns the handlers registered for `kind`, in registration order.
    pub fn handlers_for(&self, kind: E::Kind) -> &[Arc<dyn EventHandler<E>>] {
        self.handlers.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the number of handlers registered for `kind`.
    pub fn handler_count(&self, kind: E::Kind) -> usize {
        self.handlers_for(kind).len()
    }

    /// Returns true if no handler is registered for any kind.
    pub fn is_empty(&self) -> bool {
        self.handlers.values().all(Vec::is_empty)
    }

    /// Delivers `event` to every handler registered for its kind.
    ///
    /// Handlers run in registration order on the calling thread. A failing
    /// handler is logged and recorded in the report; the remaining handlers
    /// still run. An event with no handlers is a no-op.
    #[tracing::instrument(skip(self, event), fields(event = %event.kind()))]
    pub fn notify(&self, event: &E) -> NotifyReport {
        let handlers = self.handlers_for(event.kind());
        let mut report = NotifyReport::default();

        for (index, handler) in handlers.iter().enumerate() {
            report.invoked += 1;
            if let Err(error) = handler.handle(event) {
                tracing::warn!(handler = handler.name(), %error, "event handler failed");
                metrics::counter!("domain_event_handler_failures").increment(1);
                report.failures.push(HandlerFailure {
                    index,
                    handler: handler.name().to_string(),
                    error,
                });
            }
        }

        metrics::counter!("domain_events_dispatched").increment(1);
        report
    }
}
