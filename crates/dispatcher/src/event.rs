//! Core event and handler traits.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use chrono::{DateTime, Utc};

use crate::HandlerError;

/// An immutable record of something that happened.
///
/// Each event reports its [`Kind`](Event::Kind), the enumerated name under
/// which handlers are registered. Payloads stay typed: the implementing
/// type is usually an enum over every event the domain raises.
pub trait Event: Send + Sync {
    /// Enumerated event name used as the registry key.
    type Kind: Copy + Eq + Hash + Debug + Display + Send + Sync;

    /// Returns the kind of this event.
    fn kind(&self) -> Self::Kind;

    /// Returns when the event occurred.
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// A reaction to an event.
///
/// Handlers run on the thread that calls
/// [`EventDispatcher::notify`](crate::EventDispatcher::notify) and must
/// return before the next handler is invoked.
pub trait EventHandler<E: Event>: Send + Sync {
    /// Returns a human-readable name, used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Handles a single event.
    fn handle(&self, event: &E) -> Result<(), HandlerError>;
}
