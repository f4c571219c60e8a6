//! In-process domain event dispatching.
//!
//! This crate provides the notification side of the domain layer:
//! - [`Event`] trait for immutable event values keyed by an enumerated kind
//! - [`EventHandler`] trait for side-effecting reactions
//! - [`EventDispatcher`] registry that notifies handlers synchronously, in registration order

pub mod dispatcher;
pub mod error;
pub mod event;

pub use dispatcher::{EventDispatcher, HandlerFailure, NotifyReport};
pub use error::HandlerError;
pub use event::{Event, EventHandler};
