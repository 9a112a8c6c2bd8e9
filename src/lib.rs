//! Tempo - a throttled in-process event bus
//!
//! A tiny publish/dispatch mechanism for Tokio: producers fire named
//! events, zero or more registered handlers receive them, and a
//! per-name throttle enforces a minimum interval between successive
//! deliveries of the same event name.
//!
//! See [`EventBus`] for the three core operations: register,
//! unregister, fire.

mod bus;
mod config;
mod envelope;
mod error;
mod event;
mod handler;
mod limit;
mod meta;
mod name;

mod internal;

pub use bus::{Delivery, EventBus};
pub use config::Config;
pub use envelope::Envelope;
pub use error::Error;
pub use event::Event;
pub use handler::{Handler, HandlerRef, handler_fn};
pub use limit::ThrottleLimit;
pub use meta::Meta;
pub use name::EventName;

pub type Result<T = ()> = std::result::Result<T, Error>;
pub type EventId = u128;
