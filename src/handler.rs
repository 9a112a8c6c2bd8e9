use std::{future::Future, sync::Arc};

use futures_util::future::BoxFuture;

use crate::{Envelope, Event, EventBus, Result};

/// The callback capability invoked when its event name fires.
///
/// Implemented automatically for any `Fn(EventBus<E>, Arc<Envelope<E>>)
/// -> Future<Output = Result>` closure, so most code never implements
/// this trait by hand - wrap a closure with [`handler_fn`] instead.
///
/// Handlers receive a clone of the bus as the sender context and may
/// call back into `register`/`unregister`/`fire` from inside `invoke`;
/// dispatch happens outside the bus's internal lock, so re-entry never
/// deadlocks.
///
/// Handlers are stored and compared as [`HandlerRef`] (an `Arc`), and
/// unregistration removes occurrences by pointer equality: keep the
/// `Arc` you registered if you intend to unregister it later.
pub trait Handler<E: Event>: Send + Sync + 'static {
    fn invoke(&self, bus: EventBus<E>, envelope: Arc<Envelope<E>>) -> BoxFuture<'static, Result>;
}

/// Shared handle to a registered handler.
///
/// The same `HandlerRef` may be registered under several names, or
/// several times under one name (each occurrence is invoked per fire).
pub type HandlerRef<E> = Arc<dyn Handler<E>>;

impl<E, F, Fut> Handler<E> for F
where
    E: Event,
    F: Fn(EventBus<E>, Arc<Envelope<E>>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result> + Send + 'static,
{
    fn invoke(&self, bus: EventBus<E>, envelope: Arc<Envelope<E>>) -> BoxFuture<'static, Result> {
        Box::pin((self)(bus, envelope))
    }
}

/// Wrap an async closure into a [`HandlerRef`].
///
/// ```ignore
/// let h = handler_fn(|_bus, envelope: Arc<Envelope<Reading>>| async move {
///     println!("got {}", envelope.meta.name());
///     Ok(())
/// });
/// bus.register("sensor/reading", h.clone());
/// ```
pub fn handler_fn<E, F, Fut>(f: F) -> HandlerRef<E>
where
    E: Event,
    F: Fn(EventBus<E>, Arc<Envelope<E>>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result> + Send + 'static,
{
    Arc::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    struct Ping;
    impl Event for Ping {}

    #[tokio::test]
    async fn test_closure_is_a_handler() {
        let h: HandlerRef<Ping> = handler_fn(|_bus, _envelope| async { Ok(()) });
        let bus = EventBus::new(Config::default());
        let envelope = Arc::new(Envelope::new(Ping, "ping"));
        assert!(h.invoke(bus, envelope).await.is_ok());
    }

    #[test]
    fn test_ptr_eq_distinguishes_registrations() {
        let a: HandlerRef<Ping> = handler_fn(|_bus, _envelope| async { Ok(()) });
        let b: HandlerRef<Ping> = handler_fn(|_bus, _envelope| async { Ok(()) });
        assert!(Arc::ptr_eq(&a, &a.clone()));
        assert!(!Arc::ptr_eq(&a, &b));
    }
}
