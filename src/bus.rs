use std::{
    any::Any,
    panic::AssertUnwindSafe,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use futures_util::FutureExt;
use tokio::time::{Instant, sleep};

use crate::{
    Config, Envelope, Error, Event, EventName, HandlerRef, ThrottleLimit,
    internal::{Admission, HandlerRegistry, ThrottlePolicy},
};

/// Outcome of one [`EventBus::fire`] call.
///
/// `invoked` counts every handler in the fire-time snapshot; `failed`
/// counts those that returned an error or panicked. Failures are
/// isolated per handler, so `fire` itself has no error path and
/// returns this report instead of a `Result`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub invoked: usize,
    pub failed: usize,
}

/// A throttled in-process event bus.
///
/// Producers fire named events; all handlers registered under that
/// name are invoked synchronously (awaited one by one) in registration
/// order. A per-name throttle limit enforces a minimum interval
/// between successive deliveries of the same name: a fire that arrives
/// too soon is delayed (never dropped) until the interval has elapsed.
///
/// The bus is a cheap clonable handle over shared state, so it can be
/// handed to any number of producer/consumer tasks, and handlers -
/// which receive a clone as their sender context - can re-enter the
/// bus from inside a dispatch. Independent bus instances share
/// nothing.
///
/// - Register handlers with `register` / `register_throttled`.
/// - Remove them with `unregister` (removes every occurrence of the
///   given handler reference).
/// - Emit with `fire(name, payload)`; the call resolves once every
///   handler in the snapshot has run.
///
/// See also: [`Handler`](crate::Handler), [`ThrottleLimit`], [`Config`].
pub struct EventBus<E: Event> {
    shared: Arc<Shared<E>>,
}

struct Shared<E: Event> {
    config: Config,
    // One mutex over both tables keeps the per-name lifecycle atomic:
    // the first registration creates, and draining the last handler
    // removes, the registry entry and the throttle state together.
    state: Mutex<State<E>>,
}

struct State<E: Event> {
    registry: HandlerRegistry<E>,
    throttle: ThrottlePolicy,
}

impl<E: Event> EventBus<E> {
    /// Create a new bus with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                state: Mutex::new(State {
                    registry: HandlerRegistry::new(),
                    throttle: ThrottlePolicy::new(),
                }),
            }),
        }
    }

    /// Register a handler under `name` with the configured default
    /// throttle limit.
    pub fn register<N>(&self, name: N, handler: HandlerRef<E>)
    where
        N: Into<EventName>,
    {
        self.register_throttled(name, handler, self.shared.config.default_throttle);
    }

    /// Register a handler under `name` and set the throttle limit for
    /// that name.
    ///
    /// Handlers multicast-append: registering the same reference again
    /// adds a second occurrence, invoked once per occurrence. The limit
    /// is per name, not per handler - the last registration for a name
    /// overwrites it.
    pub fn register_throttled<N>(&self, name: N, handler: HandlerRef<E>, limit: ThrottleLimit)
    where
        N: Into<EventName>,
    {
        let name = name.into();
        let mut state = self.lock();
        state.registry.register(name.clone(), handler);
        state.throttle.set_limit(name.clone(), limit);
        drop(state);
        tracing::debug!(event = %name, %limit, "handler registered");
    }

    /// Remove every occurrence of `handler` from `name`'s multicast
    /// list. Draining the last handler forgets the name entirely,
    /// including its throttle limit and delivery history. Unknown name
    /// or handler is a silent no-op.
    pub fn unregister<N>(&self, name: N, handler: &HandlerRef<E>)
    where
        N: Into<EventName>,
    {
        let name = name.into();
        let mut state = self.lock();
        let removed = state.registry.unregister(&name, handler);
        if removed > 0 && !state.registry.contains(&name) {
            state.throttle.clear(&name);
        }
        drop(state);
        if removed > 0 {
            tracing::debug!(event = %name, removed, "handler unregistered");
        }
    }

    /// Fire `name`, delivering `payload` to every handler registered
    /// at delivery time.
    ///
    /// If the previous delivery of `name` was less than its throttle
    /// limit ago, the calling task sleeps for the remainder first; the
    /// request is delayed, never dropped. Concurrent fires for the same
    /// name race for admission and the loser re-waits against the
    /// updated delivery time.
    ///
    /// Handlers run in registration order on a snapshot taken at
    /// admission: registrations made mid-dispatch are not invoked in
    /// this dispatch, and removals mid-dispatch still complete it. A
    /// handler error or panic is logged and counted in the returned
    /// [`Delivery`], and the remaining handlers still run.
    ///
    /// Firing a name with no registered handlers is a no-op, not an
    /// error, and creates no state.
    pub async fn fire<N>(&self, name: N, payload: E) -> Delivery
    where
        N: Into<EventName>,
    {
        let name = name.into();

        let snapshot = loop {
            // The lock is released for the whole wait so unrelated
            // names keep flowing; admission is re-checked afterwards.
            let wait = {
                let state = self.lock();
                if !state.registry.contains(&name) {
                    return Delivery::default();
                }
                match state.throttle.admit(&name, Instant::now()) {
                    Admission::Proceed => break state.registry.snapshot(&name),
                    Admission::Wait(wait) => wait,
                }
            };
            tracing::trace!(event = %name, ?wait, "delivery throttled");
            sleep(wait).await;
        };

        let envelope = Arc::new(Envelope::new(payload, name.clone()));
        let mut delivery = Delivery::default();
        for handler in &snapshot {
            delivery.invoked += 1;
            let invocation = AssertUnwindSafe(handler.invoke(self.clone(), envelope.clone()));
            match invocation.catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    delivery.failed += 1;
                    tracing::warn!(event = %name, error = %e, "handler failed, continuing dispatch");
                }
                Err(panic) => {
                    delivery.failed += 1;
                    let e = Error::HandlerPanic(panic_message(panic));
                    tracing::warn!(event = %name, error = %e, "handler panicked, continuing dispatch");
                }
            }
        }

        let mut state = self.lock();
        // A dispatch that raced with unregistration of the last handler
        // leaves no history behind: the name is gone from all tables.
        if state.registry.contains(&name) {
            state.throttle.record_fired(name.clone(), Instant::now());
        }
        drop(state);

        tracing::debug!(
            event = %name,
            invoked = delivery.invoked,
            failed = delivery.failed,
            "event delivered"
        );
        delivery
    }

    /// Number of handler occurrences currently registered for `name`.
    pub fn handler_count<N>(&self, name: N) -> usize
    where
        N: Into<EventName>,
    {
        self.lock().registry.handler_count(&name.into())
    }

    /// Whether `name` has at least one registered handler.
    pub fn is_registered<N>(&self, name: N) -> bool
    where
        N: Into<EventName>,
    {
        self.lock().registry.contains(&name.into())
    }

    /// Instant of the last completed delivery of `name`, if any.
    pub fn last_delivery<N>(&self, name: N) -> Option<Instant>
    where
        N: Into<EventName>,
    {
        self.lock().throttle.last_fired(&name.into())
    }

    /// The configuration this bus was created with.
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    fn lock(&self) -> MutexGuard<'_, State<E>> {
        // Handlers run outside the lock, so a poisoned mutex can only
        // come from a panic in one of the short critical sections;
        // the tables stay consistent, keep going.
        self.shared.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E: Event> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<E: Event> Default for EventBus<E> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> Arc<str> {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        Arc::from(*msg)
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        Arc::from(msg.as_str())
    } else {
        Arc::from("non-string panic payload")
    }
}
