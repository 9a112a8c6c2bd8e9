use std::{collections::HashMap, time::Duration};

use tokio::time::Instant;

use crate::{EventName, ThrottleLimit};

/// Admission decision for one fire request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Admission {
    /// Deliver now.
    Proceed,
    /// Too soon after the previous delivery; wait this long and ask
    /// again. The policy never sleeps itself - the bus owns the wait,
    /// outside the lock.
    Wait(Duration),
}

/// Per-name throttle state: the configured minimum interval between
/// deliveries and the instant of the last completed delivery.
///
/// Throttling gates *delivery*, not request acceptance: an admitted
/// request is never dropped, it is at most delayed by one interval.
/// `record_fired` is called after handler invocation completes, so
/// back-to-back fires measure true inter-delivery spacing.
#[derive(Default)]
pub(crate) struct ThrottlePolicy {
    limits: HashMap<EventName, Duration>,
    last_fired: HashMap<EventName, Instant>,
}

impl ThrottlePolicy {
    pub fn new() -> Self {
        Self {
            limits: HashMap::new(),
            last_fired: HashMap::new(),
        }
    }

    /// Set or overwrite the minimum interval for `name`. The last
    /// registration for a name wins.
    pub fn set_limit(&mut self, name: EventName, limit: ThrottleLimit) {
        self.limits.insert(name, limit.as_duration());
    }

    /// Drop the limit and delivery history for `name`. Called when the
    /// last handler is unregistered; a later re-registration starts
    /// with no history.
    pub fn clear(&mut self, name: &EventName) {
        self.limits.remove(name);
        self.last_fired.remove(name);
    }

    /// Decide whether a fire request for `name` may deliver at `now`.
    pub fn admit(&self, name: &EventName, now: Instant) -> Admission {
        let Some(limit) = self.limits.get(name).copied() else {
            return Admission::Proceed;
        };
        let Some(last) = self.last_fired.get(name).copied() else {
            return Admission::Proceed;
        };
        let elapsed = now.saturating_duration_since(last);
        if elapsed >= limit {
            Admission::Proceed
        } else {
            Admission::Wait(limit - elapsed)
        }
    }

    /// Record a completed delivery. LastFiredAt only moves forward;
    /// `Instant` is monotonic so a plain insert preserves that.
    pub fn record_fired(&mut self, name: EventName, now: Instant) {
        self.last_fired.insert(name, now);
    }

    pub fn last_fired(&self, name: &EventName) -> Option<Instant> {
        self.last_fired.get(name).copied()
    }
}
