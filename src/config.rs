use crate::ThrottleLimit;

/// Runtime configuration for an event bus.
///
/// Use the builder pattern to customize, or use [`Default`] for
/// sensible defaults.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use tempo::Config;
///
/// let config = Config::default()
///     .with_default_throttle(Duration::from_millis(100).into());
/// ```
pub struct Config {
    /// Throttle limit applied by [`EventBus::register`] when the caller
    /// doesn't name one. Default: [`ThrottleLimit::ZERO`] (no
    /// throttling).
    ///
    /// [`EventBus::register`]: crate::EventBus::register
    pub default_throttle: ThrottleLimit,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_throttle: ThrottleLimit::ZERO,
        }
    }
}

impl Config {
    /// Set the throttle limit used for registrations that don't supply
    /// one explicitly.
    ///
    /// Like any registration, a later `register_throttled` call for the
    /// same name overwrites this (last registration wins).
    pub fn with_default_throttle(mut self, limit: ThrottleLimit) -> Self {
        self.default_throttle = limit;
        self
    }
}
