use std::time::Duration;

use crate::{Error, Result};

/// Minimum required time between two deliveries of one event name.
///
/// A limit is fixed at registration time; re-registering a name
/// overwrites it (last registration wins). [`ThrottleLimit::ZERO`]
/// means no throttling - every fire delivers immediately.
///
/// The raw-milliseconds constructor rejects negative values, so any
/// `ThrottleLimit` in existence is valid and registration itself
/// cannot fail:
///
/// ```ignore
/// let limit = ThrottleLimit::from_millis(1000)?;
/// assert!(ThrottleLimit::from_millis(-1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ThrottleLimit(Duration);

impl ThrottleLimit {
    pub const ZERO: ThrottleLimit = ThrottleLimit(Duration::ZERO);

    /// Validate a raw millisecond interval.
    ///
    /// Returns [`Error::InvalidThrottleLimit`] for negative values.
    pub fn from_millis(ms: i64) -> Result<Self> {
        if ms < 0 {
            return Err(Error::InvalidThrottleLimit(ms));
        }
        Ok(Self(Duration::from_millis(ms as u64)))
    }

    #[inline]
    pub fn as_duration(&self) -> Duration {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<Duration> for ThrottleLimit {
    fn from(interval: Duration) -> Self {
        Self(interval)
    }
}

impl std::fmt::Display for ThrottleLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative_millis_accepted() {
        assert_eq!(
            ThrottleLimit::from_millis(500).unwrap().as_duration(),
            Duration::from_millis(500)
        );
        assert!(ThrottleLimit::from_millis(0).unwrap().is_zero());
    }

    #[test]
    fn test_negative_millis_rejected() {
        let err = ThrottleLimit::from_millis(-250).unwrap_err();
        assert!(matches!(err, Error::InvalidThrottleLimit(-250)));
    }

    #[test]
    fn test_from_duration() {
        let limit: ThrottleLimit = Duration::from_secs(1).into();
        assert_eq!(limit.as_duration(), Duration::from_secs(1));
    }
}
