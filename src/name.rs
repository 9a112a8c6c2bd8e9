use std::{hash::Hash, ops::Deref, sync::Arc};

/// The key identifying a class of events on the bus.
///
/// Every registration table (handlers, throttle limits, delivery
/// history) is indexed by `EventName`. Producers and consumers mint
/// names independently, so equality and hashing are by content, not by
/// allocation.
///
/// Names are cheap to clone (`Arc<str>` inside) and most bus methods
/// accept `impl Into<EventName>`, so `&str` literals work directly:
///
/// ```ignore
/// bus.fire("sensor/reading", payload).await;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventName(Arc<str>);

impl EventName {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventName {
    fn from(name: &str) -> Self {
        Self(Arc::from(name))
    }
}

impl From<String> for EventName {
    fn from(name: String) -> Self {
        Self(Arc::from(name.as_str()))
    }
}

impl From<Arc<str>> for EventName {
    fn from(name: Arc<str>) -> Self {
        Self(name)
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for EventName {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_equality_is_by_content() {
        let a = EventName::from("tick");
        let b = EventName::from(String::from("tick"));
        assert_eq!(a, b);
        assert_ne!(a, EventName::from("tock"));
    }

    #[test]
    fn test_hashes_by_content() {
        let mut map = HashMap::new();
        map.insert(EventName::from("tick"), 1);
        assert_eq!(map.get(&EventName::from("tick")), Some(&1));
    }

    #[test]
    fn test_display() {
        assert_eq!(EventName::from("tick").to_string(), "tick");
    }
}
