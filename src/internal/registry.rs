use std::{collections::HashMap, sync::Arc};

use crate::{Event, EventName, HandlerRef};

/// Per-name ordered multicast lists of handlers.
///
/// Registration order is invocation order. No de-duplication: the same
/// handler reference may be appended multiple times and is invoked
/// once per occurrence. A name whose list drains is removed entirely,
/// so `contains` doubles as "is this name registered at all".
#[derive(Default)]
pub(crate) struct HandlerRegistry<E: Event> {
    handlers: HashMap<EventName, Vec<HandlerRef<E>>>,
}

impl<E: Event> HandlerRegistry<E> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Append `handler` to the ordered list for `name`, creating the
    /// list if absent.
    pub fn register(&mut self, name: EventName, handler: HandlerRef<E>) {
        self.handlers.entry(name).or_default().push(handler);
    }

    /// Remove all occurrences of `handler` (pointer equality) from
    /// `name`'s list and return how many were removed. A list that
    /// drains drops the name entirely.
    pub fn unregister(&mut self, name: &EventName, handler: &HandlerRef<E>) -> usize {
        let Some(list) = self.handlers.get_mut(name) else {
            return 0;
        };
        let before = list.len();
        list.retain(|h| !Arc::ptr_eq(h, handler));
        let removed = before - list.len();
        if list.is_empty() {
            self.handlers.remove(name);
        }
        removed
    }

    /// Immutable ordered copy of the handlers currently registered for
    /// `name`. Dispatch iterates the snapshot, so concurrent
    /// registration changes never touch an in-flight invocation loop.
    pub fn snapshot(&self, name: &EventName) -> Vec<HandlerRef<E>> {
        self.handlers.get(name).cloned().unwrap_or_default()
    }

    pub fn contains(&self, name: &EventName) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn handler_count(&self, name: &EventName) -> usize {
        self.handlers.get(name).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler_fn;

    struct Tick;
    impl Event for Tick {}

    fn noop() -> HandlerRef<Tick> {
        handler_fn(|_bus, _envelope| async { Ok(()) })
    }

    #[test]
    fn test_register_preserves_order_and_duplicates() {
        let mut registry = HandlerRegistry::<Tick>::new();
        let name = EventName::from("tick");
        let (a, b) = (noop(), noop());

        registry.register(name.clone(), a.clone());
        registry.register(name.clone(), b.clone());
        registry.register(name.clone(), a.clone());

        let snapshot = registry.snapshot(&name);
        assert_eq!(snapshot.len(), 3);
        assert!(Arc::ptr_eq(&snapshot[0], &a));
        assert!(Arc::ptr_eq(&snapshot[1], &b));
        assert!(Arc::ptr_eq(&snapshot[2], &a));
    }

    #[test]
    fn test_unregister_removes_all_occurrences() {
        let mut registry = HandlerRegistry::<Tick>::new();
        let name = EventName::from("tick");
        let (a, b) = (noop(), noop());

        registry.register(name.clone(), a.clone());
        registry.register(name.clone(), b.clone());
        registry.register(name.clone(), a.clone());

        assert_eq!(registry.unregister(&name, &a), 2);
        let snapshot = registry.snapshot(&name);
        assert_eq!(snapshot.len(), 1);
        assert!(Arc::ptr_eq(&snapshot[0], &b));
    }

    #[test]
    fn test_draining_last_handler_drops_the_name() {
        let mut registry = HandlerRegistry::<Tick>::new();
        let name = EventName::from("tick");
        let a = noop();

        registry.register(name.clone(), a.clone());
        assert!(registry.contains(&name));
        assert_eq!(registry.unregister(&name, &a), 1);
        assert!(!registry.contains(&name));
        assert_eq!(registry.handler_count(&name), 0);
    }

    #[test]
    fn test_unregister_unknown_name_removes_nothing() {
        let mut registry = HandlerRegistry::<Tick>::new();
        assert_eq!(registry.unregister(&EventName::from("missing"), &noop()), 0);
    }

    #[test]
    fn test_unregister_unknown_handler_removes_nothing() {
        let mut registry = HandlerRegistry::<Tick>::new();
        let name = EventName::from("tick");
        registry.register(name.clone(), noop());
        assert_eq!(registry.unregister(&name, &noop()), 0);
        assert_eq!(registry.handler_count(&name), 1);
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_mutation() {
        let mut registry = HandlerRegistry::<Tick>::new();
        let name = EventName::from("tick");
        let a = noop();

        registry.register(name.clone(), a.clone());
        let snapshot = registry.snapshot(&name);
        registry.register(name.clone(), noop());
        registry.unregister(&name, &a);
        assert_eq!(snapshot.len(), 1);
        assert!(Arc::ptr_eq(&snapshot[0], &a));
    }
}
