use crate::{Event, EventName, Meta};

/// Payload plus metadata, shared by every handler of one dispatch.
///
/// - `payload`: the user-defined data implementing [`Event`]; the bus
///   passes it through untouched.
/// - `meta`: [`Meta`] describing which name the event was fired under
///   and when.
///
/// One envelope is created per fire call and handed to all handlers in
/// the snapshot behind an `Arc`, so handlers observe the same id and
/// timestamp.
#[derive(Debug)]
pub struct Envelope<E: Event> {
    pub meta: Meta,
    pub payload: E,
}

impl<E: Event> Envelope<E> {
    /// Create a new envelope tagging the payload with the given name.
    pub fn new<N>(payload: E, name: N) -> Self
    where
        N: Into<EventName>,
    {
        Self {
            meta: Meta::new(name.into()),
            payload,
        }
    }
}
