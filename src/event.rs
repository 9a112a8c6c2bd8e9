/// Marker trait for payloads carried by the bus.
///
/// Implement this for your payload type (often an enum or a small
/// struct). Payloads must be `Send + Sync + 'static` because they:
/// - Are wrapped in `Arc<Envelope<E>>` and shared across threads (Sync)
/// - Cross task boundaries inside handler futures (Send, 'static)
///
/// The bus never inspects the payload; it is passed through unchanged
/// to every handler of the fired event name. Unlike the name-bearing
/// event traits of actor runtimes, the routing key here is the
/// [`EventName`](crate::EventName) given at fire time, not anything
/// derived from the payload.
pub trait Event: Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Reading {
        pub celsius: f64,
    }

    impl Event for Reading {}

    fn assert_event<E: Event>(_e: &E) {}

    #[test]
    fn test_struct_payload_is_event() {
        assert_event(&Reading { celsius: 22.5 });
    }

    #[test]
    fn test_enum_payload_is_event() {
        #[allow(dead_code)]
        enum Sample {
            Temperature(f64),
            Exit,
        }
        impl Event for Sample {}

        assert_event(&Sample::Temperature(18.0));
        assert_event(&Sample::Exit);
    }
}
