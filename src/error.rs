use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Throttle limit must be non-negative, got {0} ms")]
    InvalidThrottleLimit(i64),

    #[error("Handler panicked during dispatch: {0}")]
    HandlerPanic(Arc<str>),

    #[error("Error external to Tempo occured: {0}")]
    External(Arc<str>),
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::External(Arc::from(msg))
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::External(Arc::from(msg.as_str()))
    }
}
