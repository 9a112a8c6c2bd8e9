mod registry;
mod throttle;

pub(crate) use registry::HandlerRegistry;
pub(crate) use throttle::{Admission, ThrottlePolicy};
