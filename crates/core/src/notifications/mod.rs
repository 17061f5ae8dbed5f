//! User-facing notifications module.
//!
//! Provides the notification type and the sink trait through which the goal
//! store reports the outcome of each operation. Runtime adapters (toast
//! systems, terminals, logs) implement the sink.

mod notification;
mod sink;

pub use notification::*;
pub use sink::*;
