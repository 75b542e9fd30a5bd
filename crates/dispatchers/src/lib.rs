//! hookd - Built-in dispatchers
//!
//! Dispatchers deliver the final payload to an external target. All
//! dispatchers bound to a webhook run concurrently; delivery is
//! best-effort with no retries.
//!
//! | Scheme | Behavior |
//! |--------|----------|
//! | `log` | Emit the payload to the structured log |
//! | `null` | Discard the payload |
//! | `http` / `https` | POST the payload to the descriptor URL |

mod http;
mod log;
mod null;

pub use http::{HttpDispatcher, HttpDispatcherFactory};
pub use log::{LogDispatcher, LogDispatcherFactory};
pub use null::{NullDispatcher, NullDispatcherFactory};
