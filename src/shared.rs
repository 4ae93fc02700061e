//! Process-shared emitter instance.
//!
//! Most code should construct its own [`EventEmitter`] and pass it to
//! whatever needs it; the shared instance exists for applications that want
//! one registry spanning otherwise-unconnected modules.

use std::sync::LazyLock;

use crate::emitter::EventEmitter;

static SHARED: LazyLock<EventEmitter> = LazyLock::new(EventEmitter::new);

/// The process-wide shared emitter.
///
/// Created empty on first access and never torn down; it lives for the rest
/// of the process. Every caller sees the same registry. For isolation from
/// it, construct an independent instance with [`EventEmitter::new`].
///
/// # Example
/// ```
/// use serde_json::json;
/// use tannoy::{Callback, shared};
///
/// let sub = shared().subscribe("app:started", Callback::sync(|_| Ok(json!(true))));
/// assert_eq!(shared().len("app:started"), 1);
/// sub.unsubscribe();
/// ```
pub fn shared() -> &'static EventEmitter {
    &SHARED
}
