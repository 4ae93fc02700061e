use std::fmt;
use std::sync::Weak;

use super::callback::Callback;
use super::registry::{EventEmitter, Inner};

/// Handle returned by [`EventEmitter::subscribe`] that can undo exactly that
/// subscription.
///
/// The handle holds only a weak reference to the registry: dropping it
/// leaves the subscription in place (removal only happens when you ask for
/// it), and calling [`unsubscribe`](Subscription::unsubscribe) after every
/// emitter handle is gone is a no-op.
pub struct Subscription {
    inner: Weak<Inner>,
    event: String,
    callback: Callback,
}

impl Subscription {
    pub(crate) fn new(inner: Weak<Inner>, event: String, callback: Callback) -> Self {
        Self {
            inner,
            event,
            callback,
        }
    }

    /// Remove the subscribed callback from the event it was subscribed to.
    ///
    /// Equivalent to `emitter.unsubscribe(self.event(), self.callback())`:
    /// every entry sharing this callback's reference is removed.
    pub fn unsubscribe(self) {
        if let Some(inner) = self.inner.upgrade() {
            EventEmitter::from_inner(inner).unsubscribe(&self.event, &self.callback);
        }
    }

    /// The event name this subscription targets.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// The subscribed callback.
    pub fn callback(&self) -> &Callback {
        &self.callback
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("event", &self.event)
            .field("callback", &self.callback)
            .finish()
    }
}
