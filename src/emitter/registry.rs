use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::error;

use super::callback::Callback;
use super::hook::{ChangeHook, RegistryChange};
use super::outcome::Outcome;
use super::subscription::Subscription;

pub(crate) struct Inner {
    registry: Mutex<FxHashMap<String, Vec<Callback>>>,
    hook: Mutex<Option<Arc<dyn ChangeHook>>>,
}

/// Publish/subscribe emitter over a name-keyed listener registry.
///
/// Event names map to ordered listener sequences; insertion order is
/// invocation order. The emitter is `Clone`: clones share one registry, so
/// producers and consumers can each hold a handle. Independent registries
/// come from separate [`EventEmitter::new`] calls.
///
/// Publication snapshots the listener list before invoking anything and
/// releases the registry lock for the whole round, so listeners may
/// subscribe or unsubscribe reentrantly; the in-flight round is unaffected.
///
/// # Example
/// ```
/// use serde_json::json;
/// use tannoy::{Callback, EventEmitter};
///
/// let emitter = EventEmitter::new();
/// emitter.subscribe("ping", Callback::sync(|_args| Ok(json!(1))));
/// emitter.subscribe("ping", Callback::sync(|args| Ok(args[0].clone())));
///
/// let outcomes = emitter.publish("ping", &[json!("echo")]);
/// let values: Vec<_> = outcomes.iter().filter_map(|o| o.value()).collect();
/// assert_eq!(values, vec![&json!(1), &json!("echo")]);
/// ```
#[derive(Clone)]
pub struct EventEmitter {
    inner: Arc<Inner>,
}

impl EventEmitter {
    /// Create an emitter with an empty registry, sharing no state with any
    /// other instance.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                registry: Mutex::new(FxHashMap::default()),
                hook: Mutex::new(None),
            }),
        }
    }

    /// Create an emitter with a [`ChangeHook`] already installed.
    pub fn with_change_hook<H: ChangeHook + 'static>(hook: H) -> Self {
        let emitter = Self::new();
        emitter.set_change_hook(hook);
        emitter
    }

    /// Install a hook notified after each effective registry mutation,
    /// replacing any previously installed hook.
    pub fn set_change_hook<H: ChangeHook + 'static>(&self, hook: H) {
        *self.inner.hook.lock() = Some(Arc::new(hook));
    }

    /// Append `callback` to the named event's sequence, creating the sequence
    /// if absent.
    ///
    /// Returns a [`Subscription`] whose `unsubscribe()` removes exactly this
    /// callback from this event, equivalent to calling
    /// [`unsubscribe`](Self::unsubscribe) with the same two arguments.
    /// Re-subscribing the same callback reference produces an independent
    /// entry, and it will be invoked once per entry.
    pub fn subscribe(&self, event: impl Into<String>, callback: Callback) -> Subscription {
        let event = event.into();
        {
            let mut registry = self.inner.registry.lock();
            registry.entry(event.clone()).or_default().push(callback.clone());
        }
        self.notify(RegistryChange::Subscribed {
            event: event.clone(),
        });
        Subscription::new(Arc::downgrade(&self.inner), event, callback)
    }

    /// Remove every entry in the named event's sequence whose reference
    /// equals `callback`. Other events' listeners are unaffected. No-op if
    /// the event is unknown or the callback is not present.
    pub fn unsubscribe(&self, event: &str, callback: &Callback) {
        let removed = {
            let mut registry = self.inner.registry.lock();
            match registry.get_mut(event) {
                Some(entries) => {
                    let before = entries.len();
                    entries.retain(|cb| !Callback::same_callback(cb, callback));
                    before - entries.len()
                }
                None => 0,
            }
        };
        if removed > 0 {
            self.notify(RegistryChange::Unsubscribed {
                event: event.to_string(),
                removed,
            });
        }
    }

    /// Synchronously invoke every listener registered for `event` at the
    /// moment this call starts, in subscription order, each with the same
    /// argument slice.
    ///
    /// Returns one [`Outcome`] per snapshot listener, in invocation order. A
    /// listener failure is logged and captured in place; sibling listeners
    /// still run, and the call always completes. An asynchronous callback
    /// cannot complete on this path and is captured as a
    /// [`ListenerError::RequiresAsync`](super::ListenerError::RequiresAsync)
    /// failure. Publishing an event with no listeners returns an empty
    /// vector.
    pub fn publish(&self, event: &str, args: &[Value]) -> Vec<Outcome> {
        self.snapshot(event)
            .iter()
            .map(|cb| match cb.invoke_sync(args) {
                Ok(value) => Outcome::Ok(value),
                Err(err) => {
                    error!(event, error = %err, "listener invocation failed");
                    Outcome::capture(event, err)
                }
            })
            .collect()
    }

    /// Same contract as [`publish`](Self::publish), but listeners run
    /// strictly one after another: each asynchronous callback's future is
    /// awaited to completion before the next listener starts, and control is
    /// yielded to the scheduler between listeners. Synchronous callbacks are
    /// invoked inline within the sequence.
    ///
    /// There is no cancellation and no timeout: once started, the snapshot
    /// runs to completion, and a stalled listener future stalls the call.
    pub async fn publish_async(&self, event: &str, args: &[Value]) -> Vec<Outcome> {
        let listeners = self.snapshot(event);
        let args: Arc<[Value]> = args.into();
        let mut outcomes = Vec::with_capacity(listeners.len());
        for cb in &listeners {
            let outcome = match cb.invoke(Arc::clone(&args)).await {
                Ok(value) => Outcome::Ok(value),
                Err(err) => {
                    error!(event, error = %err, "listener invocation failed");
                    Outcome::capture(event, err)
                }
            };
            outcomes.push(outcome);
            tokio::task::yield_now().await;
        }
        outcomes
    }

    /// Remove the named event's entire listener sequence. No-op if the event
    /// is unknown or already empty.
    pub fn clear(&self, event: &str) {
        let removed = self
            .inner
            .registry
            .lock()
            .remove(event)
            .map(|entries| entries.len())
            .unwrap_or(0);
        if removed > 0 {
            self.notify(RegistryChange::Cleared {
                event: event.to_string(),
                removed,
            });
        }
    }

    /// Remove every event name and its listener sequence. Idempotent.
    pub fn clear_all(&self) {
        let events = {
            let mut registry = self.inner.registry.lock();
            let events = registry.len();
            registry.clear();
            events
        };
        if events > 0 {
            self.notify(RegistryChange::ClearedAll { events });
        }
    }

    /// Number of listeners currently registered for `event`.
    pub fn len(&self, event: &str) -> usize {
        self.inner
            .registry
            .lock()
            .get(event)
            .map(|entries| entries.len())
            .unwrap_or(0)
    }

    /// True when no event has any listener. An event name mapping to an
    /// emptied sequence counts as absent.
    pub fn is_empty(&self) -> bool {
        self.inner
            .registry
            .lock()
            .values()
            .all(|entries| entries.is_empty())
    }

    /// Names of events that currently have at least one listener.
    pub fn event_names(&self) -> Vec<String> {
        self.inner
            .registry
            .lock()
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub(crate) fn from_inner(inner: Arc<Inner>) -> Self {
        Self { inner }
    }

    // Listener list as of now; lock released before the caller invokes
    // anything.
    fn snapshot(&self, event: &str) -> Vec<Callback> {
        self.inner
            .registry
            .lock()
            .get(event)
            .map(|entries| entries.to_vec())
            .unwrap_or_default()
    }

    // Hook runs outside both locks so it may re-enter the emitter.
    fn notify(&self, change: RegistryChange) {
        let hook = self.inner.hook.lock().clone();
        if let Some(hook) = hook {
            hook.on_change(&change);
        }
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.inner.registry.lock();
        let mut map = f.debug_map();
        for (event, entries) in registry.iter() {
            map.entry(event, &entries.len());
        }
        map.finish()
    }
}
