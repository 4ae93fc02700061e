#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use serde_json::Value;
use tannoy::{Callback, ListenerError};

/// Sync callback that always returns `value`.
pub fn returning(value: Value) -> Callback {
    Callback::sync(move |_| Ok(value.clone()))
}

/// Sync callback that bumps `counter` on each invocation and returns `value`.
pub fn counting(counter: Arc<AtomicUsize>, value: Value) -> Callback {
    Callback::sync(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(value.clone())
    })
}

/// Sync callback that always fails with the given message.
pub fn failing(message: &str) -> Callback {
    let message = message.to_string();
    Callback::sync(move |_| Err(ListenerError::msg(message.clone())))
}

/// Sync callback that appends `tag` to `log` on each invocation.
pub fn recording(log: Arc<Mutex<Vec<Value>>>, tag: Value) -> Callback {
    Callback::sync(move |_| {
        log.lock().push(tag.clone());
        Ok(tag.clone())
    })
}

/// Project a publication's outcomes to the successful values, in order.
pub fn values(outcomes: Vec<tannoy::Outcome>) -> Vec<Value> {
    outcomes.into_iter().filter_map(|o| o.into_value()).collect()
}
