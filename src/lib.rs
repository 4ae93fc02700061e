//! # Tannoy: In-Process Publish/Subscribe
//!
//! Tannoy is a small event-emitter library: a registry mapping event names to
//! ordered listener sequences, with synchronous and sequential-async
//! publication, exact-reference unsubscription, per-listener failure capture,
//! and an optional registry change-notification hook.
//!
//! ## Core Concepts
//!
//! - **Callback**: a listener, cloneable, wrapping a sync or async closure
//! - **Registry**: the mapping from event names to listener sequences
//! - **Publication**: invoking all of an event's listeners with one argument list
//! - **Outcome**: each listener's return value or its captured failure
//!
//! ## Quick Start
//!
//! ```
//! use serde_json::json;
//! use tannoy::{Callback, EventEmitter};
//!
//! let emitter = EventEmitter::new();
//!
//! let first = Callback::sync(|_args| Ok(json!(1)));
//! let second = Callback::sync(|_args| Ok(json!(2)));
//! emitter.subscribe("x", first.clone());
//! emitter.subscribe("x", second);
//!
//! // Listeners run in subscription order; one outcome each.
//! let values: Vec<_> = emitter
//!     .publish("x", &[])
//!     .into_iter()
//!     .filter_map(|o| o.into_value())
//!     .collect();
//! assert_eq!(values, vec![json!(1), json!(2)]);
//!
//! emitter.unsubscribe("x", &first);
//! let values: Vec<_> = emitter
//!     .publish("x", &[])
//!     .into_iter()
//!     .filter_map(|o| o.into_value())
//!     .collect();
//! assert_eq!(values, vec![json!(2)]);
//! ```
//!
//! ### Failures stay contained
//!
//! A failing listener never reaches the publisher as an error: its slot in
//! the outcome sequence records the captured failure, the failure is logged,
//! and the remaining listeners still run.
//!
//! ```
//! use serde_json::json;
//! use tannoy::{Callback, EventEmitter, ListenerError};
//!
//! let emitter = EventEmitter::new();
//! emitter.subscribe("job:done", Callback::sync(|_| Err(ListenerError::msg("boom"))));
//! emitter.subscribe("job:done", Callback::sync(|_| Ok(json!("survived"))));
//!
//! let outcomes = emitter.publish("job:done", &[]);
//! assert!(outcomes[0].is_failure());
//! assert_eq!(outcomes[1].value(), Some(&json!("survived")));
//! ```
//!
//! ### Asynchronous publication
//!
//! [`EventEmitter::publish_async`] awaits each listener to completion before
//! invoking the next: listeners never overlap, and ordering is predictable.
//!
//! ```
//! use serde_json::json;
//! use tannoy::{Callback, EventEmitter};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let emitter = EventEmitter::new();
//! emitter.subscribe(
//!     "fetch",
//!     Callback::asynchronous(|args| async move { Ok(args[0].clone()) }),
//! );
//!
//! let outcomes = emitter.publish_async("fetch", &[json!("payload")]).await;
//! assert_eq!(outcomes[0].value(), Some(&json!("payload")));
//! # }
//! ```
//!
//! ## Module Guide
//!
//! - [`emitter`] - The emitter, callbacks, outcomes, and change hooks
//! - [`shared`] - The process-wide shared instance
//! - [`telemetry`] - Optional tracing bootstrap

pub mod emitter;
pub mod shared;
pub mod telemetry;

pub use emitter::{
    Callback, CallbackResult, ChangeHook, ChannelHook, EventEmitter, FailureDetail, ListenerError,
    MemoryHook, Outcome, RegistryChange, Subscription, TracingHook,
};
pub use shared::shared;
