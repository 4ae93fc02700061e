use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use serde_json::Value;

use super::error::ListenerError;

/// Return type shared by synchronous and asynchronous listeners.
pub type CallbackResult = Result<Value, ListenerError>;

type SyncFn = dyn Fn(&[Value]) -> CallbackResult + Send + Sync;
type AsyncFn = dyn Fn(Arc<[Value]>) -> BoxFuture<'static, CallbackResult> + Send + Sync;

enum CallbackKind {
    Sync(Arc<SyncFn>),
    Async(Arc<AsyncFn>),
}

/// A registered listener: a cheaply-cloneable handle around a synchronous or
/// asynchronous closure.
///
/// Clones share the underlying closure and compare equal under
/// [`Callback::same_callback`]; two separately-constructed callbacks are
/// distinct references even when they wrap identical code. Reference identity
/// is what [`EventEmitter::unsubscribe`](crate::EventEmitter::unsubscribe)
/// matches on.
///
/// # Example
/// ```
/// use serde_json::json;
/// use tannoy::Callback;
///
/// let cb = Callback::sync(|_args| Ok(json!("pong")));
/// let clone = cb.clone();
/// assert!(Callback::same_callback(&cb, &clone));
///
/// let other = Callback::sync(|_args| Ok(json!("pong")));
/// assert!(!Callback::same_callback(&cb, &other));
/// ```
pub struct Callback {
    kind: CallbackKind,
}

impl Callback {
    /// Wrap a synchronous closure. Invocable by both publication paths.
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> CallbackResult + Send + Sync + 'static,
    {
        Self {
            kind: CallbackKind::Sync(Arc::new(f)),
        }
    }

    /// Wrap an asynchronous closure. Awaited by
    /// [`publish_async`](crate::EventEmitter::publish_async); a synchronous
    /// publication records it as a [`ListenerError::RequiresAsync`] failure.
    ///
    /// The closure receives the argument list behind an `Arc` so the returned
    /// future can own it without copying the payload.
    pub fn asynchronous<F, Fut>(f: F) -> Self
    where
        F: Fn(Arc<[Value]>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CallbackResult> + Send + 'static,
    {
        Self {
            kind: CallbackKind::Async(Arc::new(move |args| f(args).boxed())),
        }
    }

    /// Whether this callback can only complete under `publish_async`.
    pub fn is_async(&self) -> bool {
        matches!(self.kind, CallbackKind::Async(_))
    }

    /// Reference identity: true iff both handles share one underlying closure.
    pub fn same_callback(a: &Callback, b: &Callback) -> bool {
        match (&a.kind, &b.kind) {
            (CallbackKind::Sync(x), CallbackKind::Sync(y)) => Arc::ptr_eq(x, y),
            (CallbackKind::Async(x), CallbackKind::Async(y)) => Arc::ptr_eq(x, y),
            _ => false,
        }
    }

    pub(crate) fn invoke_sync(&self, args: &[Value]) -> CallbackResult {
        match &self.kind {
            CallbackKind::Sync(f) => f(args),
            CallbackKind::Async(_) => Err(ListenerError::RequiresAsync),
        }
    }

    pub(crate) async fn invoke(&self, args: Arc<[Value]>) -> CallbackResult {
        match &self.kind {
            CallbackKind::Sync(f) => f(args.as_ref()),
            CallbackKind::Async(f) => f(args).await,
        }
    }
}

impl Clone for Callback {
    fn clone(&self) -> Self {
        let kind = match &self.kind {
            CallbackKind::Sync(f) => CallbackKind::Sync(Arc::clone(f)),
            CallbackKind::Async(f) => CallbackKind::Async(Arc::clone(f)),
        };
        Self { kind }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            CallbackKind::Sync(_) => f.write_str("Callback::Sync(..)"),
            CallbackKind::Async(_) => f.write_str("Callback::Async(..)"),
        }
    }
}
