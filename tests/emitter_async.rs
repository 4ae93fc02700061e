mod common;
use common::*;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::{Value, json};
use tannoy::{Callback, EventEmitter, ListenerError};
use tokio::time::sleep;

/// Async callback that records entry/exit in `log`, asserting via `in_flight`
/// that no other listener is running at the same time.
fn sequenced(
    tag: &'static str,
    delay: Duration,
    log: Arc<Mutex<Vec<String>>>,
    in_flight: Arc<AtomicBool>,
) -> Callback {
    Callback::asynchronous(move |_args| {
        let log = Arc::clone(&log);
        let in_flight = Arc::clone(&in_flight);
        async move {
            assert!(
                !in_flight.swap(true, Ordering::SeqCst),
                "listener {tag} started while another listener was still running"
            );
            log.lock().push(format!("{tag}:start"));
            sleep(delay).await;
            log.lock().push(format!("{tag}:end"));
            in_flight.store(false, Ordering::SeqCst);
            Ok(json!(tag))
        }
    })
}

#[tokio::test]
async fn listeners_run_strictly_one_after_another() {
    let emitter = EventEmitter::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    let in_flight = Arc::new(AtomicBool::new(false));

    // Decreasing delays: concurrent execution would finish in reverse order.
    for (tag, millis) in [("slow", 30u64), ("medium", 10), ("fast", 0)] {
        emitter.subscribe(
            "work",
            sequenced(
                tag,
                Duration::from_millis(millis),
                Arc::clone(&log),
                Arc::clone(&in_flight),
            ),
        );
    }

    let outcomes = emitter.publish_async("work", &[]).await;
    assert_eq!(values(outcomes), vec![json!("slow"), json!("medium"), json!("fast")]);
    assert_eq!(
        *log.lock(),
        vec![
            "slow:start",
            "slow:end",
            "medium:start",
            "medium:end",
            "fast:start",
            "fast:end",
        ]
    );
}

#[tokio::test]
async fn sync_callbacks_participate_in_the_async_sequence() {
    let emitter = EventEmitter::new();
    emitter.subscribe("mixed", returning(json!("sync")));
    emitter.subscribe(
        "mixed",
        Callback::asynchronous(|args| async move { Ok(args[0].clone()) }),
    );
    emitter.subscribe("mixed", returning(json!("sync again")));

    let outcomes = emitter.publish_async("mixed", &[json!("async echo")]).await;
    assert_eq!(
        values(outcomes),
        vec![json!("sync"), json!("async echo"), json!("sync again")]
    );
}

#[tokio::test]
async fn a_failing_listener_does_not_block_its_successors() {
    let emitter = EventEmitter::new();
    let counter = Arc::new(AtomicUsize::new(0));
    emitter.subscribe(
        "job",
        Callback::asynchronous(|_| async move {
            Err(ListenerError::msg("timed out upstream"))
        }),
    );
    emitter.subscribe("job", counting(Arc::clone(&counter), json!("ran")));

    let outcomes = emitter.publish_async("job", &[]).await;
    assert_eq!(outcomes.len(), 2);
    let detail = outcomes[0].failure().expect("captured failure");
    assert_eq!(detail.event, "job");
    assert_eq!(detail.error, ListenerError::msg("timed out upstream"));
    assert_eq!(outcomes[1].value(), Some(&json!("ran")));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn publish_async_without_subscribers_resolves_empty() {
    let emitter = EventEmitter::new();
    assert!(emitter.publish_async("silence", &[]).await.is_empty());
}

#[tokio::test]
async fn arguments_reach_every_async_listener() {
    let emitter = EventEmitter::new();
    for _ in 0..3 {
        emitter.subscribe(
            "fanout",
            Callback::asynchronous(|args| async move { Ok(Value::Array(args.to_vec())) }),
        );
    }

    let args = [json!({"id": 7}), json!("payload")];
    let outcomes = emitter.publish_async("fanout", &args).await;
    assert_eq!(outcomes.len(), 3);
    for outcome in &outcomes {
        assert_eq!(outcome.value(), Some(&json!([{"id": 7}, "payload"])));
    }
}

#[tokio::test]
async fn snapshot_is_taken_at_publication_start() {
    let emitter = EventEmitter::new();
    let handle = emitter.clone();
    emitter.subscribe(
        "grow",
        Callback::asynchronous(move |_| {
            let handle = handle.clone();
            async move {
                // Added mid-round: next publication only.
                handle.subscribe("grow", returning(json!("late")));
                Ok(json!("first"))
            }
        }),
    );

    let outcomes = emitter.publish_async("grow", &[]).await;
    assert_eq!(values(outcomes), vec![json!("first")]);

    let outcomes = emitter.publish_async("grow", &[]).await;
    assert_eq!(outcomes.len(), 2);
}
