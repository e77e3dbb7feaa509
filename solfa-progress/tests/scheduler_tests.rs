mod common;

use common::FakeRemote;
use solfa_progress::{SchedulerConfig, SyncScheduler};
use solfa_types::{Identity, ProgressDocument};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time;

const QUIET: Duration = Duration::from_secs(2);

fn doc_with_xp(total_xp: u32) -> ProgressDocument {
    ProgressDocument {
        total_xp,
        ..ProgressDocument::default()
    }
}

fn spawn_scheduler(
    remote: &Arc<FakeRemote>,
) -> (
    watch::Sender<ProgressDocument>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, rx) = watch::channel(ProgressDocument::default());
    let scheduler = SyncScheduler::new(
        Arc::clone(remote) as Arc<dyn solfa_remote::RemoteStore>,
        Identity::random(),
        SchedulerConfig {
            quiet_interval: QUIET,
        },
    );
    let handle = scheduler.spawn(rx);
    (tx, handle)
}

/// Lets the scheduler task observe pending notifications without
/// advancing the paused clock.
async fn drain() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn burst_coalesces_into_one_upsert_with_the_latest_document() {
    let remote = Arc::new(FakeRemote::empty());
    let (tx, _handle) = spawn_scheduler(&remote);

    for xp in 1..=5 {
        tx.send_replace(doc_with_xp(xp));
    }
    drain().await;
    assert_eq!(remote.upsert_count(), 0, "nothing fires inside the quiet window");

    time::advance(QUIET + Duration::from_millis(10)).await;
    drain().await;

    assert_eq!(remote.upsert_count(), 1, "five mutations, one upsert");
    assert_eq!(remote.last_upsert().unwrap().total_xp, 5);
}

#[tokio::test(start_paused = true)]
async fn change_inside_the_window_cancels_and_replaces_the_timer() {
    let remote = Arc::new(FakeRemote::empty());
    let (tx, _handle) = spawn_scheduler(&remote);

    tx.send_replace(doc_with_xp(1));
    drain().await;
    time::advance(QUIET - Duration::from_millis(10)).await;
    drain().await;
    assert_eq!(remote.upsert_count(), 0);

    tx.send_replace(doc_with_xp(2));
    drain().await;
    time::advance(QUIET - Duration::from_millis(10)).await;
    drain().await;
    assert_eq!(
        remote.upsert_count(),
        0,
        "the original deadline has passed but the timer was replaced"
    );

    time::advance(Duration::from_millis(20)).await;
    drain().await;
    assert_eq!(remote.upsert_count(), 1);
    assert_eq!(remote.last_upsert().unwrap().total_xp, 2);
}

#[tokio::test(start_paused = true)]
async fn separate_bursts_each_produce_an_upsert() {
    let remote = Arc::new(FakeRemote::empty());
    let (tx, _handle) = spawn_scheduler(&remote);

    tx.send_replace(doc_with_xp(10));
    drain().await;
    time::advance(QUIET + Duration::from_millis(10)).await;
    drain().await;
    assert_eq!(remote.upsert_count(), 1);

    tx.send_replace(doc_with_xp(20));
    drain().await;
    time::advance(QUIET + Duration::from_millis(10)).await;
    drain().await;
    assert_eq!(remote.upsert_count(), 2);
    assert_eq!(remote.last_upsert().unwrap().total_xp, 20);
}

#[tokio::test(start_paused = true)]
async fn upsert_failures_are_dropped_not_retried() {
    let remote = Arc::new(FakeRemote::failing());
    let (tx, _handle) = spawn_scheduler(&remote);

    tx.send_replace(doc_with_xp(1));
    drain().await;
    time::advance(QUIET + Duration::from_millis(10)).await;
    drain().await;
    assert_eq!(remote.upsert_calls(), 1);

    // No retry loop: the failed write is gone until the next mutation.
    time::advance(QUIET * 4).await;
    drain().await;
    assert_eq!(remote.upsert_calls(), 1);

    tx.send_replace(doc_with_xp(2));
    drain().await;
    time::advance(QUIET + Duration::from_millis(10)).await;
    drain().await;
    assert_eq!(remote.upsert_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn task_ends_when_the_store_is_dropped() {
    let remote = Arc::new(FakeRemote::empty());
    let (tx, handle) = spawn_scheduler(&remote);

    drop(tx);
    handle.await.unwrap();
    assert_eq!(remote.upsert_count(), 0);
}
