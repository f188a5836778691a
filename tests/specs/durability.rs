//! Durability scenarios over the file-backed store
//!
//! Lock and queue state must survive a process restart, and a restart with
//! a free lock and a leftover queue must drain without waiting for a new
//! lock transition.

use crate::prelude::*;
use tempfile::TempDir;

#[tokio::test]
async fn lock_and_queue_survive_restart() {
    let dir = TempDir::new().unwrap();

    {
        let h = Harness::on_disk(&dir);
        h.lock.set_locked(true).unwrap();
        h.gate().submit(FocusTarget::Work).await.unwrap();
    }

    let h = Harness::on_disk(&dir);
    assert!(h.lock.is_locked().unwrap());
    assert_eq!(h.queued_targets(), vec![FocusTarget::Work]);
}

#[tokio::test]
async fn leftover_queue_drains_on_startup() {
    let dir = TempDir::new().unwrap();

    // A previous process queued work and crashed after releasing the lock
    {
        let h = Harness::on_disk(&dir);
        h.queue.enqueue(FocusTarget::Drive).unwrap();
    }

    let h = Harness::on_disk(&dir);
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let drainer = h.drainer();
    let handle = tokio::spawn(async move { drainer.run(shutdown_rx).await });

    // No lock transition happens; the initial watch event alone must drain
    wait_until(|| h.queue.is_empty().unwrap()).await;
    shutdown_tx.send(true).unwrap();
    handle.await.unwrap();

    assert_eq!(h.client.accepted_targets(), vec![FocusTarget::Drive]);
    assert!(!h.lock.is_locked().unwrap());
}

#[tokio::test]
async fn full_cycle_on_disk_leaves_clean_state() {
    let dir = TempDir::new().unwrap();
    let h = Harness::on_disk(&dir);

    h.lock.set_locked(true).unwrap();
    let gate = h.gate();
    gate.submit(FocusTarget::Sleep).await.unwrap();
    gate.submit(FocusTarget::None).await.unwrap();
    h.lock.release().unwrap();

    let report = h.drainer().drain_cycle().await.unwrap();

    assert_eq!(report.processed, 2);
    assert!(h.queue.is_empty().unwrap());
    assert!(!h.lock.is_locked().unwrap());
    assert_eq!(
        h.client.accepted_targets(),
        vec![FocusTarget::Sleep, FocusTarget::None]
    );
}
