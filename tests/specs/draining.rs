//! Drain scenarios
//!
//! Releasing the lock is the event that flushes the queue; a drain leaves
//! the queue empty and the lock free unless the upstream disappears
//! mid-batch.

use crate::prelude::*;

#[tokio::test]
async fn releasing_the_lock_drains_queued_operations_in_order() {
    let h = Harness::in_memory();
    h.lock.set_locked(true).unwrap();
    let gate = h.gate();
    gate.submit(FocusTarget::Drive).await.unwrap();
    gate.submit(FocusTarget::None).await.unwrap();

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let drainer = h.drainer();
    let handle = tokio::spawn(async move { drainer.run(shutdown_rx).await });

    h.lock.release().unwrap();
    wait_until(|| h.queue.is_empty().unwrap()).await;
    shutdown_tx.send(true).unwrap();
    handle.await.unwrap();

    assert_eq!(
        h.client.accepted_targets(),
        vec![FocusTarget::Drive, FocusTarget::None]
    );
    assert!(!h.lock.is_locked().unwrap());
}

#[tokio::test]
async fn rejected_entry_does_not_block_the_rest_of_the_batch() {
    let h = Harness::in_memory();
    h.queue.enqueue(FocusTarget::Work).unwrap();
    h.queue.enqueue(FocusTarget::Sleep).unwrap();
    h.client
        .push_failure(StatusError::Rejected("refused".to_string()));

    let report = h.drainer().drain_cycle().await.unwrap();

    assert_eq!(report.processed, 1);
    assert_eq!(report.failed, 1);
    assert!(!report.aborted);
    assert!(h.queue.is_empty().unwrap());
    assert!(!h.lock.is_locked().unwrap());
    assert_eq!(h.client.accepted_targets(), vec![FocusTarget::Sleep]);
}

#[tokio::test]
async fn unreachable_upstream_aborts_the_batch_and_keeps_the_rest() {
    let h = Harness::in_memory();
    h.queue.enqueue(FocusTarget::Work).unwrap();
    h.queue.enqueue(FocusTarget::Sleep).unwrap();
    h.queue.enqueue(FocusTarget::Drive).unwrap();
    h.client
        .push_failure(StatusError::Unreachable("connection refused".to_string()));

    let report = h.drainer().drain_cycle().await.unwrap();

    assert!(report.aborted);
    assert_eq!(report.failed, 1);
    assert_eq!(report.processed, 0);
    // The first entry was taken; the untouched tail stays for the next cycle
    assert_eq!(
        h.queued_targets(),
        vec![FocusTarget::Sleep, FocusTarget::Drive]
    );
    assert!(!h.lock.is_locked().unwrap());
}

#[tokio::test]
async fn empty_queue_drains_without_touching_the_lock() {
    let h = Harness::in_memory();

    let report = h.drainer().drain_cycle().await.unwrap();

    assert_eq!(report.processed, 0);
    assert!(!h.lock.is_locked().unwrap());
    assert!(h.client.calls().is_empty());
}
