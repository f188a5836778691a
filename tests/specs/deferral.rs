//! Deferral scenarios
//!
//! A held lock turns submissions into durable queue entries instead of
//! upstream calls.

use crate::prelude::*;

#[tokio::test]
async fn held_lock_defers_the_operation() {
    let h = Harness::in_memory();
    h.lock.set_locked(true).unwrap();

    let outcome = h.gate().submit(FocusTarget::Work).await.unwrap();

    let GateOutcome::Queued { id } = outcome else {
        panic!("expected deferral, got {:?}", outcome);
    };
    let entries = h.queue.list_all().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].1.id, id);
    assert_eq!(entries[0].1.target, FocusTarget::Work);
    assert!(h.client.calls().is_empty());
    assert!(h.lock.is_locked().unwrap());
}

#[tokio::test]
async fn deferred_operations_keep_submission_order() {
    let h = Harness::in_memory();
    h.lock.set_locked(true).unwrap();
    let gate = h.gate();

    gate.submit(FocusTarget::Work).await.unwrap();
    gate.submit(FocusTarget::Sleep).await.unwrap();
    gate.submit(FocusTarget::Drive).await.unwrap();

    assert_eq!(
        h.queued_targets(),
        vec![FocusTarget::Work, FocusTarget::Sleep, FocusTarget::Drive]
    );
}

#[tokio::test]
async fn clear_is_the_only_way_entries_disappear_undelivered() {
    let h = Harness::in_memory();
    h.lock.set_locked(true).unwrap();
    let gate = h.gate();
    gate.submit(FocusTarget::Work).await.unwrap();
    gate.submit(FocusTarget::None).await.unwrap();

    assert_eq!(h.queue.clear().unwrap(), 2);
    assert!(h.queue.is_empty().unwrap());
    assert!(h.client.calls().is_empty());
}
