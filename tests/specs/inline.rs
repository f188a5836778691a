//! Inline execution scenarios
//!
//! A free lock means the change happens now, and the lock is free again
//! afterwards whatever the upstream said.

use crate::prelude::*;
use fx_core::GateError;

#[tokio::test]
async fn free_lock_executes_immediately() {
    let h = Harness::in_memory();

    let outcome = h.gate().submit(FocusTarget::Sleep).await.unwrap();

    assert_eq!(outcome, GateOutcome::Executed);
    assert_eq!(h.client.accepted_targets(), vec![FocusTarget::Sleep]);
    assert!(!h.lock.is_locked().unwrap());
    assert!(h.queue.is_empty().unwrap());
}

#[tokio::test]
async fn rejected_inline_call_surfaces_and_releases_the_lock() {
    let h = Harness::in_memory();
    h.client
        .push_failure(StatusError::Rejected("bad token".to_string()));

    let err = h.gate().submit(FocusTarget::Work).await.unwrap_err();

    assert!(matches!(err, GateError::Status(StatusError::Rejected(_))));
    // The failed call must not wedge the lock or leave a ghost entry
    assert!(!h.lock.is_locked().unwrap());
    assert!(h.queue.is_empty().unwrap());
}

#[tokio::test]
async fn unknown_target_is_rejected_before_any_side_effect() {
    let h = Harness::in_memory();

    let err = "vacation".parse::<FocusTarget>().unwrap_err();

    assert_eq!(err.to_string(), "Invalid status: vacation");
    assert!(!h.lock.is_locked().unwrap());
    assert!(h.queue.is_empty().unwrap());
    assert!(h.client.calls().is_empty());
}

#[tokio::test]
async fn releasing_an_unlocked_lock_is_a_no_op() {
    let h = Harness::in_memory();

    h.lock.release().unwrap();
    h.lock.release().unwrap();

    assert!(!h.lock.is_locked().unwrap());
    assert!(h.lock.try_acquire().unwrap());
}
