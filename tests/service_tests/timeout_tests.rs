//! Tests for the bounded waits of an actor call
//!
//! A slow repository keeps the worker busy so that the enqueue and reply
//! ceilings, cancellation and deadlines can be observed.

use std::thread;
use std::time::{Duration, Instant};

use bakery_store::{BakeryError, Context, OrderService, Timeouts};

use crate::common::{valid_order, SlowOrderRepository};

fn setup_slow_service(delay_ms: u64, ceiling_ms: u64) -> OrderService {
    let repo = SlowOrderRepository::new(Duration::from_millis(delay_ms));
    OrderService::start(repo, Timeouts::uniform(Duration::from_millis(ceiling_ms))).unwrap()
}

#[test]
fn test_blocked_worker_yields_timeout_and_busy() {
    let service = setup_slow_service(600, 100);

    let (first, second) = thread::scope(|scope| {
        let first = scope.spawn(|| service.submit(&Context::background(), valid_order("Ada")));

        // Let the first request reach the worker
        thread::sleep(Duration::from_millis(30));
        let started = Instant::now();
        let second = service.submit(&Context::background(), valid_order("Grace"));
        assert!(started.elapsed() < Duration::from_millis(500));

        (first.join().unwrap(), second)
    });

    assert!(matches!(first, Err(BakeryError::Timeout("orders"))));
    assert!(matches!(second, Err(BakeryError::Busy("orders"))));
    assert!(first.unwrap_err().is_retryable());
}

#[test]
fn test_accepted_request_still_completes_after_timeout() {
    let service = setup_slow_service(200, 50);
    let ctx = Context::background();

    let err = service.submit(&ctx, valid_order("Ada")).unwrap_err();
    assert!(matches!(err, BakeryError::Timeout(_)));

    // The worker finishes the save even though the caller gave up
    thread::sleep(Duration::from_millis(300));
    assert_eq!(service.list(&ctx).unwrap().len(), 1);
}

#[test]
fn test_cancel_during_reply_wait() {
    let service = setup_slow_service(400, 2000);
    let (ctx, cancel) = Context::with_cancel();

    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        cancel.cancel();
    });

    let started = Instant::now();
    let err = service.submit(&ctx, valid_order("Ada")).unwrap_err();
    canceller.join().unwrap();

    assert!(matches!(err, BakeryError::Cancelled));
    assert!(started.elapsed() < Duration::from_millis(350));
}

#[test]
fn test_cancelled_context_is_rejected_up_front() {
    let service = setup_slow_service(0, 2000);
    let (ctx, cancel) = Context::with_cancel();
    drop(cancel);

    let err = service.list(&ctx).unwrap_err();

    assert!(matches!(err, BakeryError::Cancelled));
}

#[test]
fn test_deadline_during_reply_wait() {
    let service = setup_slow_service(400, 2000);
    let ctx = Context::background().with_timeout(Duration::from_millis(60));

    let err = service.submit(&ctx, valid_order("Ada")).unwrap_err();

    assert!(matches!(err, BakeryError::DeadlineExceeded));
    assert!(!err.is_retryable());
}

#[test]
fn test_deadline_during_enqueue_wait() {
    let service = setup_slow_service(500, 2000);

    thread::scope(|scope| {
        scope.spawn(|| {
            let _ = service.submit(&Context::background(), valid_order("Ada"));
        });
        thread::sleep(Duration::from_millis(30));

        let ctx = Context::background().with_timeout(Duration::from_millis(60));
        let err = service.submit(&ctx, valid_order("Grace")).unwrap_err();
        assert!(matches!(err, BakeryError::DeadlineExceeded));
    });
}

#[test]
fn test_derived_deadline_keeps_the_earliest() {
    let base = Context::background();
    assert!(base.deadline().is_none());

    let soon = Instant::now() + Duration::from_millis(100);
    let tight = base.with_deadline(soon);
    let relaxed = tight.with_timeout(Duration::from_secs(60));

    assert_eq!(tight.deadline(), Some(soon));
    assert_eq!(relaxed.deadline(), Some(soon));
}
