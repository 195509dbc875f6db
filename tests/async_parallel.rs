//! Parallel groups on the tokio blocking pool

use std::collections::BTreeSet;
use std::sync::{Arc, Barrier};

use tributary::prelude::*;
use tributary::testing::{always_invalid, always_valid, Counting};

#[tokio::test]
async fn test_async_group_collects_every_branch() {
    let group = ParallelGroup::<str>::builder()
        .name("async")
        .add(always_invalid("A"))
        .add(always_valid())
        .add(always_invalid("B"))
        .build();

    let ctx = Context::new().with_request_id("req-9");
    let result = group.validate_async(Arc::from("value"), &ctx).await;

    let codes: BTreeSet<_> = result.codes().into_iter().collect();
    assert_eq!(codes, ["A", "B"].into_iter().collect::<BTreeSet<_>>());
    assert_eq!(result.context().get_str(keys::GROUP_NAME), Some("async"));
    assert_eq!(result.context().get_str(keys::REQUEST_ID), Some("req-9"));
    assert_eq!(
        result.context().get(keys::TOTAL_VALIDATORS),
        Some(&Value::UInt(3))
    );
    assert_eq!(
        result.context().get(keys::PARALLEL_EXECUTION),
        Some(&Value::Bool(true))
    );
}

#[tokio::test]
async fn test_async_empty_group_is_plain_success() {
    let group = ParallelGroup::<i32>::builder().build();
    let result = group.validate_async(Arc::new(1), &Context::new()).await;
    assert!(result.is_valid());
    assert!(result.context().is_empty());
}

#[tokio::test]
async fn test_async_branches_run_concurrently_and_once() {
    let barrier = Arc::new(Barrier::new(3));
    let mut builder = ParallelGroup::<i32>::builder();
    let mut counters = Vec::new();
    for _ in 0..3 {
        let barrier = Arc::clone(&barrier);
        let spy = Counting::new(move |_: &i32| {
            barrier.wait();
            ValidationResult::success()
        });
        counters.push(spy.counter());
        builder = builder.add(spy);
    }
    let group = builder.build();

    let result = group.validate_async(Arc::new(0), &Context::new()).await;
    assert!(result.is_valid());
    assert!(counters.iter().all(|c| c.get() == 1));
}

#[tokio::test]
#[should_panic(expected = "async branch exploded")]
async fn test_async_branch_panic_propagates() {
    let group = ParallelGroup::<i32>::builder()
        .add(always_valid())
        .add(|_: &i32| -> ValidationResult { panic!("async branch exploded") })
        .build();

    let _ = group.validate_async(Arc::new(0), &Context::new()).await;
}
