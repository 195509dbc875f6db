//! Composites report their progress through `tracing`

use tracing_test::traced_test;
use tributary::prelude::*;
use tributary::testing::{always_invalid, always_valid};

#[test]
#[traced_test]
fn test_chain_logs_stop_and_finish() {
    let chain = Chain::<i32>::builder()
        .name("logged")
        .add(always_invalid("E1"))
        .add(always_valid())
        .stop_on_first_error(true)
        .build();

    chain.validate(&1);

    assert!(logs_contain("chain stopped at first error"));
    assert!(logs_contain("chain finished"));
    assert!(logs_contain("logged"));
}

#[test]
#[traced_test]
fn test_group_logs_branches() {
    let group = ParallelGroup::<i32>::builder()
        .name("fan-out")
        .add(always_valid())
        .add(always_valid())
        .build();

    group.validate(&1);

    assert!(logs_contain("branch finished"));
    assert!(logs_contain("parallel group finished"));
}

#[test]
#[traced_test]
fn test_gate_logs_decision() {
    let gate = Conditional::builder(|n: &i32| *n > 0, always_valid())
        .name("positive-only")
        .build();

    gate.validate(&-1);

    assert!(logs_contain("conditional gate evaluated"));
    assert!(logs_contain("condition_met=false"));
}

#[cfg(feature = "async")]
#[tokio::test]
#[traced_test]
async fn test_async_group_logs_like_sync_group() {
    use std::sync::Arc;

    let group = ParallelGroup::<i32>::builder()
        .name("async-fan-out")
        .add(always_valid())
        .add(always_invalid("E"))
        .build();

    let _ = group.validate_async(Arc::new(1), &Context::new()).await;

    assert!(logs_contain("async-fan-out"));
    assert!(logs_contain("branch finished"));
    assert!(logs_contain("parallel group finished"));
}
