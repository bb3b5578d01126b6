//! Integration tests for the concurrent task runner.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use fanjoin::{task_fn, RunError, Runner, RunnerOptions, Task, TaskError};
use tokio::sync::Mutex;

// Task that doubles its element.
struct DoubleTask;

#[async_trait]
impl Task<u32> for DoubleTask {
    type Output = u32;

    async fn execute(&self, element: u32) -> Result<u32, TaskError> {
        Ok(element * 2)
    }
}

// Task that fails for one configured element and records every launch.
struct FailForTask {
    fail_on: &'static str,
    started: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Task<&'static str> for FailForTask {
    type Output = String;

    async fn execute(&self, element: &'static str) -> Result<String, TaskError> {
        self.started.lock().await.push(element.to_string());
        if element == self.fail_on {
            return Err(TaskError::msg(format!("no data for {element}")));
        }
        Ok(element.to_uppercase())
    }
}

#[tokio::test]
async fn test_all_success_has_one_entry_per_element() {
    let report = Runner::new(vec![1u32, 2, 3], DoubleTask).run().await.unwrap();

    assert_eq!(report.len(), 3);
    assert_eq!(report.has_errors(), Some(false));
    for n in [1u32, 2, 3] {
        let outcome = report.get(&n).expect("entry per element");
        assert!(!outcome.is_error());
        assert_eq!(outcome.value(), Some(&(n * 2)));
    }
}

#[tokio::test]
async fn test_single_failure_is_captured_next_to_successes() {
    let task = FailForTask {
        fail_on: "b",
        started: Arc::new(Mutex::new(Vec::new())),
    };
    let report = Runner::new(vec!["a", "b", "c"], task).run().await.unwrap();

    assert_eq!(report.has_errors(), Some(true));
    assert_eq!(report.get(&"a").and_then(|o| o.value()), Some(&"A".to_string()));
    assert_eq!(report.get(&"c").and_then(|o| o.value()), Some(&"C".to_string()));

    let failure = report.get(&"b").expect("failed element is still present");
    assert!(failure.is_error());
    assert_eq!(
        failure.error().map(ToString::to_string),
        Some("no data for b".to_string())
    );
}

#[tokio::test]
async fn test_fail_fast_surfaces_the_failure_as_run_error() {
    let started = Arc::new(Mutex::new(Vec::new()));
    let task = FailForTask {
        fail_on: "b",
        started: started.clone(),
    };
    let result = Runner::new(vec!["a", "b"], task)
        .with_options(RunnerOptions::new().throw_on_error(true))
        .run()
        .await;

    let RunError::TaskFailed { element, .. } = result.expect_err("run must fail");
    assert_eq!(element, "b");

    // Siblings are never cancelled; every invocation ran to completion
    // before the failure was surfaced.
    assert_eq!(started.lock().await.len(), 2);
}

#[tokio::test]
async fn test_fail_fast_without_failures_returns_the_aggregate() {
    let report = Runner::new(vec![1u32, 2], DoubleTask)
        .with_options(RunnerOptions::new().throw_on_error(true))
        .run()
        .await
        .unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(report.has_errors(), None);
    assert_eq!(report.get(&1).and_then(|o| o.value()), Some(&2));
}

#[tokio::test]
async fn test_no_error_suppresses_the_flag_but_keeps_the_failure() {
    let task = FailForTask {
        fail_on: "b",
        started: Arc::new(Mutex::new(Vec::new())),
    };
    let report = Runner::new(vec!["a", "b"], task)
        .with_options(RunnerOptions::new().no_error(true))
        .run()
        .await
        .unwrap();

    assert_eq!(report.has_errors(), None);
    assert!(report.get(&"b").is_some_and(|o| o.is_error()));
}

#[tokio::test]
async fn test_empty_elements_yield_empty_aggregate() {
    let report = Runner::new(Vec::<u32>::new(), DoubleTask).run().await.unwrap();

    assert!(report.is_empty());
    assert_eq!(report.has_errors(), Some(false));
}

#[tokio::test]
async fn test_fan_out_launches_all_invocations_concurrently() {
    let task = task_fn(|n: u32| async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok::<_, TaskError>(n)
    });

    let start = Instant::now();
    let report = Runner::new((0u32..8).collect::<Vec<_>>(), task).run().await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(report.len(), 8);
    // Sequential execution would need 800ms; concurrent fan-out stays close
    // to a single task's latency.
    assert!(
        elapsed < Duration::from_millis(400),
        "fan-out took {elapsed:?}"
    );
}

#[tokio::test]
async fn test_key_set_is_stable_across_runs() {
    let flaky_on_even = || {
        task_fn(|n: u32| async move {
            if n % 2 == 0 {
                return Err(TaskError::msg(format!("even element {n}")));
            }
            Ok(n * 10)
        })
    };

    let first = Runner::new(vec![1u32, 2, 3, 4], flaky_on_even())
        .run()
        .await
        .unwrap();
    let second = Runner::new(vec![1u32, 2, 3, 4], flaky_on_even())
        .run()
        .await
        .unwrap();

    assert_eq!(first.len(), second.len());
    for n in [1u32, 2, 3, 4] {
        let a = first.get(&n).expect("key present in first run");
        let b = second.get(&n).expect("key present in second run");
        assert_eq!(a.is_error(), b.is_error());
    }
}

#[tokio::test]
async fn test_panicking_task_settles_as_a_failure() {
    let task = task_fn(|n: u32| async move {
        if n == 2 {
            panic!("boom for {n}");
        }
        Ok::<_, TaskError>(n)
    });

    let report = Runner::new(vec![1u32, 2, 3], task).run().await.unwrap();

    assert_eq!(report.has_errors(), Some(true));
    assert_eq!(report.len(), 3);

    let failure = report.get(&2).expect("panicked element is present");
    let message = failure.error().map(ToString::to_string).unwrap_or_default();
    assert!(message.contains("boom"), "unexpected message: {message}");
}

#[tokio::test]
async fn test_duplicate_keys_keep_the_last_write() {
    // Documented precondition: keys should be unique. When they are not,
    // one entry per distinct key survives.
    let report = Runner::new(vec![1u32, 1, 2], DoubleTask).run().await.unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(report.get(&1).and_then(|o| o.value()), Some(&2));
}
