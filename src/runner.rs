//! Concurrent fan-out/fan-in execution over a keyed element collection.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::element::Element;
use crate::options::RunnerOptions;
use crate::outcome::{Outcome, RunReport};
use crate::task::{Task, TaskError};

/// Error produced when a fail-fast run aborts.
#[derive(Error, Debug)]
pub enum RunError {
    /// A task failed while the runner was configured to fail fast.
    ///
    /// When several invocations fail concurrently, which failure is
    /// surfaced is unspecified.
    #[error("task for element '{element}' failed: {source}")]
    TaskFailed {
        element: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Executes one task invocation per element concurrently and joins the
/// results into a single aggregate.
///
/// A runner is constructed once per run: elements, task, and options are
/// fixed for its lifetime, and [`run`](Runner::run) consumes it. Element
/// keys are expected to be unique; duplicates are not detected and later
/// completions overwrite earlier entries for the same key.
///
/// ```rust,ignore
/// let report = Runner::new(vec![1u32, 2, 3], task_fn(|n: u32| async move {
///     Ok::<_, TaskError>(n * 2)
/// }))
/// .run()
/// .await?;
///
/// assert_eq!(report.has_errors(), Some(false));
/// ```
pub struct Runner<E, T> {
    elements: Vec<E>,
    task: Arc<T>,
    options: RunnerOptions,
}

impl<E, T> Runner<E, T>
where
    E: Element,
    T: Task<E> + 'static,
    T::Output: 'static,
{
    /// Create a runner over the given elements with default options.
    pub fn new(elements: Vec<E>, task: T) -> Self {
        Self {
            elements,
            task: Arc::new(task),
            options: RunnerOptions::default(),
        }
    }

    /// Replace the runner's options.
    pub fn with_options(mut self, options: RunnerOptions) -> Self {
        self.options = options;
        self
    }

    /// Launch the task against every element, wait for all invocations to
    /// settle, and aggregate the outcomes.
    ///
    /// Fails only when the options request fail-fast behavior and at least
    /// one task fails; otherwise per-element failures are captured in the
    /// aggregate. Spawned invocations always run to completion; a failing
    /// run does not cancel its siblings, it only changes what is surfaced.
    pub async fn run(self) -> Result<RunReport<E, T::Output>, RunError> {
        let Runner {
            elements,
            task,
            options,
        } = self;
        let policy = options.resolve();

        debug!(elements = elements.len(), "launching tasks");

        // Fan-out: every invocation is spawned before any is awaited.
        let handles: Vec<_> = elements
            .into_iter()
            .map(|element| {
                let task = Arc::clone(&task);
                let key = element.clone();
                (key, tokio::spawn(async move { task.execute(element).await }))
            })
            .collect();

        // Fan-in: suspend only here, until the slowest invocation settles.
        let settled = futures::future::join_all(
            handles
                .into_iter()
                .map(|(key, handle)| async move { (key, handle.await) }),
        )
        .await;

        let mut outcomes = HashMap::with_capacity(settled.len());
        let mut has_errors = false;

        for (key, joined) in settled {
            let result = match joined {
                Ok(result) => result,
                // A panicking task settles as a failure of its element.
                Err(join_error) => Err(panic_error(join_error)),
            };

            match result {
                Ok(value) => {
                    outcomes.insert(key, Outcome::Success { value });
                }
                Err(error) => {
                    if policy.fails_fast() {
                        return Err(RunError::TaskFailed {
                            element: key.to_string(),
                            source: error.into_inner(),
                        });
                    }
                    has_errors = true;
                    outcomes.insert(key, Outcome::Failure { error });
                }
            }
        }

        debug!(outcomes = outcomes.len(), has_errors, "run settled");

        let flag = policy.reports_errors().then_some(has_errors);
        Ok(RunReport::new(outcomes, flag, policy.shaping()))
    }
}

fn panic_error(join_error: tokio::task::JoinError) -> TaskError {
    match join_error.try_into_panic() {
        Ok(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "task panicked".to_string());
            TaskError::msg(message)
        }
        Err(_) => TaskError::msg("task was aborted"),
    }
}
