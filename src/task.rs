//! Task trait and error type.

use std::future::Future;

use async_trait::async_trait;
use thiserror::Error;

use crate::element::Element;

/// Error returned by a task execution.
///
/// Captured per element in the aggregate unless the runner is configured to
/// fail fast, in which case one of these becomes the run's own failure.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct TaskError(#[from] anyhow::Error);

impl TaskError {
    /// Create a task error from a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self(anyhow::anyhow!(message.into()))
    }

    /// Consume the error, returning the underlying cause.
    pub fn into_inner(self) -> anyhow::Error {
        self.0
    }
}

/// The asynchronous operation applied independently to each element.
#[async_trait]
pub trait Task<E: Element>: Send + Sync {
    /// The value produced for an element on success.
    type Output: Send;

    /// Execute the task for one element.
    async fn execute(&self, element: E) -> Result<Self::Output, TaskError>;
}

/// Adapter that lets a plain async closure act as a [`Task`].
///
/// Built with [`task_fn`].
pub struct TaskFn<F> {
    f: F,
}

/// Wrap an async closure as a [`Task`].
///
/// ```rust,ignore
/// let double = task_fn(|n: u32| async move { Ok::<_, TaskError>(n * 2) });
/// ```
pub fn task_fn<F>(f: F) -> TaskFn<F> {
    TaskFn { f }
}

#[async_trait]
impl<E, F, Fut, T> Task<E> for TaskFn<F>
where
    E: Element,
    F: Fn(E) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, TaskError>> + Send,
    T: Send,
{
    type Output = T;

    async fn execute(&self, element: E) -> Result<T, TaskError> {
        (self.f)(element).await
    }
}
