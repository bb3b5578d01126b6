//! # Fanjoin
//!
//! Keyed concurrent fan-out/fan-in task execution.
//!
//! Give a runner a collection of uniquely-keyed elements and an async task;
//! it launches one invocation per element, waits for all of them to settle,
//! and hands back a single aggregate keyed by element, shaped by the
//! failure-handling policy you pick.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fanjoin::{task_fn, Runner, TaskError};
//!
//! let report = Runner::new(
//!     vec![1u32, 2, 3],
//!     task_fn(|n: u32| async move { Ok::<_, TaskError>(n * 2) }),
//! )
//! .run()
//! .await?;
//!
//! assert_eq!(report.has_errors(), Some(false));
//! assert_eq!(report.get(&2).and_then(|o| o.value()), Some(&4));
//! ```
//!
//! ## Failure Policies
//!
//! - Default: failures are captured per element next to successes, and the
//!   aggregate carries a `hasErrors` flag.
//! - `distinctive_results`: captured failures serialize under an `error`
//!   field instead of reusing the success `value` field.
//! - `throw_on_error`: the first observed failure becomes the run's own
//!   failure; siblings still run to completion.
//! - `no_error`: failures are not expected; outcomes are recorded bare and
//!   the aggregate flag is suppressed.
//!
//! ```rust,ignore
//! use fanjoin::RunnerOptions;
//!
//! let options = RunnerOptions::new().distinctive_results(true);
//! let report = Runner::new(elements, task).with_options(options).run().await?;
//! ```
//!
//! ## Gateway Glue
//!
//! The [`gateway`] and [`params`] modules hold the thin adapters a
//! serverless entry point needs around a run: a response envelope with CORS
//! headers, a status-coded error, and a metadata-comment extractor for
//! build tooling. The runner itself depends on none of them.

pub mod element;
pub mod gateway;
pub mod options;
pub mod outcome;
pub mod params;
pub mod runner;
pub mod task;

pub use element::Element;
pub use gateway::{
    handle_error, respond, respond_with_status, CorsHeaders, GatewayResponse, StatusError,
};
pub use options::RunnerOptions;
pub use outcome::{Outcome, RunReport};
pub use params::{find_params_comment, generate_params_comment, params_comment_in_file};
pub use runner::{RunError, Runner};
pub use task::{task_fn, Task, TaskError, TaskFn};
