//! Runner options and policy resolution.

/// Process-time configuration for a runner.
///
/// Merged over defaults once per runner instance; every flag defaults to
/// `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunnerOptions {
    no_error: bool,
    throw_on_error: bool,
    distinctive_results: bool,
}

impl RunnerOptions {
    /// Create the default option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that failures are not expected.
    ///
    /// The aggregate failure flag is suppressed and outcomes are recorded
    /// bare. Takes precedence over `throw_on_error`.
    pub fn no_error(mut self, value: bool) -> Self {
        self.no_error = value;
        self
    }

    /// Fail fast: the first observed task failure becomes the run's own
    /// failure instead of captured data. Ignored when `no_error` is set.
    pub fn throw_on_error(mut self, value: bool) -> Self {
        self.throw_on_error = value;
        self
    }

    /// Record failures under an `error` field distinct from the success
    /// `value` field. Ignored when `no_error` or `throw_on_error` is set.
    pub fn distinctive_results(mut self, value: bool) -> Self {
        self.distinctive_results = value;
        self
    }

    /// Resolve the option set into the policy driving one run.
    pub(crate) fn resolve(self) -> Policy {
        if self.no_error {
            Policy::NoError
        } else if self.throw_on_error {
            Policy::FailFast
        } else {
            Policy::Capture {
                distinctive: self.distinctive_results,
            }
        }
    }
}

/// The closed set of behaviors an option set can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Policy {
    /// Failures are unexpected: bare outcomes, no aggregate flag.
    NoError,
    /// The first observed failure aborts the run.
    FailFast,
    /// Failures are captured per element alongside successes.
    Capture { distinctive: bool },
}

impl Policy {
    pub(crate) fn shaping(self) -> Shaping {
        match self {
            Policy::NoError | Policy::FailFast => Shaping::Bare,
            Policy::Capture { distinctive: false } => Shaping::Shared,
            Policy::Capture { distinctive: true } => Shaping::Distinct,
        }
    }

    /// Whether the aggregate carries the run-level failure flag.
    pub(crate) fn reports_errors(self) -> bool {
        matches!(self, Policy::Capture { .. })
    }

    pub(crate) fn fails_fast(self) -> bool {
        matches!(self, Policy::FailFast)
    }
}

/// How per-element outcomes are rendered when the aggregate is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shaping {
    /// Payloads only, no `isError` tag.
    Bare,
    /// `value` holds the success value or the error, tagged by `isError`.
    Shared,
    /// Successes under `value`, failures under `error`, tagged by `isError`.
    Distinct,
}
