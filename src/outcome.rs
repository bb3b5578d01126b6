//! Per-element outcomes and the aggregate run report.

use std::collections::HashMap;
use std::hash::Hash;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::options::Shaping;
use crate::task::TaskError;

/// The settled result of one task invocation, tagged success or failure.
///
/// The tag always agrees with how the underlying task settled.
#[derive(Debug)]
pub enum Outcome<V> {
    /// The task produced a value.
    Success { value: V },
    /// The task failed; the error is captured data, not a runner failure.
    Failure { error: TaskError },
}

impl<V> Outcome<V> {
    /// Whether this outcome records a failure.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// The success value, if any.
    pub fn value(&self) -> Option<&V> {
        match self {
            Self::Success { value } => Some(value),
            Self::Failure { .. } => None,
        }
    }

    /// The captured error, if any.
    pub fn error(&self) -> Option<&TaskError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    /// Consume the outcome, returning the success value if any.
    pub fn into_value(self) -> Option<V> {
        match self {
            Self::Success { value } => Some(value),
            Self::Failure { .. } => None,
        }
    }
}

/// Aggregate produced by one run.
///
/// Holds exactly one outcome per distinct element key, the run-level
/// failure flag when the policy reports one, and the shaping resolved at
/// construction time. Insertion order is not preserved; the key set is
/// deterministic for a fixed input.
#[derive(Debug)]
pub struct RunReport<K, V> {
    outcomes: HashMap<K, Outcome<V>>,
    has_errors: Option<bool>,
    shaping: Shaping,
}

impl<K: Eq + Hash, V> RunReport<K, V> {
    pub(crate) fn new(
        outcomes: HashMap<K, Outcome<V>>,
        has_errors: Option<bool>,
        shaping: Shaping,
    ) -> Self {
        Self {
            outcomes,
            has_errors,
            shaping,
        }
    }

    /// The aggregate mapping, keyed by element.
    pub fn result(&self) -> &HashMap<K, Outcome<V>> {
        &self.outcomes
    }

    /// The outcome recorded for one element key.
    pub fn get(&self, key: &K) -> Option<&Outcome<V>> {
        self.outcomes.get(key)
    }

    /// Whether any outcome failed; `None` when suppressed by policy.
    pub fn has_errors(&self) -> Option<bool> {
        self.has_errors
    }

    /// Number of entries in the aggregate.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Consume the report, returning the aggregate mapping.
    pub fn into_result(self) -> HashMap<K, Outcome<V>> {
        self.outcomes
    }
}

impl<K, V> RunReport<K, V>
where
    K: Serialize + Eq + Hash,
    V: Serialize,
{
    /// Serialize the report to its JSON wire form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Two-space-indented rendition of the wire form.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<K, V> Serialize for RunReport<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = if self.has_errors.is_some() { 2 } else { 1 };
        let mut map = serializer.serialize_map(Some(entries))?;
        map.serialize_entry(
            "result",
            &ShapedResult {
                outcomes: &self.outcomes,
                shaping: self.shaping,
            },
        )?;
        if let Some(flag) = self.has_errors {
            map.serialize_entry("hasErrors", &flag)?;
        }
        map.end()
    }
}

struct ShapedResult<'a, K, V> {
    outcomes: &'a HashMap<K, Outcome<V>>,
    shaping: Shaping,
}

impl<K, V> Serialize for ShapedResult<'_, K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.outcomes.len()))?;
        for (key, outcome) in self.outcomes {
            map.serialize_entry(
                key,
                &ShapedOutcome {
                    outcome,
                    shaping: self.shaping,
                },
            )?;
        }
        map.end()
    }
}

struct ShapedOutcome<'a, V> {
    outcome: &'a Outcome<V>,
    shaping: Shaping,
}

impl<V: Serialize> Serialize for ShapedOutcome<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match (self.shaping, self.outcome) {
            (Shaping::Bare, Outcome::Success { value }) => value.serialize(serializer),
            (Shaping::Bare, Outcome::Failure { error }) => {
                serializer.serialize_str(&error.to_string())
            }
            (_, Outcome::Success { value }) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("value", value)?;
                map.serialize_entry("isError", &false)?;
                map.end()
            }
            (Shaping::Shared, Outcome::Failure { error }) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("value", &error.to_string())?;
                map.serialize_entry("isError", &true)?;
                map.end()
            }
            (Shaping::Distinct, Outcome::Failure { error }) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("error", &error.to_string())?;
                map.serialize_entry("isError", &true)?;
                map.end()
            }
        }
    }
}
