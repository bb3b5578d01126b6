//! Element keys over which tasks are fanned out.

use std::fmt::Display;
use std::hash::Hash;

/// A value usable as the unique key of a fan-out element.
///
/// Covered by the blanket impl for strings, integers, and any caller-defined
/// key type that is cloneable, hashable, and displayable. Key uniqueness
/// within one run is a caller-supplied precondition: the runner does not
/// detect duplicates, and a later completion overwrites the aggregate entry
/// of an earlier one under the same key.
pub trait Element: Clone + Eq + Hash + Display + Send + Sync + 'static {}

impl<T> Element for T where T: Clone + Eq + Hash + Display + Send + Sync + 'static {}
