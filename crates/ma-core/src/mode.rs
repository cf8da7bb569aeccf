//! The task label an agent carries between stops.
//!
//! # Design
//!
//! Every agent type defines its own closed set of tasks as an enum
//! implementing [`Task`].  [`Mode`] wraps that enum with the three lifecycle
//! values every journey shares, so a behavior's `match` over its tasks is
//! checked for exhaustiveness by the compiler while the lifecycle values are
//! handled once, by the agent itself.

use std::fmt;

/// An application-defined task identifier.
///
/// # Example
///
/// ```rust
/// use ma_core::{Mode, Task};
///
/// #[derive(Copy, Clone, PartialEq, Eq, Debug)]
/// enum Chore { Fetch, Store }
///
/// impl Task for Chore {
///     fn identifier(&self) -> &'static str {
///         match self {
///             Chore::Fetch => "fetch",
///             Chore::Store => "store",
///         }
///     }
/// }
///
/// assert_eq!(Mode::Task(Chore::Fetch).identifier(), "fetch");
/// assert_eq!(Mode::<Chore>::Failed.identifier(), "failed");
/// ```
pub trait Task: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Stable human-readable name, written to traces.
    fn identifier(&self) -> &'static str;
}

/// What an agent is currently doing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode<T> {
    /// Travelling to the first stop of a journey.
    Activating,
    /// Performing an application task.
    Task(T),
    /// Journey completed successfully; the agent is about to park.
    Finished,
    /// Journey ended in an application-level failure; the agent is about to park.
    Failed,
}

impl<T: Task> Mode<T> {
    pub fn identifier(&self) -> &'static str {
        match self {
            Mode::Activating => "activating",
            Mode::Task(task) => task.identifier(),
            Mode::Finished   => "finished",
            Mode::Failed     => "failed",
        }
    }

    /// The wrapped task, or `None` for lifecycle values.
    #[inline]
    pub fn task(&self) -> Option<T> {
        match self {
            Mode::Task(task) => Some(*task),
            _ => None,
        }
    }

    /// `true` for `Finished` and `Failed`.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Mode::Finished | Mode::Failed)
    }
}

impl<T: Task> fmt::Display for Mode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}
