//! Revision-log abstraction layer.
//!
//! The graph builder only ever sees raw text lines; where those lines come
//! from is behind the [HistoryLog] trait. The concrete implementations are:
//!
//! - [git::GitCliLog]: shells out to the `git` binary
//! - [mock::MockLog]: an in-memory implementation for testing
//!
//! Most code should depend on the trait rather than a concrete
//! implementation.

pub mod git;
pub mod mock;

pub use git::GitCliLog;
pub use mock::MockLog;

use crate::error::Result;
use crate::range::TagWindow;

/// Read-only queries against a repository's revision log.
///
/// Implementors must be `Send + Sync`: every dispatcher task queries the log
/// concurrently.
pub trait HistoryLog: Send + Sync {
    /// Raw candidate release-tag names found between the two release
    /// boundaries, restricted to the package's path, deduplicated.
    ///
    /// An empty result means the package was untouched in the range and is
    /// not an error.
    fn discover_tags(
        &self,
        release_start: &str,
        release_end: &str,
        package: &str,
    ) -> Result<Vec<String>>;

    /// First-parent log lines for one window, restricted to the package's
    /// path, newest first. "No matches" is an empty result, not an error.
    fn merge_commits(&self, window: &TagWindow, package: &str) -> Result<Vec<String>>;
}
