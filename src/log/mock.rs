use std::collections::HashMap;

use crate::error::{HistoryGraphError, Result};
use crate::log::HistoryLog;
use crate::range::TagWindow;

/// Mock log for testing without a repository or a git binary.
#[derive(Default)]
pub struct MockLog {
    tags_by_package: HashMap<String, Vec<String>>,
    default_tags: Vec<String>,
    commits_by_window: HashMap<(String, String), Vec<String>>,
    failing_packages: Vec<String>,
}

impl MockLog {
    /// Create a new empty mock log
    pub fn new() -> Self {
        MockLog::default()
    }

    /// Set the candidate tags returned for a specific package
    pub fn add_package_tags(&mut self, package: impl Into<String>, tags: Vec<String>) {
        self.tags_by_package.insert(package.into(), tags);
    }

    /// Set the candidate tags returned for packages without an explicit entry
    pub fn set_default_tags(&mut self, tags: Vec<String>) {
        self.default_tags = tags;
    }

    /// Set the log lines returned for one `(newer, exclude)` window
    pub fn add_commits(
        &mut self,
        newer: impl Into<String>,
        exclude: impl Into<String>,
        lines: Vec<String>,
    ) {
        self.commits_by_window
            .insert((newer.into(), exclude.into()), lines);
    }

    /// Make every query for a package fail
    pub fn fail_package(&mut self, package: impl Into<String>) {
        self.failing_packages.push(package.into());
    }

    fn check_failure(&self, package: &str) -> Result<()> {
        if self.failing_packages.iter().any(|p| p == package) {
            return Err(HistoryGraphError::log(format!(
                "mock failure for {}",
                package
            )));
        }
        Ok(())
    }
}

impl HistoryLog for MockLog {
    fn discover_tags(
        &self,
        _release_start: &str,
        _release_end: &str,
        package: &str,
    ) -> Result<Vec<String>> {
        self.check_failure(package)?;
        Ok(self
            .tags_by_package
            .get(package)
            .unwrap_or(&self.default_tags)
            .clone())
    }

    fn merge_commits(&self, window: &TagWindow, package: &str) -> Result<Vec<String>> {
        self.check_failure(package)?;
        let key = (window.newer.name.clone(), window.exclude.name.clone());
        Ok(self.commits_by_window.get(&key).cloned().unwrap_or_default())
    }
}
