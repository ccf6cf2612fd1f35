use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::Command;

use regex::Regex;

use crate::config::GitConfig;
use crate::error::{HistoryGraphError, Result};
use crate::log::HistoryLog;
use crate::range::TagWindow;

/// [HistoryLog] implementation that shells out to the `git` binary.
///
/// Exit code 1 from a log query means "no matches" and is treated as a valid,
/// empty result; any other non-zero status is a task failure.
pub struct GitCliLog {
    binary: String,
    remote: String,
    tag_pattern: Regex,
    repo_dir: PathBuf,
}

impl GitCliLog {
    /// Creates a log collaborator for the repository at `repo_dir`.
    ///
    /// # Arguments
    /// * `config` - Binary name, remote name, and release-tag filter pattern
    /// * `repo_dir` - Working directory for every git invocation
    ///
    /// # Returns
    /// * `Ok(GitCliLog)` - Ready to query
    /// * `Err` - If the configured tag pattern is not a valid regex
    pub fn new(config: &GitConfig, repo_dir: impl Into<PathBuf>) -> Result<Self> {
        let tag_pattern = Regex::new(&config.tag_pattern)
            .map_err(|e| HistoryGraphError::config(format!("invalid tag_pattern: {}", e)))?;

        Ok(GitCliLog {
            binary: config.binary.clone(),
            remote: config.remote.clone(),
            tag_pattern,
            repo_dir: repo_dir.into(),
        })
    }

    fn run_log(&self, args: &[&str]) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg("--no-pager")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .map_err(|e| {
                HistoryGraphError::log(format!("failed to execute {}: {}", self.binary, e))
            })?;

        // Exit code 1 is "no matches", not a failure.
        match output.status.code() {
            Some(0) | Some(1) => Ok(String::from_utf8_lossy(&output.stdout).into_owned()),
            code => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(HistoryGraphError::log(format!(
                    "{} log exited with {:?}: {}",
                    self.binary,
                    code,
                    stderr.trim()
                )))
            }
        }
    }
}

impl HistoryLog for GitCliLog {
    fn discover_tags(
        &self,
        release_start: &str,
        release_end: &str,
        package: &str,
    ) -> Result<Vec<String>> {
        let newer = format!("{}/{}", self.remote, release_start);
        let older = format!("^{}/{}", self.remote, release_end);

        let stdout = self.run_log(&[
            "log",
            "--first-parent",
            "--oneline",
            "--decorate=short",
            newer.as_str(),
            older.as_str(),
            "--",
            package,
        ])?;

        let tags: BTreeSet<String> = self
            .tag_pattern
            .find_iter(&stdout)
            .map(|m| m.as_str().to_string())
            .collect();

        Ok(tags.into_iter().collect())
    }

    fn merge_commits(&self, window: &TagWindow, package: &str) -> Result<Vec<String>> {
        let exclusion = window.exclusion_ref();

        let stdout = self.run_log(&[
            "log",
            "--first-parent",
            "--pretty=format:%s (%as) <%an>",
            window.newer.name.as_str(),
            exclusion.as_str(),
            "--",
            package,
        ])?;

        Ok(stdout
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_pattern() {
        let config = GitConfig {
            tag_pattern: "(".to_string(),
            ..GitConfig::default()
        };
        assert!(GitCliLog::new(&config, ".").is_err());
    }

    #[test]
    fn test_new_accepts_default_config() {
        assert!(GitCliLog::new(&GitConfig::default(), ".").is_ok());
    }

    #[test]
    fn test_missing_binary_is_log_error() {
        let config = GitConfig {
            binary: "definitely-not-a-real-git".to_string(),
            ..GitConfig::default()
        };
        let log = GitCliLog::new(&config, ".").unwrap();
        let err = log
            .discover_tags("CMSSW_1_1_0", "CMSSW_1_0_0", "DataFormats/Common")
            .unwrap_err();
        assert!(err.to_string().contains("Log query failed"));
    }
}
