//! Classification of raw log lines against the merge-commit convention.

/// A log line matching the merge-commit convention, e.g.
/// `Merge pull request #28109 from davidlange6/rawlzma (2019-10-09) <cmsbuild>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCommit {
    pub pull_request: u64,
    pub branch: String,
    pub title: String,
}

/// One classified log line.
///
/// Lines that do not match the convention are passed through unchanged so no
/// input line is silently dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitLine {
    Merge(MergeCommit),
    Other(String),
}

/// Attempts the merge-commit pattern match on a raw log line.
///
/// The pattern is `... #<number> from <branch> (<title>) ...` with greedy
/// capture groups, so the last parenthesized group on the line wins.
pub fn classify(line: &str) -> CommitLine {
    if let Ok(re) = regex::Regex::new(r"#(?P<number>\d+) from (?P<branch>.*) \((?P<title>.*)\)") {
        if let Some(captures) = re.captures(line) {
            if let (Some(number), Some(branch), Some(title)) = (
                captures.name("number"),
                captures.name("branch"),
                captures.name("title"),
            ) {
                if let Ok(pull_request) = number.as_str().parse::<u64>() {
                    return CommitLine::Merge(MergeCommit {
                        pull_request,
                        branch: branch.as_str().to_string(),
                        title: title.as_str().to_string(),
                    });
                }
            }
        }
    }

    CommitLine::Other(line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_merge_commit() {
        let line = "Merge pull request #28109 from davidlange6/rawlzma (2019-10-09) <cmsbuild>";
        match classify(line) {
            CommitLine::Merge(m) => {
                assert_eq!(m.pull_request, 28109);
                assert_eq!(m.branch, "davidlange6/rawlzma");
                assert_eq!(m.title, "2019-10-09");
            }
            CommitLine::Other(_) => panic!("expected merge classification"),
        }
    }

    #[test]
    fn test_classify_passthrough() {
        let line = "Update RecoTracker thresholds";
        assert_eq!(classify(line), CommitLine::Other(line.to_string()));
    }

    #[test]
    fn test_classify_requires_number() {
        let line = "Merge pull request #abc from someone/branch (title)";
        assert!(matches!(classify(line), CommitLine::Other(_)));
    }

    #[test]
    fn test_classify_greedy_last_parens() {
        let line = "Merge pull request #7 from a/b (fix (really)) <bot>";
        match classify(line) {
            CommitLine::Merge(m) => {
                assert_eq!(m.pull_request, 7);
                // Greedy branch capture stops at the last " (" boundary.
                assert_eq!(m.branch, "a/b (fix");
                assert_eq!(m.title, "really)");
            }
            CommitLine::Other(_) => panic!("expected merge classification"),
        }
    }

    #[test]
    fn test_classify_empty_line() {
        assert_eq!(classify(""), CommitLine::Other(String::new()));
    }
}
