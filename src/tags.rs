//! Natural ordering of release-tag strings.
//!
//! Release tags look like `CMSSW_11_2_0` or `CMSSW_11_2_0_pre6`. Sorting them
//! lexically puts `pre10` before `pre2` and the stable tag before its own
//! pre-releases, so ordering works on a split key instead: the raw string is
//! broken into alternating non-digit/digit runs, digit runs compare as
//! integers, non-digit runs as strings. Stable tags get a `_stable0` sentinel
//! appended for key computation only, which lands them after every `_preN`
//! variant of the same numeric base (`"_pre" < "_stable"`).

use std::cmp::Ordering;
use std::collections::BTreeSet;

/// A release tag identified by its raw string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    /// Create a new tag from a string
    pub fn new(name: impl Into<String>) -> Self {
        Tag { name: name.into() }
    }

    /// Whether the tag carries a trailing `preN` group.
    ///
    /// Tags without one are treated as stable releases and receive the
    /// ordering sentinel.
    pub fn is_prerelease(&self) -> bool {
        if let Ok(re) = regex::Regex::new(r"pre[0-9]+$") {
            re.is_match(&self.name)
        } else {
            false
        }
    }

    /// Whether the tag string ends in a digit.
    ///
    /// Development-branch-style tags (e.g. `CMSSW_11_2_X`) do not, and get no
    /// external cross-reference link in the emitted graph.
    pub fn ends_in_digit(&self) -> bool {
        self.name
            .chars()
            .last()
            .map(|c| c.is_ascii_digit())
            .unwrap_or(false)
    }

    /// Ordering key for natural sorting.
    ///
    /// Stable tags are keyed as if they ended in `_stable0`; the sentinel is
    /// never part of the tag's identity used for lookups or links.
    pub fn sort_key(&self) -> SortKey {
        let keyed = if self.is_prerelease() {
            self.name.clone()
        } else {
            format!("{}_stable0", self.name)
        };
        SortKey::from_str(&keyed)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One run of a split tag string: either a digit run or a non-digit run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Num(u64),
    Text(String),
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Num(a), Segment::Num(b)) => a.cmp(b),
            (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
            // Mixed runs only appear for non-standard tag names; numbers
            // order before text so the comparison stays total.
            (Segment::Num(_), Segment::Text(_)) => Ordering::Less,
            (Segment::Text(_), Segment::Num(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The full split key of a tag, compared element-wise.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey(Vec<Segment>);

impl SortKey {
    fn from_str(s: &str) -> Self {
        let mut segments = Vec::new();
        let mut run = String::new();
        let mut run_is_digit = false;

        for c in s.chars() {
            let is_digit = c.is_ascii_digit();
            if !run.is_empty() && is_digit != run_is_digit {
                segments.push(Segment::from_run(&run, run_is_digit));
                run.clear();
            }
            run_is_digit = is_digit;
            run.push(c);
        }
        if !run.is_empty() {
            segments.push(Segment::from_run(&run, run_is_digit));
        }

        SortKey(segments)
    }
}

impl Segment {
    fn from_run(run: &str, is_digit: bool) -> Self {
        if is_digit {
            // Digit runs longer than a u64 fall back to string comparison.
            match run.parse::<u64>() {
                Ok(n) => Segment::Num(n),
                Err(_) => Segment::Text(run.to_string()),
            }
        } else {
            Segment::Text(run.to_string())
        }
    }
}

/// Normalizes a set of raw tag strings into a strictly ascending sequence.
///
/// Deduplicates, trims surrounding whitespace, and sorts by the natural key.
///
/// # Arguments
/// * `raw_tags` - Unordered candidate tag strings
///
/// # Returns
/// Ascending, duplicate-free sequence of tags
pub fn normalize<I, S>(raw_tags: I) -> Vec<Tag>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let unique: BTreeSet<String> = raw_tags
        .into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    let mut tags: Vec<Tag> = unique.into_iter().map(Tag::new).collect();
    tags.sort_by_key(|t| t.sort_key());
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(tags: &[Tag]) -> Vec<&str> {
        tags.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_stable_sorts_after_prereleases() {
        let tags = normalize(["CMSSW_1_0_0", "CMSSW_1_0_0_pre2", "CMSSW_1_0_0_pre1"]);
        assert_eq!(
            names(&tags),
            vec!["CMSSW_1_0_0_pre1", "CMSSW_1_0_0_pre2", "CMSSW_1_0_0"]
        );
    }

    #[test]
    fn test_prerelease_numbers_sort_numerically() {
        let tags = normalize(["CMSSW_11_2_0_pre10", "CMSSW_11_2_0_pre2", "CMSSW_11_2_0_pre6"]);
        assert_eq!(
            names(&tags),
            vec![
                "CMSSW_11_2_0_pre2",
                "CMSSW_11_2_0_pre6",
                "CMSSW_11_2_0_pre10"
            ]
        );
    }

    #[test]
    fn test_numeric_components_sort_numerically() {
        let tags = normalize(["CMSSW_10_0_0", "CMSSW_9_4_0", "CMSSW_10_2_0"]);
        assert_eq!(
            names(&tags),
            vec!["CMSSW_9_4_0", "CMSSW_10_0_0", "CMSSW_10_2_0"]
        );
    }

    #[test]
    fn test_duplicates_removed() {
        let tags = normalize(["CMSSW_1_0_0", "CMSSW_1_0_0", " CMSSW_1_0_0 "]);
        assert_eq!(names(&tags), vec!["CMSSW_1_0_0"]);
    }

    #[test]
    fn test_empty_and_blank_entries_dropped() {
        let tags = normalize(["", "  ", "CMSSW_1_0_0"]);
        assert_eq!(names(&tags), vec!["CMSSW_1_0_0"]);
    }

    #[test]
    fn test_non_standard_tags_order_consistently() {
        // Non-standard names still get a defined (string-based) order.
        let first = normalize(["weird-tag", "CMSSW_1_0_0", "another"]);
        let second = normalize(["another", "weird-tag", "CMSSW_1_0_0"]);
        assert_eq!(names(&first), names(&second));
    }

    #[test]
    fn test_is_prerelease() {
        assert!(Tag::new("CMSSW_1_0_0_pre1").is_prerelease());
        assert!(!Tag::new("CMSSW_1_0_0").is_prerelease());
        assert!(!Tag::new("CMSSW_11_2_X").is_prerelease());
    }

    #[test]
    fn test_ends_in_digit() {
        assert!(Tag::new("CMSSW_1_0_0").ends_in_digit());
        assert!(Tag::new("CMSSW_1_0_0_pre2").ends_in_digit());
        assert!(!Tag::new("CMSSW_11_2_X").ends_in_digit());
        assert!(!Tag::new("").ends_in_digit());
    }

    #[test]
    fn test_sentinel_not_part_of_identity() {
        let tags = normalize(["CMSSW_1_0_0"]);
        assert_eq!(tags[0].name, "CMSSW_1_0_0");
    }

    #[test]
    fn test_sort_key_is_deterministic() {
        let tag = Tag::new("CMSSW_1_0_0_pre3");
        assert_eq!(tag.sort_key(), tag.sort_key());
    }
}
