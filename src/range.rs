//! Resolution of an ordered tag sequence into commit-range windows.

use crate::tags::Tag;

/// One commit-range query window: commits reachable from `newer` but not
/// from `exclude`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagWindow {
    pub newer: Tag,
    pub exclude: Tag,
}

impl TagWindow {
    /// The exclusion reference in revision-range syntax (`^tag`).
    pub fn exclusion_ref(&self) -> String {
        format!("^{}", self.exclude.name)
    }
}

/// Pairs an ascending tag sequence with its shifted exclusion list.
///
/// Given tags `[t0, t1, ..., tn]` and `release_end`, produces windows
/// `(t0, ^release_end), (t1, ^t0), ..., (tn, ^tn-1)`. An empty input yields
/// an empty sequence; the package is untouched in the range, which is not an
/// error.
///
/// # Arguments
/// * `tags` - Ascending tag sequence from [crate::tags::normalize]
/// * `release_end` - The older release boundary
pub fn resolve(tags: &[Tag], release_end: &Tag) -> Vec<TagWindow> {
    let excludes = std::iter::once(release_end).chain(tags.iter());

    tags.iter()
        .zip(excludes)
        .map(|(newer, exclude)| TagWindow {
            newer: newer.clone(),
            exclude: exclude.clone(),
        })
        .collect()
}
