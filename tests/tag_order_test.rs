// tests/tag_order_test.rs
use history_graph::range;
use history_graph::tags::{normalize, Tag};

#[test]
fn test_prereleases_before_stable_for_shared_base() {
    let tags = normalize([
        "CMSSW_1_0_0",
        "CMSSW_1_0_0_pre2",
        "CMSSW_1_0_0_pre1",
        "CMSSW_1_0_0_pre10",
    ]);
    let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "CMSSW_1_0_0_pre1",
            "CMSSW_1_0_0_pre2",
            "CMSSW_1_0_0_pre10",
            "CMSSW_1_0_0"
        ]
    );
}

#[test]
fn test_ordering_across_numeric_bases() {
    let tags = normalize([
        "CMSSW_10_6_0",
        "CMSSW_9_4_0_pre3",
        "CMSSW_10_6_0_pre4",
        "CMSSW_9_4_0",
    ]);
    let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "CMSSW_9_4_0_pre3",
            "CMSSW_9_4_0",
            "CMSSW_10_6_0_pre4",
            "CMSSW_10_6_0"
        ]
    );
}

#[test]
fn test_end_to_end_window_scenario() {
    // Input {pre1, pre2, stable} with releaseEnd = stable yields
    // [pre1, pre2, stable] and windows
    // [(pre1, ^end), (pre2, ^pre1), (stable, ^pre2)].
    let tags = normalize(["CMSSW_1_0_0_pre1", "CMSSW_1_0_0_pre2", "CMSSW_1_0_0"]);
    let release_end = Tag::new("CMSSW_1_0_0");
    let windows = range::resolve(&tags, &release_end);

    let pairs: Vec<(&str, String)> = windows
        .iter()
        .map(|w| (w.newer.name.as_str(), w.exclusion_ref()))
        .collect();

    assert_eq!(
        pairs,
        vec![
            ("CMSSW_1_0_0_pre1", "^CMSSW_1_0_0".to_string()),
            ("CMSSW_1_0_0_pre2", "^CMSSW_1_0_0_pre1".to_string()),
            ("CMSSW_1_0_0", "^CMSSW_1_0_0_pre2".to_string()),
        ]
    );
}

#[test]
fn test_resolution_idempotent_over_repeated_calls() {
    let tags = normalize(["CMSSW_2_0_0_pre1", "CMSSW_2_0_0_pre2", "CMSSW_2_0_0"]);
    let release_end = Tag::new("CMSSW_1_0_0");

    let first = range::resolve(&tags, &release_end);
    let second = range::resolve(&tags, &release_end);
    assert_eq!(first, second);
}

#[test]
fn test_normalize_input_order_irrelevant() {
    let forward = normalize(["CMSSW_1_0_0_pre1", "CMSSW_1_0_0_pre2", "CMSSW_1_0_0"]);
    let reversed = normalize(["CMSSW_1_0_0", "CMSSW_1_0_0_pre2", "CMSSW_1_0_0_pre1"]);
    assert_eq!(forward, reversed);
}
