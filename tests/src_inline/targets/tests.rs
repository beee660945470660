use std::collections::{BTreeMap, BTreeSet};

use super::loader::{LibraryError, library_from_json};
use super::*;
use crate::model::labels::LabelCounts;
use crate::model::well::Channel;

fn channels(list: &[Channel]) -> BTreeSet<Channel> {
    list.iter().copied().collect()
}

#[test]
fn test_builtin_library_lookups() {
    let library = TargetLibrary::builtin();
    assert!(library.len() >= 70);
    assert_eq!(library.target_for("BVAB", Channel::Hex), "BVAB1");
    assert_eq!(library.target_for("BVAB", Channel::Fam), "BVAB2");
    assert_eq!(library.target_for("BVAB", Channel::Cy5), "BVAB3");
    assert_eq!(library.target_for("BVAB", Channel::TexasRed), UNKNOWN_TARGET);
    assert_eq!(library.target_for("NOPE", Channel::Hex), UNKNOWN_TARGET);
}

#[test]
fn test_later_duplicate_definition_wins() {
    let library = TargetLibrary::builtin();
    assert_eq!(library.target_for("Mgen", Channel::Fam), "Mycoplasma genitalium");
}

#[test]
fn test_required_channels_skip_placeholder() {
    let library = TargetLibrary::builtin();
    assert_eq!(
        library.required_channels("BVAB"),
        channels(&[Channel::Cy5, Channel::Fam, Channel::Hex])
    );
    assert!(library.required_channels("NOPE").is_empty());
    assert!(library.contains_test("HPVNGS1"));
    assert!(library.required_channels("HPVNGS1").is_empty());
}

#[test]
fn test_bvab_completeness() {
    let library = TargetLibrary::builtin();

    let full = validate_completeness(
        &library,
        "BVAB",
        &channels(&[Channel::Hex, Channel::Fam, Channel::Cy5]),
    );
    assert!(full.is_complete);
    assert_eq!(full.completion_rate, 100.0);
    assert!(full.missing_channels.is_empty());

    let hex_only = validate_completeness(&library, "BVAB", &channels(&[Channel::Hex]));
    assert!(!hex_only.is_complete);
    assert_eq!(hex_only.missing_channels, vec![Channel::Cy5, Channel::Fam]);
    assert!((hex_only.completion_rate - 100.0 / 3.0).abs() < 1e-9);
    assert_eq!(hex_only.available_channels, vec![Channel::Hex]);
}

#[test]
fn test_completeness_without_requirements() {
    let library = TargetLibrary::builtin();
    let report = validate_completeness(&library, "NOPE", &BTreeSet::new());
    assert!(report.is_complete);
    assert_eq!(report.completion_rate, 100.0);
}

#[test]
fn test_pathogen_breakdown_lines() {
    let library = TargetLibrary::builtin();
    let mut counts = BTreeMap::new();
    counts.insert(
        Channel::Hex,
        LabelCounts {
            total: 4,
            positive: 1,
            negative: 3,
            indeterminate: 0,
        },
    );
    counts.insert(Channel::TexasRed, LabelCounts::default());

    let lines: Vec<String> = pathogen_breakdown(&library, "BVAB", &counts)
        .iter()
        .map(|b| b.display_line())
        .collect();
    assert_eq!(lines, vec!["BVAB1: 25.0%", "Texas Red: 0.0%"]);
}

#[test]
fn test_library_from_json() {
    let text = r#"{
        "Demo": {"HEX": "Target A", "fam": "Target B"},
        "Single": {"Unknown": "Only target"}
    }"#;
    let library = library_from_json(text).unwrap();
    assert_eq!(library.len(), 2);
    assert_eq!(library.target_for("Demo", Channel::Fam), "Target B");
    assert_eq!(
        library.required_channels("Demo"),
        channels(&[Channel::Fam, Channel::Hex])
    );
    assert!(library.required_channels("Single").is_empty());
}

#[test]
fn test_library_rejects_unknown_channel() {
    let err = library_from_json(r#"{"Demo": {"ROX": "x"}}"#).unwrap_err();
    assert!(matches!(err, LibraryError::UnknownChannel { .. }));
    assert!(matches!(
        library_from_json("[1, 2]").unwrap_err(),
        LibraryError::Json { .. }
    ));
}
