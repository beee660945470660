use std::collections::BTreeMap;

use serde_json::json;

use super::controls::{ControlLayout, ControlType};
use super::experiment::{EngineError, ExperimentResultSet};
use super::labels::{ClassificationLabel, LabelCounts, percentage};
use super::trend::TrendRecord;
use super::well::{Anomalies, Channel, WellCoordinate, WellKey, WellObservation};

fn coord(raw: &str) -> WellCoordinate {
    WellCoordinate::parse(raw).unwrap()
}

fn obs(raw: &str, channel: Channel) -> WellObservation {
    WellObservation::new(coord(raw), channel)
}

#[test]
fn test_well_coordinate_parsing() {
    assert_eq!(coord("A01"), coord("A1"));
    assert_eq!(coord("p24").to_string(), "P24");
    assert_eq!(coord(" B7 ").to_string(), "B7");
    assert!(WellCoordinate::parse("Q1").is_none());
    assert!(WellCoordinate::parse("A0").is_none());
    assert!(WellCoordinate::parse("A25").is_none());
    assert!(WellCoordinate::parse("A001").is_none());
    assert!(WellCoordinate::parse("").is_none());
}

#[test]
fn test_well_coordinate_row_major_order() {
    let mut wells = vec![coord("B1"), coord("A10"), coord("A2"), coord("A1")];
    wells.sort();
    let rendered: Vec<String> = wells.iter().map(|w| w.to_string()).collect();
    assert_eq!(rendered, vec!["A1", "A2", "A10", "B1"]);
}

#[test]
fn test_channel_parsing_and_order() {
    assert_eq!(Channel::parse("cy5"), Some(Channel::Cy5));
    assert_eq!(Channel::parse("Cy5.5"), Some(Channel::Cy55));
    assert_eq!(Channel::parse("texas_red"), Some(Channel::TexasRed));
    assert_eq!(Channel::parse("TexasRed"), Some(Channel::TexasRed));
    assert_eq!(Channel::parse("fam"), Some(Channel::Fam));
    assert_eq!(Channel::parse("ROX"), None);
    assert_eq!(Channel::parse("Unknown"), None);

    let mut all = vec![Channel::TexasRed, Channel::Hex, Channel::Cy5, Channel::Fam];
    all.sort();
    assert_eq!(
        all,
        vec![Channel::Cy5, Channel::Fam, Channel::Hex, Channel::TexasRed]
    );
}

#[test]
fn test_well_key_round_trip_text() {
    let key = WellKey::parse("A01_Cy5").unwrap();
    assert_eq!(key.to_string(), "A1_Cy5");
    assert_eq!(key.channel, Channel::Cy5);
    assert!(WellKey::parse("A1").is_none());
    assert_eq!(
        serde_json::to_value(WellKey::new(coord("H12"), Channel::TexasRed)).unwrap(),
        json!("H12_Texas Red")
    );
}

#[test]
fn test_anomalies_normalization() {
    assert!(!Anomalies::from(json!(null)).has_anomalies());
    assert!(!Anomalies::from(json!([])).has_anomalies());
    assert!(!Anomalies::from(json!(["None"])).has_anomalies());
    assert!(!Anomalies::from(json!("None")).has_anomalies());
    assert!(!Anomalies::from(json!("")).has_anomalies());
    assert!(!Anomalies::from(json!("[\"None\"]")).has_anomalies());
    assert!(Anomalies::from(json!(["low_plateau"])).has_anomalies());
    assert!(Anomalies::from(json!("[\"unstable_baseline\"]")).has_anomalies());
    assert!(Anomalies::from(json!(["None", "low_plateau"])).has_anomalies());
}

#[test]
fn test_anomalies_malformed_counts_as_present() {
    let bad = Anomalies::from(json!("not json"));
    assert!(bad.is_malformed());
    assert!(bad.has_anomalies());
    assert!(Anomalies::from(json!([1, 2])).is_malformed());
    assert!(Anomalies::from(json!({"a": 1})).is_malformed());
    // Lowercase marker is not the no-anomaly marker.
    assert!(Anomalies::from(json!("none")).has_anomalies());
}

#[test]
fn test_anomalies_comma_text_is_malformed() {
    let comma = Anomalies::from(json!("low_plateau, unstable_baseline"));
    assert!(comma.is_malformed());
    assert!(comma.has_anomalies());
    assert_eq!(
        comma.describe(),
        "malformed(low_plateau, unstable_baseline)"
    );
    // Even a comma list of only the marker is not the marker.
    assert!(Anomalies::from(json!("None, None")).has_anomalies());
}

#[test]
fn test_effective_amplitude() {
    let base = obs("A1", Channel::Fam);
    assert_eq!(base.effective_amplitude(), 0.0);
    assert_eq!(base.clone().with_amplitude(f64::NAN).effective_amplitude(), 0.0);
    assert_eq!(base.with_amplitude(812.5).effective_amplitude(), 812.5);
}

#[test]
fn test_label_counts() {
    let counts = LabelCounts::from_labels([
        ClassificationLabel::Positive,
        ClassificationLabel::Negative,
        ClassificationLabel::Negative,
        ClassificationLabel::Indeterminate,
    ]);
    assert_eq!(counts.total, 4);
    assert_eq!(counts.positive, 1);
    assert_eq!(counts.negative, 2);
    assert_eq!(counts.indeterminate, 1);
    assert_eq!(counts.positive_percentage(), 25.0);
    assert_eq!(percentage(3, 0), 0.0);
}

#[test]
fn test_control_expected_labels() {
    assert_eq!(
        ControlType::NoTemplate.expected_label(),
        ClassificationLabel::Negative
    );
    for kind in [ControlType::High, ControlType::Medium, ControlType::Low] {
        assert_eq!(kind.expected_label(), ClassificationLabel::Positive);
    }
}

#[test]
fn test_default_control_layout() {
    let layout = ControlLayout::default_v1();
    assert_eq!(layout.len(), 16);
    assert_eq!(layout.lookup(coord("G10")), Some((ControlType::High, 1)));
    assert_eq!(layout.lookup(coord("G13")), Some((ControlType::NoTemplate, 1)));
    assert_eq!(layout.lookup(coord("K21")), Some((ControlType::Low, 2)));
    assert_eq!(layout.lookup(coord("A16")), Some((ControlType::Medium, 3)));
    assert_eq!(layout.lookup(coord("M8")), Some((ControlType::NoTemplate, 4)));
    assert_eq!(layout.lookup(coord("A1")), None);
    assert!(ControlLayout::empty().lookup(coord("G10")).is_none());
}

#[test]
fn test_experiment_invariants() {
    let pattern = "AcBVAB_2578825_CFX367393";

    assert_eq!(
        ExperimentResultSet::new(pattern, BTreeMap::new()).unwrap_err(),
        EngineError::NoChannels {
            pattern: pattern.to_string()
        }
    );

    let mut empty = BTreeMap::new();
    empty.insert(Channel::Hex, BTreeMap::new());
    assert!(matches!(
        ExperimentResultSet::new(pattern, empty),
        Err(EngineError::EmptyChannel { channel: Channel::Hex, .. })
    ));

    let mut misfiled = BTreeMap::new();
    misfiled.insert(coord("A1"), obs("A1", Channel::Fam));
    assert!(matches!(
        ExperimentResultSet::single_channel(pattern, Channel::Hex, misfiled),
        Err(EngineError::ChannelMismatch { .. })
    ));

    let mut wells = BTreeMap::new();
    wells.insert(coord("A1"), obs("A1", Channel::Hex));
    let exp = ExperimentResultSet::single_channel(pattern, Channel::Hex, wells).unwrap();
    assert_eq!(exp.test_code(), "BVAB");
    assert_eq!(exp.channel_count(), 1);
    assert!(!exp.is_multi_channel());
}

#[test]
fn test_experiment_merge() {
    let pattern = "AcBVAB_2578825_CFX367393";
    let mut hex = BTreeMap::new();
    hex.insert(coord("A1"), obs("A1", Channel::Hex).with_amplitude(100.0));
    let mut fam = BTreeMap::new();
    fam.insert(coord("A1"), obs("A1", Channel::Fam));
    let mut hex_again = BTreeMap::new();
    hex_again.insert(coord("A1"), obs("A1", Channel::Hex).with_amplitude(900.0));

    let merged = ExperimentResultSet::single_channel(pattern, Channel::Hex, hex)
        .unwrap()
        .merge(ExperimentResultSet::single_channel(pattern, Channel::Fam, fam).unwrap())
        .unwrap()
        .merge(ExperimentResultSet::single_channel(pattern, Channel::Hex, hex_again).unwrap())
        .unwrap();
    assert_eq!(merged.channel_count(), 2);
    assert_eq!(merged.observation_count(), 2);
    assert_eq!(
        merged.wells(Channel::Hex).unwrap()[&coord("A1")].amplitude,
        Some(900.0)
    );

    let mut other = BTreeMap::new();
    other.insert(coord("A1"), obs("A1", Channel::Cy5));
    let foreign =
        ExperimentResultSet::single_channel("AcBVAB_1_CFX2", Channel::Cy5, other).unwrap();
    assert!(matches!(
        merged.merge(foreign),
        Err(EngineError::MixedPatterns { .. })
    ));
}

#[test]
fn test_trend_record_json_shape() {
    let record = TrendRecord {
        test_code: "BVAB".to_string(),
        experiment_pattern: "AcBVAB_2578825_CFX367393".to_string(),
        channel: Channel::Hex,
        target: "BVAB2".to_string(),
        counts: LabelCounts {
            total: 4,
            positive: 1,
            negative: 3,
            indeterminate: 0,
        },
        positive_percentage: 25.0,
        source_timestamp: None,
    };
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["channel"], json!("HEX"));
    assert_eq!(value["positive"], json!(1));
    assert_eq!(value["total"], json!(4));
    let back: TrendRecord = serde_json::from_value(value).unwrap();
    assert_eq!(back, record);
}
