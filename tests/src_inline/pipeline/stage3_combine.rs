use std::collections::BTreeMap;

use super::*;
use crate::model::controls::ControlLayout;
use crate::model::experiment::{ChannelWells, ExperimentResultSet};
use crate::model::labels::ClassificationLabel;
use crate::model::well::{Channel, WellCoordinate, WellKey, WellObservation};
use crate::pipeline::AnalysisContext;
use crate::targets::TargetLibrary;

const PATTERN: &str = "AcBVAB_2578825_CFX367393";

/// A full 384-well plate where every `positive_every`th well is positive.
fn plate(channel: Channel, positive_every: usize) -> ChannelWells {
    let mut wells = BTreeMap::new();
    let mut i = 0usize;
    for row in 0..16u8 {
        for col in 1..=24u8 {
            let coord = WellCoordinate::new(row, col).unwrap();
            let amp = if i % positive_every == 0 { 900.0 } else { 50.0 };
            wells.insert(
                coord,
                WellObservation::new(coord, channel)
                    .with_sample(format!("S{i}"))
                    .with_amplitude(amp),
            );
            i += 1;
        }
    }
    wells
}

fn experiment(channels: &[(Channel, usize)]) -> ExperimentResultSet {
    let map = channels
        .iter()
        .map(|&(c, every)| (c, plate(c, every)))
        .collect();
    ExperimentResultSet::new(PATTERN, map).unwrap()
}

#[test]
fn test_two_full_plates_combine_to_768_entries() {
    let library = TargetLibrary::builtin();
    let layout = ControlLayout::empty();
    let ctx = AnalysisContext::new(&library, &layout);

    let combined = combine(&experiment(&[(Channel::Hex, 4), (Channel::Fam, 2)]), &ctx);
    assert_eq!(combined.total_wells, 768);
    assert_eq!(combined.wells.len(), 768);
    assert_eq!(combined.channel_count, 2);
    assert!(combined.is_multi_channel);
    assert_eq!(combined.positive_count, 96 + 192);
    assert!((combined.success_rate - 288.0 / 768.0 * 100.0).abs() < 1e-9);
    assert_eq!(combined.channels, vec![Channel::Fam, Channel::Hex]);
    assert_eq!(
        combined.display_name,
        "Multi-Fluorophore Analysis (FAM, HEX) AcBVAB_2578825_CFX367393"
    );

    let a1_hex = &combined.wells[&WellKey::parse("A1_HEX").unwrap()];
    assert_eq!(a1_hex.label, ClassificationLabel::Positive);
    assert_eq!(a1_hex.target, "BVAB1");

    assert!(!combined.is_complete());
    assert_eq!(combined.completeness.missing_channels, vec![Channel::Cy5]);
}

#[test]
fn test_channel_order_does_not_change_content() {
    let library = TargetLibrary::builtin();
    let layout = ControlLayout::empty();
    let ctx = AnalysisContext::new(&library, &layout);

    let hex_first = ExperimentResultSet::single_channel(PATTERN, Channel::Hex, plate(Channel::Hex, 3))
        .unwrap()
        .merge(
            ExperimentResultSet::single_channel(PATTERN, Channel::Cy5, plate(Channel::Cy5, 5))
                .unwrap(),
        )
        .unwrap();
    let cy5_first = ExperimentResultSet::single_channel(PATTERN, Channel::Cy5, plate(Channel::Cy5, 5))
        .unwrap()
        .merge(
            ExperimentResultSet::single_channel(PATTERN, Channel::Hex, plate(Channel::Hex, 3))
                .unwrap(),
        )
        .unwrap();
    assert_eq!(combine(&hex_first, &ctx), combine(&cy5_first, &ctx));
}

#[test]
fn test_complete_bvab_and_serialized_keys() {
    let library = TargetLibrary::builtin();
    let layout = ControlLayout::empty();
    let ctx = AnalysisContext::new(&library, &layout);

    let combined = combine(
        &experiment(&[(Channel::Hex, 4), (Channel::Fam, 4), (Channel::Cy5, 4)]),
        &ctx,
    );
    assert!(combined.is_complete());
    assert_eq!(combined.completeness.completion_rate, 100.0);
    assert_eq!(combined.pathogen_breakdown.len(), 3);
    assert_eq!(combined.pathogen_breakdown[0].display_line(), "BVAB3: 25.0%");

    let value = serde_json::to_value(&combined).unwrap();
    assert_eq!(value["wells"]["A1_Cy5"]["label"], "POSITIVE");
    assert_eq!(value["wells"]["A1_Cy5"]["well_coordinate"], "A1");
    assert_eq!(value["channel_counts"]["HEX"]["total"], 384);
}

#[test]
fn test_single_channel_result() {
    let library = TargetLibrary::builtin();
    let layout = ControlLayout::empty();
    let ctx = AnalysisContext::new(&library, &layout);

    let combined = combine(&experiment(&[(Channel::Hex, 1)]), &ctx);
    assert_eq!(combined.channel_count, 1);
    assert!(!combined.is_multi_channel);
    assert_eq!(combined.display_name, PATTERN);
    assert_eq!(combined.success_rate, 100.0);
}
