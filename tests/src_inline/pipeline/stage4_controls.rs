use std::collections::BTreeMap;

use super::*;
use crate::model::experiment::ExperimentResultSet;
use crate::model::well::WellObservation;
use crate::pipeline::AnalysisContext;
use crate::pipeline::stage3_combine::combine;
use crate::targets::TargetLibrary;

fn coord(raw: &str) -> WellCoordinate {
    WellCoordinate::parse(raw).unwrap()
}

fn combined_for(
    wells: &[(&str, &str, f64)],
    layout: &ControlLayout,
) -> CombinedExperimentResult {
    let library = TargetLibrary::builtin();
    let ctx = AnalysisContext::new(&library, layout);
    let map: BTreeMap<_, _> = wells
        .iter()
        .map(|&(c, sample, amp)| {
            let obs = WellObservation::new(coord(c), Channel::Hex)
                .with_sample(sample)
                .with_amplitude(amp);
            (coord(c), obs)
        })
        .collect();
    let exp = ExperimentResultSet::single_channel("AcMgen_2576640_CFX366953", Channel::Hex, map)
        .unwrap();
    combine(&exp, &ctx)
}

#[test]
fn test_control_type_detection() {
    assert_eq!(detect_control_type("NTC-1"), Some(ControlType::NoTemplate));
    assert_eq!(detect_control_type("AcMgen-NTC"), Some(ControlType::NoTemplate));
    assert_eq!(detect_control_type("H-1"), Some(ControlType::High));
    assert_eq!(detect_control_type("Ctrl M2"), Some(ControlType::Medium));
    assert_eq!(detect_control_type("L"), Some(ControlType::Low));
    assert_eq!(
        detect_control_type("AcMgen361652D06H-2576640"),
        Some(ControlType::High)
    );
    // Embedded coordinate ahead of the real marker.
    assert_eq!(
        detect_control_type("AcMgen361652H05L-2576640"),
        Some(ControlType::Low)
    );
    assert_eq!(detect_control_type("Patient Hannah"), None);
    assert_eq!(detect_control_type("HPV sample"), None);
    assert_eq!(detect_control_type(""), None);
}

#[test]
fn test_embedded_coordinate_is_not_a_marker() {
    assert_eq!(detect_control_type("AcBVAB362273H05-2578825"), None);
    assert_eq!(detect_control_type("AcBVAB362273M12-2578825"), None);
    assert_eq!(detect_control_type("AcBVAB362273L03-2578825"), None);
    assert_eq!(detect_control_type("AcBVAB362273A05-2578825"), None);
    assert_eq!(
        detect_control_type("AcBVAB362273G23NTC-2578825"),
        Some(ControlType::NoTemplate)
    );

    let layout = ControlLayout::empty();
    let combined = combined_for(&[("H5", "AcBVAB362273H05-2578825", 20.0)], &layout);
    let report = run_stage4(&combined, &layout);
    assert!(report.results.is_empty());
    assert!(report.all_passed());
}

#[test]
fn test_structured_names_take_set_from_layout() {
    let layout = ControlLayout::default_v1();
    let combined = combined_for(
        &[
            ("G10", "AcBVAB362273G10H-2578825", 900.0),
            ("K19", "AcBVAB362273K19H-2578825", 900.0),
            ("A15", "AcBVAB362273A15H-2578825", 900.0),
            ("M5", "AcBVAB362273M05H-2578825", 900.0),
        ],
        &layout,
    );
    let report = run_stage4(&combined, &layout);
    let sets: Vec<u32> = report
        .summary
        .iter()
        .filter(|row| row.control_type == ControlType::High)
        .map(|row| row.set_number)
        .collect();
    assert_eq!(sets, vec![1, 2, 3, 4]);
    assert!(report.all_passed());

    // Off-layout positions fall back to set 1, never the run id.
    let assignment =
        detect_control(coord("B2"), "AcBVAB362273B02NTC-2578825", &layout).unwrap();
    assert_eq!(assignment.control_type, ControlType::NoTemplate);
    assert_eq!(assignment.set_number, 1);
    assert_eq!(assignment.source, ControlSource::SampleName);

    // Embedded coordinate wins over the well's own position.
    let assignment =
        detect_control(coord("B2"), "AcBVAB362273K21L-2578825", &layout).unwrap();
    assert_eq!(assignment.control_type, ControlType::Low);
    assert_eq!(assignment.set_number, 2);
}

#[test]
fn test_set_number_extraction() {
    assert_eq!(extract_set_number("NTC-3"), 3);
    assert_eq!(extract_set_number("H2"), 2);
    assert_eq!(extract_set_number("M"), 1);
    assert_eq!(extract_set_number("H-99999999999999"), 1);
}

#[test]
fn test_ntc_round_trip() {
    let layout = ControlLayout::empty();

    let clean = combined_for(&[("B2", "NTC-1", 100.0)], &layout);
    let report = run_stage4(&clean, &layout);
    assert_eq!(report.results.len(), 1);
    assert!(report.results[0].is_valid);
    assert!(report.issues.is_empty());
    assert!(report.all_passed());

    let contaminated = combined_for(&[("B2", "NTC-1", 600.0)], &layout);
    let report = run_stage4(&contaminated, &layout);
    assert_eq!(report.issues.len(), 1);
    let issue = &report.issues[0];
    assert_eq!(issue.expected, ClassificationLabel::Negative);
    assert_eq!(issue.actual, ClassificationLabel::Positive);
    assert_eq!(issue.control_type, ControlType::NoTemplate);
    assert_eq!(issue.set_number, 1);
    assert_eq!(issue.amplitude, 600.0);
    assert_eq!(issue.channel, Channel::Hex);
    assert_eq!(issue.well_coordinate, coord("B2"));
}

#[test]
fn test_name_detection_beats_layout() {
    let layout = ControlLayout::default_v1();
    // G10 is a HIGH position in the layout, but the sample says NTC.
    let combined = combined_for(
        &[
            ("G10", "NTC-2", 50.0),
            ("G11", "Patient", 800.0),
            ("A1", "Patient", 800.0),
        ],
        &layout,
    );
    let report = run_stage4(&combined, &layout);
    assert_eq!(report.results.len(), 2);

    let g10 = report.results.iter().find(|r| r.well_coordinate == coord("G10")).unwrap();
    assert_eq!(g10.control_type, ControlType::NoTemplate);
    assert_eq!(g10.set_number, 2);
    assert_eq!(g10.source, ControlSource::SampleName);

    let g11 = report.results.iter().find(|r| r.well_coordinate == coord("G11")).unwrap();
    assert_eq!(g11.control_type, ControlType::Medium);
    assert_eq!(g11.set_number, 1);
    assert_eq!(g11.source, ControlSource::PlateCoordinate);
    assert!(g11.is_valid);

    assert!(report.control_for(WellKey::new(coord("A1"), Channel::Hex)).is_none());
}

#[test]
fn test_control_summary_groups() {
    let layout = ControlLayout::empty();
    let combined = combined_for(
        &[
            ("A1", "H-1", 900.0),
            ("A2", "H-1", 100.0),
            ("A3", "NTC-1", 10.0),
        ],
        &layout,
    );
    let report = run_stage4(&combined, &layout);
    assert_eq!(report.summary.len(), 2);

    let high = report
        .summary
        .iter()
        .find(|r| r.control_type == ControlType::High)
        .unwrap();
    assert_eq!((high.passed, high.failed, high.all_passed), (1, 1, false));

    let ntc = report
        .summary
        .iter()
        .find(|r| r.control_type == ControlType::NoTemplate)
        .unwrap();
    assert!(ntc.all_passed);
    assert!(report.results[0].message.starts_with("H valid: POSITIVE"));
}
