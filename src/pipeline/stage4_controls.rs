use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::model::controls::{ControlLayout, ControlSource, ControlType};
use crate::model::labels::ClassificationLabel;
use crate::model::well::{Channel, WellCoordinate, WellKey};
use crate::pipeline::stage3_combine::{CombinedExperimentResult, CombinedWell};

const NTC_MARKER: &str = "NTC";

// Instrument sample names end in <row><col><H|M|L|NTC>-<run>, e.g. AcMgen361652D06H-2576640.
static STRUCTURED_CONTROL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-P]\d{1,2})(NTC|[HML])-\d+$").expect("structured control regex")
});

// A digit before the letter is a plate coordinate (`362273H05-`), not a marker.
static TOKEN_HIGH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9])H(?:$|[^A-Za-z])").expect("high token regex")
});
static TOKEN_MEDIUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9])M(?:$|[^A-Za-z])").expect("medium token regex")
});
static TOKEN_LOW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9])L(?:$|[^A-Za-z])").expect("low token regex")
});

static DASH_SET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-(\d+)$").expect("dash set regex"));
static TRAILING_SET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)$").expect("trailing set regex"));

/// A well recognised as a control, and how it was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlAssignment {
    pub well_coordinate: WellCoordinate,
    pub control_type: ControlType,
    pub set_number: u32,
    pub source: ControlSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlResult {
    pub well_coordinate: WellCoordinate,
    pub channel: Channel,
    pub sample_name: String,
    pub control_type: ControlType,
    pub set_number: u32,
    pub source: ControlSource,
    pub expected: ClassificationLabel,
    pub actual: ClassificationLabel,
    pub is_valid: bool,
    pub amplitude: f64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlValidationIssue {
    pub well_coordinate: WellCoordinate,
    pub sample_name: String,
    pub control_type: ControlType,
    pub set_number: u32,
    pub expected: ClassificationLabel,
    pub actual: ClassificationLabel,
    pub amplitude: f64,
    pub channel: Channel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlSummaryRow {
    pub channel: Channel,
    pub control_type: ControlType,
    pub set_number: u32,
    pub passed: usize,
    pub failed: usize,
    pub all_passed: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ControlReport {
    pub results: Vec<ControlResult>,
    pub issues: Vec<ControlValidationIssue>,
    pub summary: Vec<ControlSummaryRow>,
}

impl ControlReport {
    pub fn all_passed(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn control_for(&self, key: WellKey) -> Option<&ControlResult> {
        self.results
            .iter()
            .find(|r| r.well_coordinate == key.well_coordinate && r.channel == key.channel)
    }
}

pub fn detect_control_type(sample_name: &str) -> Option<ControlType> {
    if sample_name.contains(NTC_MARKER) {
        return Some(ControlType::NoTemplate);
    }
    if let Some(marker) = STRUCTURED_CONTROL
        .captures(sample_name)
        .and_then(|caps| caps.get(2))
    {
        return match marker.as_str() {
            "NTC" => Some(ControlType::NoTemplate),
            "H" => Some(ControlType::High),
            "M" => Some(ControlType::Medium),
            _ => Some(ControlType::Low),
        };
    }
    [
        (&*TOKEN_HIGH, ControlType::High),
        (&*TOKEN_MEDIUM, ControlType::Medium),
        (&*TOKEN_LOW, ControlType::Low),
    ]
    .into_iter()
    .find(|(re, _)| re.is_match(sample_name))
    .map(|(_, kind)| kind)
}

/// `Some` for the structured instrument form, holding the coordinate embedded
/// ahead of the marker when it parses.
fn structured_position(sample_name: &str) -> Option<Option<WellCoordinate>> {
    STRUCTURED_CONTROL
        .captures(sample_name)
        .map(|caps| caps.get(1).and_then(|m| WellCoordinate::parse(m.as_str())))
}

/// `-<digits>` at the end, else trailing digits, else set 1.
pub fn extract_set_number(sample_name: &str) -> u32 {
    [&*DASH_SET, &*TRAILING_SET]
        .into_iter()
        .find_map(|re| {
            re.captures(sample_name)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<u32>().ok())
        })
        .unwrap_or(1)
}

/// Sample-name detection first; the plate layout only for wells whose name
/// carries no control marker. Structured instrument names take their set from
/// the layout position of the embedded (else the actual) coordinate; their
/// numeric suffix is a run id.
pub fn detect_control(
    well_coordinate: WellCoordinate,
    sample_name: &str,
    layout: &ControlLayout,
) -> Option<ControlAssignment> {
    if let Some(control_type) = detect_control_type(sample_name) {
        let set_number = match structured_position(sample_name) {
            Some(embedded) => embedded
                .and_then(|coord| layout.lookup(coord))
                .or_else(|| layout.lookup(well_coordinate))
                .map_or(1, |(_, set)| set),
            None => extract_set_number(sample_name),
        };
        return Some(ControlAssignment {
            well_coordinate,
            control_type,
            set_number,
            source: ControlSource::SampleName,
        });
    }
    layout
        .lookup(well_coordinate)
        .map(|(control_type, set_number)| ControlAssignment {
            well_coordinate,
            control_type,
            set_number,
            source: ControlSource::PlateCoordinate,
        })
}

pub fn validate_control(
    assignment: &ControlAssignment,
    well: &CombinedWell,
) -> ControlResult {
    let expected = assignment.control_type.expected_label();
    let actual = well.label;
    let amplitude = well.observation.effective_amplitude();
    let is_valid = expected == actual;
    let message = format!(
        "{} {}: {} (amp: {:.1})",
        assignment.control_type.short_code(),
        if is_valid { "valid" } else { "invalid" },
        actual,
        amplitude
    );
    ControlResult {
        well_coordinate: assignment.well_coordinate,
        channel: well.observation.channel,
        sample_name: well.observation.sample_name.clone(),
        control_type: assignment.control_type,
        set_number: assignment.set_number,
        source: assignment.source,
        expected,
        actual,
        is_valid,
        amplitude,
        message,
    }
}

pub fn run_stage4(combined: &CombinedExperimentResult, layout: &ControlLayout) -> ControlReport {
    let mut report = ControlReport::default();
    if layout.is_empty() {
        tracing::debug!("no plate layout; controls detected from sample names only");
    }
    let mut groups: BTreeMap<(Channel, ControlType, u32), (usize, usize)> = BTreeMap::new();

    for well in combined.wells.values() {
        let obs = &well.observation;
        let Some(assignment) = detect_control(obs.well_coordinate, &obs.sample_name, layout)
        else {
            continue;
        };
        let result = validate_control(&assignment, well);
        let entry = groups
            .entry((result.channel, result.control_type, result.set_number))
            .or_default();
        if result.is_valid {
            entry.0 += 1;
        } else {
            entry.1 += 1;
            tracing::warn!(
                well = %result.well_coordinate,
                channel = %result.channel,
                control = %result.control_type,
                set = result.set_number,
                expected = %result.expected,
                actual = %result.actual,
                amplitude = result.amplitude,
                "control failed"
            );
            report.issues.push(ControlValidationIssue {
                well_coordinate: result.well_coordinate,
                sample_name: result.sample_name.clone(),
                control_type: result.control_type,
                set_number: result.set_number,
                expected: result.expected,
                actual: result.actual,
                amplitude: result.amplitude,
                channel: result.channel,
            });
        }
        report.results.push(result);
    }

    report.summary = groups
        .into_iter()
        .map(
            |((channel, control_type, set_number), (passed, failed))| ControlSummaryRow {
                channel,
                control_type,
                set_number,
                passed,
                failed,
                all_passed: failed == 0,
            },
        )
        .collect();

    tracing::info!(
        controls = report.results.len(),
        failed = report.issues.len(),
        "validated controls"
    );
    report
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_controls.rs"]
mod tests;
