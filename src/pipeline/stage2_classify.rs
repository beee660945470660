use std::collections::BTreeMap;

use crate::model::experiment::ExperimentResultSet;
use crate::model::labels::{ClassificationLabel, LabelCounts};
use crate::model::thresholds::ClassificationThresholds;
use crate::model::well::{Anomalies, Channel, WellKey, WellObservation};

/// Curve label from amplitude and anomaly tags. Missing or non-finite
/// amplitudes read as zero; malformed anomaly data counts as anomalies present.
pub fn classify(
    amplitude: Option<f64>,
    anomalies: &Anomalies,
    thresholds: &ClassificationThresholds,
) -> ClassificationLabel {
    let amplitude = amplitude.filter(|v| v.is_finite()).unwrap_or(0.0);
    if amplitude > thresholds.positive_above && !anomalies.has_anomalies() {
        ClassificationLabel::Positive
    } else if amplitude < thresholds.negative_below {
        ClassificationLabel::Negative
    } else {
        ClassificationLabel::Indeterminate
    }
}

pub fn classify_observation(
    obs: &WellObservation,
    thresholds: &ClassificationThresholds,
) -> ClassificationLabel {
    classify(obs.amplitude, &obs.anomalies, thresholds)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stage2Output {
    pub labels: BTreeMap<WellKey, ClassificationLabel>,
    pub channel_counts: BTreeMap<Channel, LabelCounts>,
    pub malformed_anomalies: usize,
}

pub fn run_stage2(
    experiment: &ExperimentResultSet,
    thresholds: &ClassificationThresholds,
) -> Stage2Output {
    let mut labels = BTreeMap::new();
    let mut channel_counts: BTreeMap<Channel, LabelCounts> = BTreeMap::new();
    let mut malformed_anomalies = 0usize;

    for (channel, wells) in experiment.channels() {
        let mut channel_labels = Vec::with_capacity(wells.len());
        for obs in wells.values() {
            if obs.anomalies.is_malformed() {
                malformed_anomalies += 1;
                tracing::warn!(
                    well = %obs.well_coordinate,
                    channel = %channel,
                    anomalies = %obs.anomalies.describe(),
                    "malformed anomaly data treated as anomalies present"
                );
            }
            let label = classify_observation(obs, thresholds);
            labels.insert(WellKey::new(obs.well_coordinate, channel), label);
            channel_labels.push(label);
        }
        channel_counts.insert(channel, LabelCounts::from_labels(channel_labels));
    }

    tracing::info!(
        pattern = experiment.pattern(),
        wells = experiment.observation_count(),
        "classified wells"
    );

    Stage2Output {
        labels,
        channel_counts,
        malformed_anomalies,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_classify.rs"]
mod tests;
