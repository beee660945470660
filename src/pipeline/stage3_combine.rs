use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::experiment::ExperimentResultSet;
use crate::model::labels::{ClassificationLabel, LabelCounts, percentage};
use crate::model::well::{Channel, WellKey, WellObservation};
use crate::naming::pattern::composite_name;
use crate::pipeline::AnalysisContext;
use crate::pipeline::stage2_classify::{Stage2Output, classify_observation, run_stage2};
use crate::targets::{
    CompletenessReport, TargetBreakdown, pathogen_breakdown, validate_completeness,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedWell {
    #[serde(flatten)]
    pub observation: WellObservation,
    pub label: ClassificationLabel,
    pub target: String,
}

/// One logical experiment with every channel merged under `A1_Cy5` style keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedExperimentResult {
    pub experiment_pattern: String,
    pub test_code: String,
    pub display_name: String,
    pub total_wells: usize,
    pub positive_count: usize,
    pub success_rate: f64,
    pub channel_count: usize,
    pub channels: Vec<Channel>,
    pub is_multi_channel: bool,
    pub completeness: CompletenessReport,
    pub channel_counts: BTreeMap<Channel, LabelCounts>,
    pub pathogen_breakdown: Vec<TargetBreakdown>,
    pub wells: BTreeMap<WellKey, CombinedWell>,
}

impl CombinedExperimentResult {
    pub fn is_complete(&self) -> bool {
        self.completeness.is_complete
    }

    pub fn summary(&self) -> ExperimentSummary {
        ExperimentSummary {
            experiment_pattern: self.experiment_pattern.clone(),
            test_code: self.test_code.clone(),
            display_name: self.display_name.clone(),
            total_wells: self.total_wells,
            positive_count: self.positive_count,
            success_rate: self.success_rate,
            channel_count: self.channel_count,
            channels: self.channels.clone(),
            completeness: self.completeness.clone(),
            channel_counts: self.channel_counts.clone(),
            pathogen_breakdown: self.pathogen_breakdown.clone(),
        }
    }
}

/// A combined result without its per-well payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentSummary {
    pub experiment_pattern: String,
    pub test_code: String,
    pub display_name: String,
    pub total_wells: usize,
    pub positive_count: usize,
    pub success_rate: f64,
    pub channel_count: usize,
    pub channels: Vec<Channel>,
    pub completeness: CompletenessReport,
    pub channel_counts: BTreeMap<Channel, LabelCounts>,
    pub pathogen_breakdown: Vec<TargetBreakdown>,
}

/// Classifies and merges in one step.
pub fn combine(
    experiment: &ExperimentResultSet,
    ctx: &AnalysisContext<'_>,
) -> CombinedExperimentResult {
    let stage2 = run_stage2(experiment, &ctx.thresholds);
    run_stage3(experiment, &stage2, ctx)
}

pub fn run_stage3(
    experiment: &ExperimentResultSet,
    stage2: &Stage2Output,
    ctx: &AnalysisContext<'_>,
) -> CombinedExperimentResult {
    let test_code = experiment.test_code();
    let mut wells = BTreeMap::new();
    for obs in experiment.observations() {
        let key = WellKey::new(obs.well_coordinate, obs.channel);
        let label = stage2
            .labels
            .get(&key)
            .copied()
            .unwrap_or_else(|| classify_observation(obs, &ctx.thresholds));
        wells.insert(
            key,
            CombinedWell {
                observation: obs.clone(),
                label,
                target: ctx.library.target_for(test_code, obs.channel).to_string(),
            },
        );
    }

    let total_wells = wells.len();
    let positive_count = wells
        .values()
        .filter(|w| w.label == ClassificationLabel::Positive)
        .count();
    let channels: Vec<Channel> = experiment.channel_set().into_iter().collect();
    let completeness = validate_completeness(ctx.library, test_code, &experiment.channel_set());
    if !completeness.is_complete {
        tracing::warn!(
            pattern = experiment.pattern(),
            missing = ?completeness.missing_channels.iter().map(|c| c.as_str()).collect::<Vec<_>>(),
            rate = completeness.completion_rate,
            "experiment is missing required channels"
        );
    }

    let display_name = if experiment.is_multi_channel() {
        composite_name(&channels, experiment.pattern())
    } else {
        experiment.pattern().to_string()
    };

    CombinedExperimentResult {
        experiment_pattern: experiment.pattern().to_string(),
        test_code: test_code.to_string(),
        display_name,
        total_wells,
        positive_count,
        success_rate: percentage(positive_count, total_wells),
        channel_count: experiment.channel_count(),
        is_multi_channel: experiment.is_multi_channel(),
        pathogen_breakdown: pathogen_breakdown(ctx.library, test_code, &stage2.channel_counts),
        channel_counts: stage2.channel_counts.clone(),
        channels,
        completeness,
        wells,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_combine.rs"]
mod tests;
