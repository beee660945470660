use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::labels::LabelCounts;
use crate::model::trend::TrendRecord;
use crate::model::well::Channel;
use crate::pipeline::stage3_combine::CombinedExperimentResult;
use crate::store::{SessionStore, StoreError};
use crate::targets::{TargetLibrary, UNKNOWN_TARGET};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrendOutcome {
    Recorded { records: usize },
    Skipped { missing_channels: Vec<Channel> },
}

/// One record per channel, or the missing channels when the experiment is
/// incomplete.
pub fn build_trend_records(
    combined: &CombinedExperimentResult,
    source_timestamp: Option<&str>,
) -> Result<Vec<TrendRecord>, Vec<Channel>> {
    if !combined.is_complete() {
        return Err(combined.completeness.missing_channels.clone());
    }
    Ok(combined
        .channel_counts
        .iter()
        .map(|(&channel, counts)| {
            let target = combined
                .wells
                .values()
                .find(|w| w.observation.channel == channel)
                .map(|w| w.target.clone())
                .unwrap_or_else(|| UNKNOWN_TARGET.to_string());
            TrendRecord {
                test_code: combined.test_code.clone(),
                experiment_pattern: combined.experiment_pattern.clone(),
                channel,
                target,
                counts: *counts,
                positive_percentage: counts.positive_percentage(),
                source_timestamp: source_timestamp.map(str::to_string),
            }
        })
        .collect())
}

pub fn record_trends<S: SessionStore + ?Sized>(
    combined: &CombinedExperimentResult,
    source_timestamp: Option<&str>,
    store: &mut S,
) -> Result<TrendOutcome, StoreError> {
    match build_trend_records(combined, source_timestamp) {
        Ok(records) => {
            let n = records.len();
            for record in records {
                store.save_trend_record(record)?;
            }
            tracing::info!(
                pattern = %combined.experiment_pattern,
                records = n,
                "recorded trend data"
            );
            Ok(TrendOutcome::Recorded { records: n })
        }
        Err(missing_channels) => {
            tracing::info!(
                pattern = %combined.experiment_pattern,
                missing = ?missing_channels.iter().map(|c| c.as_str()).collect::<Vec<_>>(),
                "incomplete experiment left out of trends"
            );
            Ok(TrendOutcome::Skipped { missing_channels })
        }
    }
}

/// Counts for one test and channel summed over every recorded experiment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSummary {
    pub test_code: String,
    pub channel: Channel,
    pub target: String,
    pub experiments: usize,
    #[serde(flatten)]
    pub counts: LabelCounts,
    pub positive_percentage: f64,
}

pub fn aggregate_trends(records: &[TrendRecord], library: &TargetLibrary) -> Vec<TrendSummary> {
    let mut grouped: BTreeMap<(String, Channel), (usize, LabelCounts)> = BTreeMap::new();
    for record in records {
        let entry = grouped
            .entry((record.test_code.clone(), record.channel))
            .or_default();
        entry.0 += 1;
        entry.1.merge(&record.counts);
    }
    grouped
        .into_iter()
        .map(|((test_code, channel), (experiments, counts))| TrendSummary {
            target: library.target_for(&test_code, channel).to_string(),
            test_code,
            channel,
            experiments,
            counts,
            positive_percentage: counts.positive_percentage(),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_trends.rs"]
mod tests;
