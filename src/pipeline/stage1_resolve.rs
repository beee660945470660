use std::collections::BTreeMap;

use serde::Serialize;

use crate::input::batch::coordinate_of_well_id;
use crate::input::{WellBatch, WellRecord};
use crate::model::experiment::{ChannelWells, EngineError, ExperimentResultSet};
use crate::model::well::{Channel, WellObservation};
use crate::naming::channel::{ChannelProbe, ChannelSource, resolve_channel};
use crate::naming::pattern::{is_canonical_name, validate_pattern_consistency};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedWell {
    pub source: String,
    pub well_id: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    InvalidCoordinate,
    UnknownChannel,
}

/// One input batch after channel and coordinate resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBatch {
    pub name: String,
    pub upload_timestamp: Option<String>,
    pub observations: Vec<WellObservation>,
    pub channel_sources: BTreeMap<Channel, ChannelSource>,
}

#[derive(Debug, Clone)]
pub struct Stage1Output {
    pub experiment: ExperimentResultSet,
    pub batches: Vec<ResolvedBatch>,
    pub skipped: Vec<SkippedWell>,
}

/// Builds one experiment from the batches of a single upload. Every batch must
/// carry the same canonical pattern; on a repeated (coordinate, channel) the
/// later batch wins.
pub fn run_stage1(batches: &[WellBatch]) -> Result<Stage1Output, EngineError> {
    let names: Vec<&str> = batches.iter().map(|b| b.name.as_str()).collect();
    let pattern = validate_pattern_consistency(&names)?.ok_or_else(|| EngineError::NoChannels {
        pattern: String::new(),
    })?;

    let mut experiment: Option<ExperimentResultSet> = None;
    let mut resolved = Vec::with_capacity(batches.len());
    let mut skipped = Vec::new();

    for batch in batches {
        let batch_out = resolve_batch(batch, &mut skipped);
        if let Some(part) = batch_out.to_experiment(&pattern)? {
            experiment = Some(match experiment.take() {
                Some(acc) => acc.merge(part)?,
                None => part,
            });
        }
        tracing::info!(
            source = %batch.name,
            wells = batch_out.observations.len(),
            channels = ?batch_out.channel_sources.keys().map(|c| c.as_str()).collect::<Vec<_>>(),
            "resolved batch"
        );
        resolved.push(batch_out);
    }

    if !skipped.is_empty() {
        tracing::warn!(count = skipped.len(), "skipped wells with unusable id or channel");
    }

    let experiment = experiment.ok_or(EngineError::NoChannels { pattern })?;
    Ok(Stage1Output {
        experiment,
        batches: resolved,
        skipped,
    })
}

impl ResolvedBatch {
    /// The batch as an experiment of its own; `None` when no well resolved.
    pub fn to_experiment(
        &self,
        pattern: &str,
    ) -> Result<Option<ExperimentResultSet>, EngineError> {
        if self.observations.is_empty() {
            return Ok(None);
        }
        let mut channels: BTreeMap<Channel, ChannelWells> = BTreeMap::new();
        for obs in &self.observations {
            channels
                .entry(obs.channel)
                .or_default()
                .insert(obs.well_coordinate, obs.clone());
        }
        ExperimentResultSet::new(pattern, channels).map(Some)
    }
}

pub fn resolve_batch(batch: &WellBatch, skipped: &mut Vec<SkippedWell>) -> ResolvedBatch {
    if !is_canonical_name(&batch.name) {
        tracing::debug!(source = %batch.name, "upload name does not follow the instrument convention");
    }
    let mut observations = Vec::with_capacity(batch.wells.len());
    let mut channel_sources = BTreeMap::new();

    for (well_id, record) in &batch.wells {
        match resolve_well(&batch.name, batch.channel.as_deref(), well_id, record) {
            Ok((obs, source)) => {
                channel_sources.entry(obs.channel).or_insert(source);
                observations.push(obs);
            }
            Err(reason) => {
                tracing::debug!(source = %batch.name, well_id = %well_id, ?reason, "skipping well");
                skipped.push(SkippedWell {
                    source: batch.name.clone(),
                    well_id: well_id.clone(),
                    reason,
                });
            }
        }
    }

    ResolvedBatch {
        name: batch.name.clone(),
        upload_timestamp: batch.upload_timestamp.clone(),
        observations,
        channel_sources,
    }
}

/// Coordinate from the well id, channel from the ordered resolver strategies.
pub fn resolve_well(
    upload_name: &str,
    default_channel: Option<&str>,
    well_id: &str,
    record: &WellRecord,
) -> Result<(WellObservation, ChannelSource), SkipReason> {
    let coordinate = coordinate_of_well_id(well_id).ok_or(SkipReason::InvalidCoordinate)?;
    let probe = ChannelProbe {
        explicit: record.channel.as_deref().or(default_channel),
        fit_parameters: record.fit_parameters.as_ref(),
        well_key: Some(well_id),
        upload_name: Some(upload_name),
    };
    let (channel, source) = resolve_channel(&probe).ok_or(SkipReason::UnknownChannel)?;
    Ok((record.to_observation(coordinate, channel), source))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_resolve.rs"]
mod tests;
