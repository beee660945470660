use std::collections::BTreeMap;

use serde::Serialize;

use crate::input::WellRecord;
use crate::model::experiment::{ChannelWells, ExperimentResultSet};
use crate::model::well::{Channel, WellKey};
use crate::naming::pattern::{extract_canonical_pattern, extract_test_code};
use crate::pipeline::stage1_resolve::{ResolvedBatch, SkippedWell, resolve_well};
use crate::store::{StoredSession, StoredWell};

/// Stored sessions that share one canonical pattern.
#[derive(Debug, Clone)]
pub struct SessionGroup {
    pub pattern: String,
    pub test_code: String,
    pub sources: Vec<String>,
    pub experiment: ExperimentResultSet,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionGrouping {
    #[serde(skip)]
    pub groups: Vec<SessionGroup>,
    pub skipped_wells: Vec<SkippedWell>,
    pub excluded_sessions: Vec<String>,
}

#[derive(Default)]
struct GroupBuilder {
    sources: Vec<String>,
    channels: BTreeMap<Channel, ChannelWells>,
}

/// Groups stored sessions by canonical pattern. Sessions are applied oldest
/// first, so a re-upload supersedes earlier wells at the same
/// (coordinate, channel). Wells whose channel cannot be determined are left
/// out rather than filed under an unknown channel.
pub fn group_sessions(sessions: &[StoredSession]) -> SessionGrouping {
    let mut ordered: Vec<&StoredSession> = sessions.iter().collect();
    // Stable: equal or missing timestamps keep store order.
    ordered.sort_by(|a, b| a.upload_timestamp.cmp(&b.upload_timestamp));

    let mut builders: BTreeMap<String, GroupBuilder> = BTreeMap::new();
    let mut grouping = SessionGrouping::default();

    for session in ordered {
        let pattern = extract_canonical_pattern(&session.name);
        let mut contributed = 0usize;
        let builder = builders.entry(pattern.clone()).or_default();

        for well in &session.well_results {
            match resolve_well(&session.name, None, &well.well_id, &well.record) {
                Ok((obs, _)) => {
                    builder
                        .channels
                        .entry(obs.channel)
                        .or_default()
                        .insert(obs.well_coordinate, obs);
                    contributed += 1;
                }
                Err(reason) => grouping.skipped_wells.push(SkippedWell {
                    source: session.name.clone(),
                    well_id: well.well_id.clone(),
                    reason,
                }),
            }
        }

        if contributed == 0 {
            tracing::warn!(
                session = %session.name,
                "no well of this session has a determinable channel; excluded"
            );
            grouping.excluded_sessions.push(session.name.clone());
        } else {
            builder.sources.push(session.name.clone());
        }
    }

    if !grouping.skipped_wells.is_empty() {
        tracing::warn!(
            count = grouping.skipped_wells.len(),
            "stored wells without a usable id or channel were excluded"
        );
    }

    for (pattern, builder) in builders {
        if builder.channels.is_empty() {
            continue;
        }
        match ExperimentResultSet::new(pattern.clone(), builder.channels) {
            Ok(experiment) => {
                tracing::debug!(
                    pattern = %pattern,
                    sources = builder.sources.len(),
                    channels = experiment.channel_count(),
                    "grouped sessions"
                );
                grouping.groups.push(SessionGroup {
                    test_code: extract_test_code(&pattern),
                    pattern,
                    sources: builder.sources,
                    experiment,
                });
            }
            Err(err) => tracing::warn!(pattern = %pattern, error = %err, "dropping session group"),
        }
    }

    tracing::info!(
        sessions = sessions.len(),
        experiments = grouping.groups.len(),
        "grouped stored sessions"
    );
    grouping
}

/// The store form of one resolved input batch; wells are keyed `A1_Cy5`.
pub fn session_from_batch(batch: &ResolvedBatch) -> StoredSession {
    StoredSession {
        name: batch.name.clone(),
        upload_timestamp: batch.upload_timestamp.clone(),
        well_results: batch
            .observations
            .iter()
            .map(|obs| StoredWell {
                well_id: WellKey::new(obs.well_coordinate, obs.channel).to_string(),
                record: WellRecord::from_observation(obs),
            })
            .collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_sessions.rs"]
mod tests;
