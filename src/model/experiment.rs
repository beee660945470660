use std::collections::{BTreeMap, BTreeSet};

use crate::model::well::{Channel, WellCoordinate, WellObservation};
use crate::naming::pattern::extract_test_code;

/// Caller-contract violations: the grouping or combination preconditions were
/// not honored upstream.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("experiment {pattern} has no channels")]
    NoChannels { pattern: String },
    #[error("channel {channel} of experiment {pattern} has no wells")]
    EmptyChannel { pattern: String, channel: Channel },
    #[error("experiment mixes canonical patterns: {}", patterns.join(", "))]
    MixedPatterns { patterns: Vec<String> },
    #[error("well {coordinate} reports channel {found} but is filed under {expected}")]
    ChannelMismatch {
        coordinate: WellCoordinate,
        expected: Channel,
        found: Channel,
    },
    #[error("well {found} is filed under coordinate {expected}")]
    CoordinateMismatch {
        expected: WellCoordinate,
        found: WellCoordinate,
    },
}

pub type ChannelWells = BTreeMap<WellCoordinate, WellObservation>;

/// All observations of one experiment, grouped by channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentResultSet {
    pattern: String,
    test_code: String,
    channels: BTreeMap<Channel, ChannelWells>,
}

impl ExperimentResultSet {
    pub fn new(
        pattern: impl Into<String>,
        channels: BTreeMap<Channel, ChannelWells>,
    ) -> Result<Self, EngineError> {
        let pattern = pattern.into();
        if channels.is_empty() {
            return Err(EngineError::NoChannels { pattern });
        }
        for (&channel, wells) in &channels {
            if wells.is_empty() {
                return Err(EngineError::EmptyChannel { pattern, channel });
            }
            for (&coordinate, obs) in wells {
                if obs.channel != channel {
                    return Err(EngineError::ChannelMismatch {
                        coordinate,
                        expected: channel,
                        found: obs.channel,
                    });
                }
                if obs.well_coordinate != coordinate {
                    return Err(EngineError::CoordinateMismatch {
                        expected: coordinate,
                        found: obs.well_coordinate,
                    });
                }
            }
        }
        let test_code = extract_test_code(&pattern);
        Ok(Self {
            pattern,
            test_code,
            channels,
        })
    }

    /// Folds `other` into `self`. Both sides must share the canonical pattern;
    /// on a shared (coordinate, channel) the observation from `other` supersedes.
    pub fn merge(mut self, other: ExperimentResultSet) -> Result<Self, EngineError> {
        if self.pattern != other.pattern {
            return Err(EngineError::MixedPatterns {
                patterns: vec![self.pattern, other.pattern],
            });
        }
        for (channel, wells) in other.channels {
            self.channels.entry(channel).or_default().extend(wells);
        }
        Ok(self)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn test_code(&self) -> &str {
        &self.test_code
    }

    pub fn channel_set(&self) -> BTreeSet<Channel> {
        self.channels.keys().copied().collect()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn is_multi_channel(&self) -> bool {
        self.channels.len() > 1
    }

    pub fn channels(&self) -> impl Iterator<Item = (Channel, &ChannelWells)> {
        self.channels.iter().map(|(c, w)| (*c, w))
    }

    /// Every observation, channels in canonical order, wells row-major.
    pub fn observations(&self) -> impl Iterator<Item = &WellObservation> {
        self.channels.values().flat_map(|wells| wells.values())
    }

    pub fn observation_count(&self) -> usize {
        self.channels.values().map(BTreeMap::len).sum()
    }
}

#[cfg(test)]
impl ExperimentResultSet {
    pub fn single_channel(
        pattern: impl Into<String>,
        channel: Channel,
        wells: ChannelWells,
    ) -> Result<Self, EngineError> {
        let mut channels = BTreeMap::new();
        channels.insert(channel, wells);
        Self::new(pattern, channels)
    }

    pub fn wells(&self, channel: Channel) -> Option<&ChannelWells> {
        self.channels.get(&channel)
    }
}
