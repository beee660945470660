pub mod defs;
pub mod loader;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::model::labels::LabelCounts;
use crate::model::well::Channel;
use defs::{TargetDef, builtin_targets};

pub const UNKNOWN_TARGET: &str = "Unknown";

/// Read-only test code -> channel -> target table. A `None` channel key is the
/// "no specific channel" placeholder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetLibrary {
    tests: BTreeMap<String, BTreeMap<Option<Channel>, String>>,
}

impl TargetLibrary {
    pub fn builtin() -> Self {
        Self::from_defs(builtin_targets())
    }

    pub fn from_defs(defs: &[TargetDef]) -> Self {
        let mut library = Self::default();
        for def in defs {
            let entry = library.tests.entry(def.test_code.to_string()).or_default();
            entry.clear();
            for &(channel, target) in def.targets {
                entry.insert(channel, target.to_string());
            }
        }
        library
    }

    pub fn from_map(tests: BTreeMap<String, BTreeMap<Option<Channel>, String>>) -> Self {
        Self { tests }
    }

    pub fn target_for(&self, test_code: &str, channel: Channel) -> &str {
        self.tests
            .get(test_code)
            .and_then(|targets| targets.get(&Some(channel)))
            .map(String::as_str)
            .unwrap_or(UNKNOWN_TARGET)
    }

    pub fn required_channels(&self, test_code: &str) -> BTreeSet<Channel> {
        self.tests
            .get(test_code)
            .map(|targets| targets.keys().filter_map(|c| *c).collect())
            .unwrap_or_default()
    }

    pub fn contains_test(&self, test_code: &str) -> bool {
        self.tests.contains_key(test_code)
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletenessReport {
    pub test_code: String,
    pub is_complete: bool,
    pub required_channels: Vec<Channel>,
    pub available_channels: Vec<Channel>,
    pub missing_channels: Vec<Channel>,
    pub completion_rate: f64,
}

pub fn validate_completeness(
    library: &TargetLibrary,
    test_code: &str,
    available: &BTreeSet<Channel>,
) -> CompletenessReport {
    let required = library.required_channels(test_code);
    let missing: Vec<Channel> = required.difference(available).copied().collect();
    let completion_rate = if required.is_empty() {
        100.0
    } else {
        (required.len() - missing.len()) as f64 / required.len() as f64 * 100.0
    };
    CompletenessReport {
        test_code: test_code.to_string(),
        is_complete: missing.is_empty(),
        required_channels: required.into_iter().collect(),
        available_channels: available.iter().copied().collect(),
        missing_channels: missing,
        completion_rate,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetBreakdown {
    pub channel: Channel,
    pub target: String,
    pub positive_percentage: f64,
}

impl TargetBreakdown {
    pub fn display_line(&self) -> String {
        format!("{}: {:.1}%", self.target, self.positive_percentage)
    }
}

/// Positive share per channel, labelled with the channel's target. Channels the
/// library does not know for this test are labelled with the channel name.
pub fn pathogen_breakdown(
    library: &TargetLibrary,
    test_code: &str,
    counts: &BTreeMap<Channel, LabelCounts>,
) -> Vec<TargetBreakdown> {
    counts
        .iter()
        .map(|(&channel, c)| {
            let target = match library.target_for(test_code, channel) {
                UNKNOWN_TARGET => channel.as_str().to_string(),
                known => known.to_string(),
            };
            TargetBreakdown {
                channel,
                target,
                positive_percentage: c.positive_percentage(),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/targets/tests.rs"]
mod tests;
