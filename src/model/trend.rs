use serde::{Deserialize, Serialize};

use crate::model::labels::LabelCounts;
use crate::model::well::Channel;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrendKey {
    pub test_code: String,
    pub experiment_pattern: String,
    pub channel: Channel,
}

/// Per-experiment, per-channel label counts kept for longitudinal reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
    pub test_code: String,
    pub experiment_pattern: String,
    pub channel: Channel,
    pub target: String,
    #[serde(flatten)]
    pub counts: LabelCounts,
    pub positive_percentage: f64,
    #[serde(default)]
    pub source_timestamp: Option<String>,
}

impl TrendRecord {
    pub fn key(&self) -> TrendKey {
        TrendKey {
            test_code: self.test_code.clone(),
            experiment_pattern: self.experiment_pattern.clone(),
            channel: self.channel,
        }
    }
}
