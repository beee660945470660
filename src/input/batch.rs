use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::input::numbers::{lenient_f64, lenient_string};
use crate::input::{InputError, open_maybe_gz};
use crate::model::well::{Anomalies, Channel, WellCoordinate, WellObservation};

/// One uploaded file's worth of fitted wells, keyed by well id (`A1`, `A01`
/// or `A1_Cy5`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WellBatch {
    pub name: String,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub upload_timestamp: Option<String>,
    pub wells: BTreeMap<String, WellRecord>,
}

/// Per-well fit outputs as they cross the JSON boundary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WellRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub sample_name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amplitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub steepness: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub midpoint: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub baseline: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub r2_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rmse: Option<f64>,
    #[serde(default)]
    pub anomalies: Anomalies,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cq_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit_parameters: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl WellRecord {
    pub fn to_observation(&self, coordinate: WellCoordinate, channel: Channel) -> WellObservation {
        WellObservation {
            well_coordinate: coordinate,
            channel,
            sample_name: self.sample_name.clone(),
            amplitude: self.amplitude,
            steepness: self.steepness,
            midpoint: self.midpoint,
            baseline: self.baseline,
            r2_score: self.r2_score,
            rmse: self.rmse,
            anomalies: self.anomalies.clone(),
            cq_value: self.cq_value,
        }
    }

    pub fn from_observation(obs: &WellObservation) -> Self {
        Self {
            sample_name: obs.sample_name.clone(),
            amplitude: obs.amplitude,
            steepness: obs.steepness,
            midpoint: obs.midpoint,
            baseline: obs.baseline,
            r2_score: obs.r2_score,
            rmse: obs.rmse,
            anomalies: obs.anomalies.clone(),
            cq_value: obs.cq_value,
            fit_parameters: None,
            channel: Some(obs.channel.as_str().to_string()),
        }
    }
}

/// Coordinate part of a well id: `A01_Cy5` -> `A1`.
pub fn coordinate_of_well_id(well_id: &str) -> Option<WellCoordinate> {
    let head = well_id.split_once('_').map_or(well_id, |(head, _)| head);
    WellCoordinate::parse(head)
}

pub fn load_batch(path: &Path) -> Result<WellBatch, InputError> {
    let reader = open_maybe_gz(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let batch: WellBatch = serde_json::from_reader(reader).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if batch.wells.is_empty() {
        return Err(InputError::MissingInput(format!(
            "{} contains no wells",
            path.display()
        )));
    }
    tracing::debug!(
        path = %path.display(),
        name = %batch.name,
        wells = batch.wells.len(),
        "loaded well batch"
    );
    Ok(batch)
}
