use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PLATE_ROWS: u8 = 16;
pub const PLATE_COLUMNS: u8 = 24;

/// Row letter plus column number on a plate of up to 16 x 24 wells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WellCoordinate {
    row: u8,
    column: u8,
}

impl WellCoordinate {
    pub fn new(row: u8, column: u8) -> Option<Self> {
        if row < PLATE_ROWS && (1..=PLATE_COLUMNS).contains(&column) {
            Some(Self { row, column })
        } else {
            None
        }
    }

    /// Accepts `A1` as well as the zero-padded instrument form `A01`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let mut chars = raw.chars();
        let letter = chars.next()?.to_ascii_uppercase();
        if !('A'..='P').contains(&letter) {
            return None;
        }
        let digits = chars.as_str();
        if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let column: u8 = digits.parse().ok()?;
        Self::new(letter as u8 - b'A', column)
    }

    pub fn row_letter(&self) -> char {
        (b'A' + self.row) as char
    }
}

impl std::fmt::Display for WellCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.row_letter(), self.column)
    }
}

impl TryFrom<String> for WellCoordinate {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        WellCoordinate::parse(&value).ok_or_else(|| format!("invalid well coordinate: {value}"))
    }
}

impl From<WellCoordinate> for String {
    fn from(value: WellCoordinate) -> Self {
        value.to_string()
    }
}

/// Fluorescence detection channels, declared in canonical (alphabetical) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Channel {
    Cy5,
    Cy55,
    Fam,
    Hex,
    TexasRed,
}

impl Channel {
    pub const ALL: [Channel; 5] = [
        Channel::Cy5,
        Channel::Cy55,
        Channel::Fam,
        Channel::Hex,
        Channel::TexasRed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Cy5 => "Cy5",
            Channel::Cy55 => "Cy5.5",
            Channel::Fam => "FAM",
            Channel::Hex => "HEX",
            Channel::TexasRed => "Texas Red",
        }
    }

    /// Case-insensitive; ignores spaces, dashes and underscores (`texas_red`, `TexasRed`).
    pub fn parse(raw: &str) -> Option<Channel> {
        let wanted = fold_channel_name(raw);
        if wanted.is_empty() {
            return None;
        }
        Channel::ALL
            .into_iter()
            .find(|c| fold_channel_name(c.as_str()) == wanted)
    }
}

fn fold_channel_name(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Channel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Channel::parse(&value).ok_or_else(|| format!("unknown channel: {value}"))
    }
}

impl From<Channel> for String {
    fn from(value: Channel) -> Self {
        value.as_str().to_string()
    }
}

pub const NO_ANOMALY_MARKER: &str = "None";

/// Anomaly tags attached by the curve fitter.
///
/// Storage keeps tags as JSON text, uploads send arrays, and some producers send
/// the bare marker `"None"`. Anything that cannot be read as a list of strings
/// is kept as `Malformed` and counts as "anomalies present".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Anomalies {
    Tags(Vec<String>),
    Malformed(String),
}

impl Default for Anomalies {
    fn default() -> Self {
        Anomalies::Tags(Vec::new())
    }
}

impl Anomalies {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn has_anomalies(&self) -> bool {
        match self {
            Anomalies::Tags(tags) => {
                !tags.is_empty() && !(tags.len() == 1 && tags[0] == NO_ANOMALY_MARKER)
            }
            Anomalies::Malformed(_) => true,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Anomalies::Malformed(_))
    }

    pub fn describe(&self) -> String {
        match self {
            Anomalies::Tags(_) if !self.has_anomalies() => String::new(),
            Anomalies::Tags(tags) => tags.join(";"),
            Anomalies::Malformed(raw) => format!("malformed({raw})"),
        }
    }
}

impl From<Value> for Anomalies {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Anomalies::none(),
            Value::Array(items) => string_list(&items)
                .map(Anomalies::Tags)
                .unwrap_or_else(|| Anomalies::Malformed(Value::Array(items).to_string())),
            Value::String(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Anomalies::none();
                }
                if trimmed == NO_ANOMALY_MARKER {
                    return Anomalies::Tags(vec![NO_ANOMALY_MARKER.to_string()]);
                }
                match serde_json::from_str::<Value>(trimmed) {
                    Ok(Value::Array(items)) => string_list(&items)
                        .map(Anomalies::Tags)
                        .unwrap_or(Anomalies::Malformed(text)),
                    _ => Anomalies::Malformed(text),
                }
            }
            other => Anomalies::Malformed(other.to_string()),
        }
    }
}

impl From<Anomalies> for Value {
    fn from(value: Anomalies) -> Self {
        match value {
            Anomalies::Tags(tags) => Value::Array(tags.into_iter().map(Value::String).collect()),
            Anomalies::Malformed(raw) => Value::String(raw),
        }
    }
}

fn string_list(items: &[Value]) -> Option<Vec<String>> {
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

/// One channel's curve-fit metrics for one well.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellObservation {
    pub well_coordinate: WellCoordinate,
    pub channel: Channel,
    pub sample_name: String,
    pub amplitude: Option<f64>,
    pub steepness: Option<f64>,
    pub midpoint: Option<f64>,
    pub baseline: Option<f64>,
    pub r2_score: Option<f64>,
    pub rmse: Option<f64>,
    pub anomalies: Anomalies,
    pub cq_value: Option<f64>,
}

impl WellObservation {
    /// Amplitude as the classifier sees it: missing or non-finite reads as zero.
    pub fn effective_amplitude(&self) -> f64 {
        self.amplitude.filter(|v| v.is_finite()).unwrap_or(0.0)
    }
}

#[cfg(test)]
impl Anomalies {
    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Anomalies::Tags(tags.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
impl WellObservation {
    pub fn new(well_coordinate: WellCoordinate, channel: Channel) -> Self {
        Self {
            well_coordinate,
            channel,
            sample_name: String::new(),
            amplitude: None,
            steepness: None,
            midpoint: None,
            baseline: None,
            r2_score: None,
            rmse: None,
            anomalies: Anomalies::none(),
            cq_value: None,
        }
    }

    pub fn with_sample(mut self, sample_name: impl Into<String>) -> Self {
        self.sample_name = sample_name.into();
        self
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = Some(amplitude);
        self
    }

    pub fn with_anomalies(mut self, anomalies: Anomalies) -> Self {
        self.anomalies = anomalies;
        self
    }
}

/// `(coordinate, channel)` key of a combined experiment, rendered `A1_Cy5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WellKey {
    pub well_coordinate: WellCoordinate,
    pub channel: Channel,
}

impl WellKey {
    pub fn new(well_coordinate: WellCoordinate, channel: Channel) -> Self {
        Self {
            well_coordinate,
            channel,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let (coordinate, channel) = raw.trim().split_once('_')?;
        Some(Self::new(
            WellCoordinate::parse(coordinate)?,
            Channel::parse(channel)?,
        ))
    }
}

impl std::fmt::Display for WellKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.well_coordinate, self.channel)
    }
}

impl TryFrom<String> for WellKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        WellKey::parse(&value).ok_or_else(|| format!("invalid well key: {value}"))
    }
}

impl From<WellKey> for String {
    fn from(value: WellKey) -> Self {
        value.to_string()
    }
}
