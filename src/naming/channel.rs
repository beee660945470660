use serde::Serialize;
use serde_json::Value;

use crate::model::well::Channel;
use crate::naming::pattern::{composite_channels, is_composite_name};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelSource {
    Explicit,
    FitParameters,
    WellKey,
    UploadName,
}

/// Everything known about a well or record that may reveal its channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelProbe<'a> {
    pub explicit: Option<&'a str>,
    pub fit_parameters: Option<&'a Value>,
    pub well_key: Option<&'a str>,
    pub upload_name: Option<&'a str>,
}

type Strategy = fn(&ChannelProbe<'_>) -> Option<Channel>;

const STRATEGIES: &[(ChannelSource, Strategy)] = &[
    (ChannelSource::Explicit, from_explicit),
    (ChannelSource::FitParameters, from_fit_parameters),
    (ChannelSource::WellKey, from_well_key),
    (ChannelSource::UploadName, from_upload_name),
];

// Longer identifiers first so `Cy5.5` is not read as `Cy5`.
const NAME_SEARCH_ORDER: [Channel; 5] = [
    Channel::Cy55,
    Channel::TexasRed,
    Channel::Cy5,
    Channel::Fam,
    Channel::Hex,
];

/// First strategy that yields a known channel wins.
pub fn resolve_channel(probe: &ChannelProbe<'_>) -> Option<(Channel, ChannelSource)> {
    STRATEGIES
        .iter()
        .find_map(|(source, strategy)| strategy(probe).map(|channel| (channel, *source)))
}

pub fn from_explicit(probe: &ChannelProbe<'_>) -> Option<Channel> {
    probe.explicit.and_then(Channel::parse)
}

pub fn from_fit_parameters(probe: &ChannelProbe<'_>) -> Option<Channel> {
    match probe.fit_parameters? {
        Value::Object(map) => map
            .get("fluorophore")
            .and_then(Value::as_str)
            .and_then(Channel::parse),
        Value::String(text) => match serde_json::from_str::<Value>(text).ok()? {
            Value::Object(map) => map
                .get("fluorophore")
                .and_then(Value::as_str)
                .and_then(Channel::parse),
            _ => None,
        },
        _ => None,
    }
}

pub fn from_well_key(probe: &ChannelProbe<'_>) -> Option<Channel> {
    let (_, suffix) = probe.well_key?.split_once('_')?;
    Channel::parse(suffix)
}

pub fn from_upload_name(probe: &ChannelProbe<'_>) -> Option<Channel> {
    let name = probe.upload_name?;

    if is_composite_name(name) {
        return match composite_channels(name).as_slice() {
            [single] => Some(*single),
            _ => None,
        };
    }

    for channel in NAME_SEARCH_ORDER {
        let id = channel.as_str();
        if name.contains(&format!("_{id}.csv")) || name.contains(&format!("_{id}_")) {
            return Some(channel);
        }
    }
    let lower = name.to_lowercase();
    NAME_SEARCH_ORDER
        .into_iter()
        .find(|channel| contains_token(&lower, &channel.as_str().to_lowercase()))
}

/// `needle` occurs with no letter or digit directly on either side.
fn contains_token(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
