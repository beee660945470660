use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::experiment::EngineError;
use crate::model::well::Channel;

pub const COMPOSITE_MARKER: &str = "Multi-Fluorophore Analysis";

/// Prefix the instrument software puts in front of a test code on active runs.
pub const ACTIVE_RUN_PREFIX: &str = "Ac";

// <test>_<run id>_<instrument>, e.g. AcBVAB_2578825_CFX367393
static CANONICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9]*_\d+_[A-Za-z]+\d+)").expect("canonical pattern regex")
});

static COMPOSITE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Multi-Fluorophore Analysis\s*\(([^)]*)\)\s*(.*)$").expect("composite name regex")
});

static TEST_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*").expect("test code regex"));

/// Canonical experiment identifier of a free-form upload name. Total: always
/// returns something, falling back to the name without its extension.
pub fn extract_canonical_pattern(name: &str) -> String {
    let name = name.trim();
    let subject = match COMPOSITE.captures(name) {
        Some(caps) => caps
            .get(2)
            .map(|m| m.as_str().trim())
            .filter(|tail| !tail.is_empty())
            .unwrap_or(name),
        None => name,
    };

    if let Some(m) = CANONICAL.captures(subject).and_then(|caps| caps.get(1)) {
        return trim_trailing_separators(m.as_str()).to_string();
    }
    trim_trailing_separators(strip_extension(subject)).to_string()
}

/// Test code of a canonical pattern, without the active-run prefix.
pub fn extract_test_code(pattern: &str) -> String {
    let head = pattern.trim().split('_').next().unwrap_or("");
    let run = TEST_CODE.find(head).map(|m| m.as_str()).unwrap_or("");
    match run.strip_prefix(ACTIVE_RUN_PREFIX) {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => run.to_string(),
    }
}

pub fn is_canonical_name(name: &str) -> bool {
    CANONICAL.is_match(name.trim())
}

/// Channels declared by a composite session name such as
/// `Multi-Fluorophore Analysis (HEX, FAM, Cy5) AcBVAB_2578826_CFX367394`.
pub fn composite_channels(name: &str) -> Vec<Channel> {
    let Some(list) = COMPOSITE.captures(name).and_then(|caps| caps.get(1)) else {
        return Vec::new();
    };
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for part in list.as_str().split(',') {
        if let Some(channel) = Channel::parse(part) {
            if seen.insert(channel) {
                out.push(channel);
            }
        }
    }
    out
}

pub fn is_composite_name(name: &str) -> bool {
    name.contains(COMPOSITE_MARKER)
}

/// The single canonical pattern shared by every name of a multi-file upload.
/// `Ok(None)` for an empty upload.
pub fn validate_pattern_consistency<S: AsRef<str>>(
    names: &[S],
) -> Result<Option<String>, EngineError> {
    let patterns: BTreeSet<String> = names
        .iter()
        .map(|n| extract_canonical_pattern(n.as_ref()))
        .collect();
    if patterns.len() > 1 {
        return Err(EngineError::MixedPatterns {
            patterns: patterns.into_iter().collect(),
        });
    }
    Ok(patterns.into_iter().next())
}

fn trim_trailing_separators(s: &str) -> &str {
    s.trim_end_matches(|c: char| c == '-' || c.is_whitespace())
}

// Only a final `.ext` made of alphanumerics with at least one letter counts as
// an extension, so `Cy5.5` and `run 1.5` keep their dots.
fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
                && ext.chars().any(|c| c.is_ascii_alphabetic()) =>
        {
            stem
        }
        _ => name,
    }
}

/// Display name of a combined session; inverse of [`composite_channels`].
pub fn composite_name(channels: &[Channel], pattern: &str) -> String {
    let list: Vec<&str> = channels.iter().map(|c| c.as_str()).collect();
    format!("{COMPOSITE_MARKER} ({}) {pattern}", list.join(", "))
}
