pub mod json;
pub mod text;

use crate::pipeline::stage3_combine::ExperimentSummary;
use crate::pipeline::stage4_controls::ControlReport;
use crate::pipeline::stage6_trends::TrendOutcome;

pub const TOOL_NAME: &str = "kira-qpcrqc";

/// Everything the human-readable report needs about one analysed experiment.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub summary: &'a ExperimentSummary,
    pub controls: &'a ControlReport,
    pub sources: &'a [String],
    pub skipped_wells: usize,
    pub trend: Option<&'a TrendOutcome>,
}

pub fn format_f64_3(v: f64) -> String {
    format!("{:.3}", v)
}

pub fn format_pct(v: f64) -> String {
    format!("{:.1}", v)
}

/// Empty cell for a missing value.
pub fn format_optional(v: Option<f64>) -> String {
    v.map(format_f64_3).unwrap_or_default()
}

/// Tabs and line breaks inside free text would break the TSV grid.
pub fn tsv_field(raw: &str) -> String {
    raw.replace(['\t', '\n', '\r'], " ")
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
