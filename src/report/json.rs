use serde::Serialize;

use crate::pipeline::stage1_resolve::SkippedWell;
use crate::pipeline::stage3_combine::ExperimentSummary;
use crate::pipeline::stage4_controls::{ControlSummaryRow, ControlValidationIssue};
use crate::pipeline::stage5_sessions::SessionGrouping;
use crate::pipeline::stage6_trends::{TrendOutcome, TrendSummary};
use crate::report::{ReportContext, TOOL_NAME};

#[derive(Debug, Serialize)]
struct ToolBlock {
    name: &'static str,
    version: &'static str,
}

fn tool_block() -> ToolBlock {
    ToolBlock {
        name: TOOL_NAME,
        version: env!("CARGO_PKG_VERSION"),
    }
}

#[derive(Debug, Serialize)]
struct SummaryDocument<'a> {
    tool: ToolBlock,
    sources: &'a [String],
    skipped_wells: usize,
    experiment: &'a ExperimentSummary,
    controls: ControlsBlock<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trend: Option<&'a TrendOutcome>,
}

#[derive(Debug, Serialize)]
struct ControlsBlock<'a> {
    total: usize,
    failed: usize,
    all_passed: bool,
    summary: &'a [ControlSummaryRow],
    issues: &'a [ControlValidationIssue],
}

pub fn render_summary_json(ctx: &ReportContext<'_>) -> serde_json::Result<String> {
    let doc = SummaryDocument {
        tool: tool_block(),
        sources: ctx.sources,
        skipped_wells: ctx.skipped_wells,
        experiment: ctx.summary,
        controls: ControlsBlock {
            total: ctx.controls.results.len(),
            failed: ctx.controls.issues.len(),
            all_passed: ctx.controls.all_passed(),
            summary: &ctx.controls.summary,
            issues: &ctx.controls.issues,
        },
        trend: ctx.trend,
    };
    serde_json::to_string_pretty(&doc)
}

/// One grouped experiment in `history.json`.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub sources: Vec<String>,
    #[serde(flatten)]
    pub summary: ExperimentSummary,
    pub trend: TrendOutcome,
}

#[derive(Debug, Serialize)]
struct HistoryDocument<'a> {
    tool: ToolBlock,
    experiments: &'a [HistoryEntry],
    excluded_sessions: &'a [String],
    skipped_wells: &'a [SkippedWell],
}

pub fn render_history_json(
    entries: &[HistoryEntry],
    grouping: &SessionGrouping,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&HistoryDocument {
        tool: tool_block(),
        experiments: entries,
        excluded_sessions: &grouping.excluded_sessions,
        skipped_wells: &grouping.skipped_wells,
    })
}

#[derive(Debug, Serialize)]
struct TrendsDocument<'a> {
    tool: ToolBlock,
    #[serde(skip_serializing_if = "Option::is_none")]
    test_code: Option<&'a str>,
    trends: &'a [TrendSummary],
}

pub fn render_trends_json(
    test_code: Option<&str>,
    trends: &[TrendSummary],
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&TrendsDocument {
        tool: tool_block(),
        test_code,
        trends,
    })
}
