use crate::pipeline::stage6_trends::{TrendOutcome, TrendSummary};
use crate::report::{ReportContext, format_f64_3, format_pct};

pub fn render_report_text(ctx: &ReportContext<'_>) -> String {
    let s = ctx.summary;
    let mut out = String::new();

    out.push_str("qPCR Result Interpretation Report\n");
    out.push_str("=================================\n\n");

    out.push_str("1. Experiment\n");
    out.push_str(&format!("Name: {}\n", s.display_name));
    out.push_str(&format!("Pattern: {}\n", s.experiment_pattern));
    out.push_str(&format!("Test: {}\n", s.test_code));
    if !ctx.sources.is_empty() {
        out.push_str(&format!("Sources: {}\n", ctx.sources.join(", ")));
    }
    out.push_str(&format!(
        "Channels: {}\n\n",
        join_channels(s.channels.iter().map(|c| c.as_str()))
    ));

    out.push_str("2. Results\n");
    out.push_str(&format!("Wells: {}\n", s.total_wells));
    out.push_str(&format!(
        "Positive: {} ({}%)\n",
        s.positive_count,
        format_pct(s.success_rate)
    ));
    for (channel, counts) in &s.channel_counts {
        out.push_str(&format!(
            "  {}: {} positive, {} negative, {} indeterminate of {}\n",
            channel, counts.positive, counts.negative, counts.indeterminate, counts.total
        ));
    }
    if !s.pathogen_breakdown.is_empty() {
        let lines: Vec<String> = s
            .pathogen_breakdown
            .iter()
            .map(|b| b.display_line())
            .collect();
        out.push_str(&format!("Pathogens: {}\n", lines.join(" | ")));
    }
    if ctx.skipped_wells > 0 {
        out.push_str(&format!(
            "Skipped wells (no usable id or channel): {}\n",
            ctx.skipped_wells
        ));
    }
    out.push('\n');

    out.push_str("3. Channel completeness\n");
    out.push_str(&format!(
        "Required: {}\n",
        join_channels(s.completeness.required_channels.iter().map(|c| c.as_str()))
    ));
    out.push_str(&format!(
        "Completion: {}%\n",
        format_pct(s.completeness.completion_rate)
    ));
    if s.completeness.is_complete {
        out.push_str("Status: complete\n\n");
    } else {
        out.push_str(&format!(
            "Status: incomplete, missing {}\n\n",
            join_channels(s.completeness.missing_channels.iter().map(|c| c.as_str()))
        ));
    }

    out.push_str("4. Controls\n");
    if ctx.controls.results.is_empty() {
        out.push_str("No control wells found.\n");
    } else {
        for row in &ctx.controls.summary {
            out.push_str(&format!(
                "{} {}{}: {} passed, {} failed\n",
                row.channel,
                row.control_type.short_code(),
                row.set_number,
                row.passed,
                row.failed
            ));
        }
        for issue in &ctx.controls.issues {
            out.push_str(&format!(
                "FAILED {} {} ({}): expected {}, got {} (amp {})\n",
                issue.well_coordinate,
                issue.channel,
                issue.sample_name,
                issue.expected,
                issue.actual,
                format_f64_3(issue.amplitude)
            ));
        }
    }
    out.push('\n');

    if let Some(trend) = ctx.trend {
        out.push_str("5. Trends\n");
        out.push_str(&format!("{}\n", trend_statement(trend)));
    }

    out
}

pub fn trend_statement(outcome: &TrendOutcome) -> String {
    match outcome {
        TrendOutcome::Recorded { records } => format!("Recorded {records} trend record(s)."),
        TrendOutcome::Skipped { missing_channels } => format!(
            "Not recorded: missing {}.",
            join_channels(missing_channels.iter().map(|c| c.as_str()))
        ),
    }
}

/// Plain table for the `trends` command.
pub fn render_trends_table(trends: &[TrendSummary]) -> String {
    let mut out = String::from("test\tchannel\ttarget\texperiments\ttotal\tpositive\tpositive_pct\n");
    for t in trends {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\n",
            t.test_code,
            t.channel,
            t.target,
            t.experiments,
            t.counts.total,
            t.counts.positive,
            format_pct(t.positive_percentage)
        ));
    }
    out
}

fn join_channels<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let names: Vec<&str> = names.collect();
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}
