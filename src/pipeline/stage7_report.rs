use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::controls::ControlSource;
use crate::pipeline::stage1_resolve::SkippedWell;
use crate::pipeline::stage3_combine::CombinedExperimentResult;
use crate::pipeline::stage4_controls::ControlReport;
use crate::pipeline::stage5_sessions::SessionGrouping;
use crate::pipeline::stage6_trends::{TrendOutcome, TrendSummary};
use crate::report::json::{
    HistoryEntry, render_history_json, render_summary_json, render_trends_json,
};
use crate::report::text::render_report_text;
use crate::report::{ReportContext, format_optional, tsv_field};

#[derive(Debug, Clone)]
pub struct Stage7Input<'a> {
    pub combined: &'a CombinedExperimentResult,
    pub controls: &'a ControlReport,
    pub sources: &'a [String],
    pub skipped: &'a [SkippedWell],
    pub trend: Option<&'a TrendOutcome>,
}

pub fn write_reports(input: &Stage7Input<'_>, out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    write_results_tsv(input, &out_dir.join("results.tsv"))?;
    write_controls_tsv(input.controls, &out_dir.join("controls.tsv"))?;

    let summary = input.combined.summary();
    let ctx = ReportContext {
        summary: &summary,
        controls: input.controls,
        sources: input.sources,
        skipped_wells: input.skipped.len(),
        trend: input.trend,
    };
    write_text(&out_dir.join("summary.json"), &render_summary_json(&ctx)?)?;
    write_text(&out_dir.join("report.txt"), &render_report_text(&ctx))?;

    tracing::info!(out = %out_dir.display(), "wrote analysis reports");
    Ok(())
}

fn write_results_tsv(input: &Stage7Input<'_>, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = [
        "coordinate",
        "channel",
        "sample",
        "amplitude",
        "cq",
        "anomalies",
        "label",
        "target",
        "control",
    ];
    writeln!(w, "{}", header.join("\t"))?;

    for (key, well) in &input.combined.wells {
        let obs = &well.observation;
        let control = input
            .controls
            .control_for(*key)
            .map(|c| format!("{}{}", c.control_type.short_code(), c.set_number))
            .unwrap_or_default();
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            obs.well_coordinate,
            obs.channel,
            tsv_field(&obs.sample_name),
            format_optional(obs.amplitude),
            format_optional(obs.cq_value),
            tsv_field(&obs.anomalies.describe()),
            well.label,
            tsv_field(&well.target),
            control
        )?;
    }
    w.flush()
}

fn write_controls_tsv(controls: &ControlReport, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(
        w,
        "coordinate\tchannel\tsample\tcontrol_type\tset\tsource\texpected\tactual\tvalid\tamplitude"
    )?;
    for r in &controls.results {
        let source = match r.source {
            ControlSource::SampleName => "sample_name",
            ControlSource::PlateCoordinate => "plate_coordinate",
        };
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.3}",
            r.well_coordinate,
            r.channel,
            tsv_field(&r.sample_name),
            r.control_type,
            r.set_number,
            source,
            r.expected,
            r.actual,
            r.is_valid,
            r.amplitude
        )?;
    }
    w.flush()
}

pub fn write_history(
    entries: &[HistoryEntry],
    grouping: &SessionGrouping,
    out_dir: &Path,
) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;
    write_text(
        &out_dir.join("history.json"),
        &render_history_json(entries, grouping)?,
    )?;
    tracing::info!(out = %out_dir.display(), experiments = entries.len(), "wrote history");
    Ok(())
}

pub fn write_trends(
    test_code: Option<&str>,
    trends: &[TrendSummary],
    out_dir: &Path,
) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;
    write_text(
        &out_dir.join("trends.json"),
        &render_trends_json(test_code, trends)?,
    )
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage7_report.rs"]
mod tests;
