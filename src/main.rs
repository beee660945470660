mod input;
mod logging;
mod model;
mod naming;
mod pipeline;
mod report;
mod store;
mod targets;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::input::{InputError, load_batch};
use crate::model::controls::ControlLayout;
use crate::model::experiment::EngineError;
use crate::pipeline::AnalysisContext;
use crate::pipeline::stage1_resolve::run_stage1;
use crate::pipeline::stage2_classify::run_stage2;
use crate::pipeline::stage3_combine::{combine, run_stage3};
use crate::pipeline::stage4_controls::run_stage4;
use crate::pipeline::stage5_sessions::{group_sessions, session_from_batch};
use crate::pipeline::stage6_trends::{aggregate_trends, record_trends};
use crate::pipeline::stage7_report::{Stage7Input, write_history, write_reports, write_trends};
use crate::report::json::HistoryEntry;
use crate::report::text::render_trends_table;
use crate::store::{JsonDirStore, SessionStore, StoreError, StoredSession};
use crate::targets::TargetLibrary;
use crate::targets::loader::{LibraryError, load_library};

#[derive(Parser, Debug)]
#[command(
    name = "kira-qpcrqc",
    version,
    about = "qPCR result interpretation: curve labels, control checks, channel completeness and trends",
    long_about = None
)]
struct Cli {
    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify, validate controls and combine the channel files of one run
    Analyze(AnalyzeArgs),
    /// Group stored sessions into experiments and record their trends
    History(HistoryArgs),
    /// Aggregate recorded trend data per test and channel
    Trends(TrendsArgs),
}

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// Well batch files (.json or .json.gz), one per channel export
    #[arg(long = "input", required = true, num_args = 1.., value_hint = ValueHint::FilePath)]
    inputs: Vec<PathBuf>,

    #[arg(long, value_hint = ValueHint::DirPath)]
    out: PathBuf,

    /// Session store directory; sessions are saved and trends recorded there
    #[arg(long, value_hint = ValueHint::DirPath)]
    store: Option<PathBuf>,

    /// Replacement target library (JSON)
    #[arg(long, value_hint = ValueHint::FilePath)]
    targets: Option<PathBuf>,

    /// Detect controls from sample names only
    #[arg(long, action = ArgAction::SetTrue)]
    no_coordinate_controls: bool,
}

#[derive(Parser, Debug)]
struct HistoryArgs {
    #[arg(long, value_hint = ValueHint::DirPath)]
    store: PathBuf,

    #[arg(long, value_hint = ValueHint::DirPath)]
    out: PathBuf,

    #[arg(long, value_hint = ValueHint::FilePath)]
    targets: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct TrendsArgs {
    #[arg(long, value_hint = ValueHint::DirPath)]
    store: PathBuf,

    /// Restrict to one test code (e.g. BVAB)
    #[arg(long)]
    test: Option<String>,

    #[arg(long, value_hint = ValueHint::DirPath)]
    out: Option<PathBuf>,

    #[arg(long, value_hint = ValueHint::FilePath)]
    targets: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
enum RunConfig {
    Analyze {
        inputs: Vec<PathBuf>,
        out_dir: PathBuf,
        store_dir: Option<PathBuf>,
        targets: Option<PathBuf>,
        coordinate_controls: bool,
    },
    History {
        store_dir: PathBuf,
        out_dir: PathBuf,
        targets: Option<PathBuf>,
    },
    Trends {
        store_dir: PathBuf,
        test_code: Option<String>,
        out_dir: Option<PathBuf>,
        targets: Option<PathBuf>,
    },
}

impl From<Command> for RunConfig {
    fn from(command: Command) -> Self {
        match command {
            Command::Analyze(args) => RunConfig::Analyze {
                inputs: args.inputs,
                out_dir: args.out,
                store_dir: args.store,
                targets: args.targets,
                coordinate_controls: !args.no_coordinate_controls,
            },
            Command::History(args) => RunConfig::History {
                store_dir: args.store,
                out_dir: args.out,
                targets: args.targets,
            },
            Command::Trends(args) => RunConfig::Trends {
                store_dir: args.store,
                test_code: args.test,
                out_dir: args.out,
                targets: args.targets,
            },
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Library(#[from] LibraryError),
    #[error("failed to write reports to {}: {source}", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "kira-qpcrqc starting");

    if let Err(err) = run(RunConfig::from(cli.command)) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(config: RunConfig) -> Result<(), AppError> {
    match config {
        RunConfig::Analyze {
            inputs,
            out_dir,
            store_dir,
            targets,
            coordinate_controls,
        } => run_analyze(
            &inputs,
            &out_dir,
            store_dir.as_deref(),
            targets.as_deref(),
            coordinate_controls,
        ),
        RunConfig::History {
            store_dir,
            out_dir,
            targets,
        } => run_history(&store_dir, &out_dir, targets.as_deref()),
        RunConfig::Trends {
            store_dir,
            test_code,
            out_dir,
            targets,
        } => run_trends(
            &store_dir,
            test_code.as_deref(),
            out_dir.as_deref(),
            targets.as_deref(),
        ),
    }
}

fn run_analyze(
    inputs: &[PathBuf],
    out_dir: &Path,
    store_dir: Option<&Path>,
    targets: Option<&Path>,
    coordinate_controls: bool,
) -> Result<(), AppError> {
    let library = load_target_library(targets)?;
    let layout = if coordinate_controls {
        ControlLayout::default_v1()
    } else {
        ControlLayout::empty()
    };
    tracing::debug!(positions = layout.len(), "control plate layout");
    let ctx = AnalysisContext::new(&library, &layout);

    let batches = inputs
        .iter()
        .map(|path| load_batch(path))
        .collect::<Result<Vec<_>, _>>()?;
    let stage1 = run_stage1(&batches)?;
    let stage2 = run_stage2(&stage1.experiment, &ctx.thresholds);
    let combined = run_stage3(&stage1.experiment, &stage2, &ctx);
    let controls = run_stage4(&combined, ctx.control_layout);

    let trend = match store_dir {
        Some(dir) => {
            let mut store = JsonDirStore::open(dir)?;
            for batch in stage1.batches.iter().filter(|b| !b.observations.is_empty()) {
                store.save_session(session_from_batch(batch))?;
            }
            let timestamp = stage1
                .batches
                .iter()
                .filter_map(|b| b.upload_timestamp.as_deref())
                .max();
            Some(record_trends(&combined, timestamp, &mut store)?)
        }
        None => None,
    };

    let sources: Vec<String> = batches.iter().map(|b| b.name.clone()).collect();
    let input = Stage7Input {
        combined: &combined,
        controls: &controls,
        sources: &sources,
        skipped: &stage1.skipped,
        trend: trend.as_ref(),
    };
    write_reports(&input, out_dir).map_err(|source| AppError::Report {
        path: out_dir.to_path_buf(),
        source,
    })?;

    tracing::info!(
        pattern = %combined.experiment_pattern,
        wells = combined.total_wells,
        positive = combined.positive_count,
        complete = combined.is_complete(),
        failed_controls = controls.issues.len(),
        "analysis finished"
    );
    Ok(())
}

fn run_history(store_dir: &Path, out_dir: &Path, targets: Option<&Path>) -> Result<(), AppError> {
    let library = load_target_library(targets)?;
    let layout = ControlLayout::default_v1();
    let ctx = AnalysisContext::new(&library, &layout);

    let mut store = JsonDirStore::open(store_dir)?;
    let sessions = store.list_sessions()?;
    let grouping = group_sessions(&sessions);
    let timestamps = session_timestamps(&sessions);

    let mut entries = Vec::with_capacity(grouping.groups.len());
    for group in &grouping.groups {
        let combined = combine(&group.experiment, &ctx);
        let latest = group
            .sources
            .iter()
            .filter_map(|name| timestamps.get(name.as_str()).copied().flatten())
            .max();
        let trend = record_trends(&combined, latest, &mut store)?;
        entries.push(HistoryEntry {
            sources: group.sources.clone(),
            summary: combined.summary(),
            trend,
        });
    }

    write_history(&entries, &grouping, out_dir).map_err(|source| AppError::Report {
        path: out_dir.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn run_trends(
    store_dir: &Path,
    test_code: Option<&str>,
    out_dir: Option<&Path>,
    targets: Option<&Path>,
) -> Result<(), AppError> {
    let library = load_target_library(targets)?;
    let store = JsonDirStore::open(store_dir)?;
    if let Some(code) = test_code.filter(|code| !library.contains_test(code)) {
        tracing::warn!(test = code, "test code is not in the target library");
    }
    let records = store.trend_records(test_code)?;
    let summaries = aggregate_trends(&records, &library);

    print!("{}", render_trends_table(&summaries));
    if let Some(dir) = out_dir {
        write_trends(test_code, &summaries, dir).map_err(|source| AppError::Report {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

fn load_target_library(path: Option<&Path>) -> Result<TargetLibrary, LibraryError> {
    match path {
        Some(path) => {
            let library = load_library(path)?;
            if library.is_empty() {
                tracing::warn!(path = %path.display(), "target library file defines no tests");
            }
            tracing::info!(path = %path.display(), tests = library.len(), "using target library file");
            Ok(library)
        }
        None => Ok(TargetLibrary::builtin()),
    }
}

fn session_timestamps(sessions: &[StoredSession]) -> BTreeMap<&str, Option<&str>> {
    sessions
        .iter()
        .map(|s| (s.name.as_str(), s.upload_timestamp.as_deref()))
        .collect()
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
