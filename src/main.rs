mod error;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::AppError;
use crate::input::{CsvRecordSource, RecordSource};
use crate::model::bands::BandConfig;
use crate::pipeline::InvalidRecordPolicy;
use crate::pipeline::stage1_classify::classify;
use crate::pipeline::stage3_rank_gaps::{analyze, analyze_with_policy};
use crate::pipeline::stage4_report::{Stage4Input, build_report_context, write_reports};
use crate::report::text::render_report_text;

#[derive(Debug, Parser)]
#[command(
    name = "kira-scorebands",
    version,
    about = "Score-band classification and rank-gap analysis of id,name,score records"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify and rank the records in a CSV file.
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// CSV file with an `id,name,score` header (optionally `.gz`).
    #[arg(long)]
    input: PathBuf,
    /// Directory for report.txt, summary.json and ranking.tsv.
    #[arg(long)]
    out: Option<PathBuf>,
    /// JSON band configuration; built-in tables are used when omitted.
    #[arg(long)]
    bands: Option<PathBuf>,
    /// Skip records with non-finite scores instead of failing.
    #[arg(long)]
    skip_invalid: bool,
    /// Number of top-ranked records in the summary.
    #[arg(long, default_value_t = 3)]
    top: usize,
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RunConfig {
    input: PathBuf,
    out_dir: Option<PathBuf>,
    bands_path: Option<PathBuf>,
    policy: InvalidRecordPolicy,
    top_n: usize,
    verbose: bool,
}

fn main() {
    let config = match parse_args(std::env::args_os()) {
        Ok(config) => config,
        Err(err) => err.exit(),
    };
    logging::init(config.verbose);
    if let Err(err) = run(&config) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn parse_args<I, T>(args: I) -> Result<RunConfig, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;
    let Command::Run(run) = cli.command;
    Ok(RunConfig {
        input: run.input,
        out_dir: run.out,
        bands_path: run.bands,
        policy: if run.skip_invalid {
            InvalidRecordPolicy::Skip
        } else {
            InvalidRecordPolicy::FailFast
        },
        top_n: run.top,
        verbose: run.verbose,
    })
}

fn run(config: &RunConfig) -> Result<(), AppError> {
    let source = CsvRecordSource::new(&config.input);
    run_with_source(config, &source)
}

fn run_with_source(config: &RunConfig, source: &dyn RecordSource) -> Result<(), AppError> {
    let bands = match &config.bands_path {
        Some(path) => BandConfig::load(path)?,
        None => BandConfig::default(),
    };
    bands.validate()?;

    let (records, import) = source.load()?;

    tracing::info!("invalid-record policy: {}", config.policy.name());
    let performance = classify(&records, &bands.performance, config.policy)?;
    let grades = classify(&records, &bands.letter_grade, config.policy)?;
    let ranking = match config.policy {
        InvalidRecordPolicy::FailFast => analyze(&records)?,
        policy => analyze_with_policy(&records, policy)?,
    };
    if performance.skipped_count() > 0 {
        tracing::warn!(
            "{} records with non-finite scores were skipped",
            performance.skipped_count()
        );
    }

    let input = Stage4Input {
        source: source.describe(),
        import,
        policy: config.policy,
        top_n: config.top_n,
        records: &records,
        performance: &performance,
        grades: &grades,
        ranking: &ranking,
        tool_name: "kira-scorebands".to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    let ctx = build_report_context(&input);

    print!("{}", render_report_text(&ctx));

    if let Some(out_dir) = &config.out_dir {
        write_reports(&ctx, out_dir)?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
