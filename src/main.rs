mod config;
mod error;
mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use crate::config::{ConfigLayer, PrefixList, RunConfig, load_config_file};
use crate::error::RunError;
use crate::pipeline::run_pipeline;
use crate::report::{SummaryData, format_f64_6};

#[derive(Parser, Debug)]
#[command(name = "kira-photoqc")]
#[command(version)]
#[command(about = "Weighted multi-label photo quality scoring and bucket triage", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score, bucket and copy images into `<out>/<lo>-<hi>/`
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Inference results table (CSV, `.gz` allowed)
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Directory holding the source images
    #[arg(long)]
    images: Option<PathBuf>,

    /// Output root; wiped and rebuilt on every run
    #[arg(long)]
    out: Option<PathBuf>,

    /// JSON config file; command-line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Comma-separated label weights in table column order
    #[arg(long, value_delimiter = ',')]
    weights: Option<Vec<f64>>,

    /// Number of equal-width buckets over [0, 100]
    #[arg(long)]
    buckets: Option<usize>,

    /// Gain curve strength applied to every label score
    #[arg(long)]
    gain_k: Option<f64>,

    /// Disable the gain curve even if the config file sets one
    #[arg(long, conflicts_with = "gain_k")]
    no_gain: bool,

    /// Skip filenames starting with this prefix (repeatable)
    #[arg(long = "filter-prefix")]
    filter_prefix: Vec<String>,

    /// Where scores.tsv, summary.json and report.txt go (default: --out)
    #[arg(long)]
    report_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl RunArgs {
    fn to_layer(&self) -> ConfigLayer {
        ConfigLayer {
            scores_path: self.scores.clone(),
            source_image_dir: self.images.clone(),
            output_root: self.out.clone(),
            report_dir: self.report_dir.clone(),
            label_weights: self.weights.clone(),
            num_buckets: self.buckets,
            gain_k: self.gain_k,
            filtered_filename_prefix: if self.filter_prefix.is_empty() {
                None
            } else {
                Some(PrefixList::Many(self.filter_prefix.clone()))
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => {
            logging::init_logging(&args.log_level);
            match run(&args) {
                Ok(summary) => {
                    print_summary(&summary);
                    ExitCode::SUCCESS
                }
                Err(err) => report_failure(&err),
            }
        }
    }
}

/// Fatal errors must reach the user even when logging is filtered off.
fn report_failure(err: &RunError) -> ExitCode {
    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!("{err}");
    } else {
        eprintln!("error: {err}");
    }
    ExitCode::FAILURE
}

fn run(args: &RunArgs) -> Result<SummaryData, RunError> {
    let file_layer = match &args.config {
        Some(path) => load_config_file(path)?,
        None => ConfigLayer::default(),
    };
    let config = RunConfig::from_layer(args.to_layer().over(file_layer), args.no_gain)?;
    run_pipeline(&config)
}

fn print_summary(summary: &SummaryData) {
    for b in &summary.buckets {
        tracing::info!(
            "bucket {}: copied={} filtered={} errors={}",
            b.label,
            b.copied,
            b.skipped_filtered,
            b.skipped_error
        );
    }
    if summary.totals.skipped_error > 0 {
        tracing::warn!(
            "{} image(s) could not be copied; see scores.tsv",
            summary.totals.skipped_error
        );
    }
    println!(
        "rows={} copied={} filtered={} no_bucket={} errors={} median_score={}",
        summary.totals.rows,
        summary.totals.copied,
        summary.totals.skipped_filtered,
        summary.totals.skipped_no_bucket,
        summary.totals.skipped_error,
        format_f64_6(summary.scores.median)
    );
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
