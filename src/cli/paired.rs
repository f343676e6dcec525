use std::path::PathBuf;

use clap::Args;

use crate::cli::common::{execute, CommonArgs};
use crate::cli::OutputFormat;
use crate::sampling::config::ConfigOverrides;
use crate::sampling::engine::ReadInputs;

#[derive(Args)]
pub struct PairedArgs {
    /// FASTQ file of read 1 (plain or gzip compressed)
    #[arg(required = true)]
    pub reads_1: PathBuf,

    /// FASTQ file of read 2, the mates of the reads in the first file
    #[arg(required = true)]
    pub reads_2: PathBuf,

    /// Records of the read 2 file scanned when looking for a mate
    #[arg(long)]
    pub mate_lookahead: Option<usize>,

    /// Ignore a trailing /1 or /2 when matching mate identifiers
    #[arg(long)]
    pub strip_mate_suffix: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Execute paired subcommand
///
/// # Errors
///
/// Returns an error if sampling fails or the report cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: PairedArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let inputs = ReadInputs::paired(&args.reads_1, &args.reads_2);
    let extra = ConfigOverrides {
        mate_lookahead: args.mate_lookahead,
        strip_mate_suffix: args.strip_mate_suffix.then_some(true),
        ..ConfigOverrides::default()
    };
    execute(&args.common, &inputs, &extra, format, verbose)
}
