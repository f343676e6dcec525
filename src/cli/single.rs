use std::path::PathBuf;

use clap::Args;

use crate::cli::common::{execute, CommonArgs};
use crate::cli::OutputFormat;
use crate::sampling::config::ConfigOverrides;
use crate::sampling::engine::ReadInputs;

#[derive(Args)]
pub struct SingleArgs {
    /// FASTQ file of single-end reads (plain or gzip compressed)
    #[arg(required = true)]
    pub reads: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Execute single subcommand
///
/// # Errors
///
/// Returns an error if sampling fails or the report cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SingleArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let inputs = ReadInputs::single(&args.reads);
    execute(
        &args.common,
        &inputs,
        &ConfigOverrides::default(),
        format,
        verbose,
    )
}
