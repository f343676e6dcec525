use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::aligner::blat::{BlatAligner, BlatConfig, DEFAULT_EXECUTABLE, DEFAULT_REFERENCE_DIR};
use crate::cli::report::print_verdict;
use crate::cli::OutputFormat;
use crate::sampling::config::{ConfigOverrides, SamplingConfig};
use crate::sampling::engine::{ReadInputs, SamplingEngine};

/// Options shared by the single and paired commands
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Reference transcript file, resolved inside --reference-dir
    #[arg(short, long, required = true)]
    pub reference: String,

    /// Directory holding the reference sequences
    #[arg(long, default_value = DEFAULT_REFERENCE_DIR)]
    pub reference_dir: PathBuf,

    /// Aligner executable
    #[arg(long, default_value = DEFAULT_EXECUTABLE)]
    pub aligner: PathBuf,

    /// Extra argument passed to the aligner before the reference (repeatable)
    #[arg(long = "aligner-arg", allow_hyphen_values = true)]
    pub aligner_args: Vec<String>,

    /// Directory for per-alignment temporary files (system default if unset)
    #[arg(long)]
    pub scratch_dir: Option<PathBuf>,

    /// JSON file overriding sampling budgets and thresholds
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Confident observations to collect before deciding
    #[arg(long)]
    pub target: Option<usize>,

    /// Maximum number of read-1 alignments before giving up
    #[arg(long)]
    pub max_attempts: Option<usize>,

    /// Number of records to skip at the start of the (first) read file
    #[arg(long)]
    pub start_offset: Option<u64>,
}

impl CommonArgs {
    pub fn blat_config(&self) -> BlatConfig {
        BlatConfig {
            executable: self.aligner.clone(),
            args: self.aligner_args.clone(),
            reference_dir: self.reference_dir.clone(),
            scratch_dir: self.scratch_dir.clone(),
        }
    }

    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            target_confident: self.target,
            max_attempts: self.max_attempts,
            start_offset: self.start_offset,
            ..ConfigOverrides::default()
        }
    }

    /// Mode defaults, then the config file, then command-line flags
    fn sampling_config(
        &self,
        inputs: &ReadInputs,
        extra: &ConfigOverrides,
    ) -> anyhow::Result<SamplingConfig> {
        let mut config = SamplingConfig::for_mode(inputs.mode());

        if let Some(path) = &self.config {
            config = config.with_overrides(&ConfigOverrides::load_from_file(path)?);
        }

        let config = config
            .with_overrides(&self.overrides())
            .with_overrides(extra);
        config.validate()?;
        Ok(config)
    }
}

/// Run sampling for the given inputs and print the verdict
///
/// # Errors
///
/// Returns an error if the configuration is invalid, a read file is
/// malformed, or the aligner fails.
pub fn execute(
    common: &CommonArgs,
    inputs: &ReadInputs,
    extra: &ConfigOverrides,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let config = common.sampling_config(inputs, extra)?;

    info!(
        reference = %common.reference,
        aligner = %common.aligner.display(),
        target = config.target_confident,
        max_attempts = config.max_attempts,
        "Starting {} sampling",
        inputs.mode()
    );

    let mut engine = SamplingEngine::new(BlatAligner::new(common.blat_config()), config);
    let verdict = engine.infer(&common.reference, inputs)?;

    print_verdict(
        &verdict,
        &common.reference,
        engine.config(),
        format,
        verbose,
    )
}
