use clap::Parser;
use tracing_subscriber::EnvFilter;

use libguess::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("libguess=debug,info")
    } else {
        EnvFilter::new("libguess=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Single(args) => {
            cli::single::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Paired(args) => {
            cli::paired::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
