use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod consensus;
mod core;
mod discovery;
mod parsing;
mod pipeline;
mod report;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("denv_qc=debug,info")
    } else {
        EnvFilter::new("denv_qc=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Run(args) => cli::run::run(&args)?,
        cli::Commands::Samples(args) => cli::samples::run(&args)?,
        cli::Commands::Mask(args) => cli::mask::run(&args)?,
        cli::Commands::Select(args) => cli::select::run(&args)?,
    }

    Ok(())
}
