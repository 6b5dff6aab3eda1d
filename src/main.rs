use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod extract;
mod ranking;
mod text;
mod utils;
mod web;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("resume_ranker=debug,info")
    } else {
        EnvFilter::new("resume_ranker=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Rank(args) => {
            cli::rank::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Coverage(args) => {
            cli::coverage::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args)?;
        }
    }

    Ok(())
}
