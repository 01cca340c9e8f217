use clap::Parser;
use snafu::{ResultExt, Snafu};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

mod command;

/// The environment variable used to configure the log level of the console output.
const LOG_ENV_VAR: &str = "DURATIONCTL_LOG";

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to run command"))]
    Run { source: command::Error },
}

/// Parse, convert and compute with durations.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Print resulting durations in the ISO-8601 format.
    #[arg(long, global = true)]
    iso: bool,

    #[command(subcommand)]
    command: command::Command,
}

#[snafu::report]
fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    let env_filter = EnvFilter::builder()
        .with_env_var(LOG_ENV_VAR)
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(env_filter),
        )
        .init();

    tracing::debug!(?cli, "running command");

    let output = cli.command.run(cli.iso).context(RunSnafu)?;
    println!("{output}");

    Ok(())
}
