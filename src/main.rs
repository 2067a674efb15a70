use clap::Parser;
use eyre::Result;
use tracing_subscriber::{fmt, EnvFilter};

mod cmd;

fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cmd::Args::parse();

    cmd::run(args)
}
