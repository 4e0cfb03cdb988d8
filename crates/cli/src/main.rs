//! CLI entry point for hashring-cli.

use clap::Parser;
use hashring_cli::CliConfig;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    config.run()
}
