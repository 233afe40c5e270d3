//! Inclino CLI - Command line tool for correcting and tabulating
//! inclinometer campaign data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "inclino-cli",
    version,
    about = "Inclinometer bias correction and report table toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: inclino_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Starting inclino-cli");
    inclino_cmd::run(cli.command)
}
