use std::process::ExitCode;

use clap::Parser;

use academy_admin::cli::Cli;
use academy_admin::{commands, logging, AppConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("오류: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    logging::init(&config.logging);
    commands::run(cli.command, &config).await
}
