use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use medbill_cli::{Cli, Config, Outcome, config, open_source, run};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    medbill_observability::init(config::log_format(cli.log_format.as_deref()));

    let config = Config::from_cli(&cli);
    let source = open_source(&config);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let outcome = run(
        cli.command,
        &config,
        source.as_ref(),
        chrono::Utc::now(),
        &mut stdout.lock(),
        &mut stderr.lock(),
    )?;

    Ok(match outcome {
        Outcome::Success => ExitCode::SUCCESS,
        Outcome::Rejected => ExitCode::from(2),
    })
}
