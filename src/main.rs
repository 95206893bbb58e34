use std::io::{IsTerminal, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use sitepulse::cli::Cli;
use sitepulse::config::load_config;
use sitepulse::coordinator::Coordinator;
use sitepulse::error::{AppError, AppResult};
use sitepulse::http_probe::prelude::*;
use sitepulse::logger::{LogHold, init_logging};
use sitepulse::render::{RenderMode, TerminalInfo, build_renderer};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is the normal case.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let default_level = if cli.mode == RenderMode::Log { "info" } else { "warn" };
    let log_hold = init_logging(cli.verbose, default_level, cli.no_color);

    match run(&cli, &log_hold).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Config(err)) => {
            eprintln!("Error loading config: {err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, log_hold: &LogHold) -> AppResult<()> {
    let app = load_config(&cli.config)?;
    let targets = app.config.targets();

    let transport =
        HttpTransport::new(app.timeout).map_err(|source| AppError::BuildClient { source })?;
    let coordinator = Coordinator::new(Arc::new(transport), app.timeout, app.retry);

    let terminal = TerminalInfo::stdout();
    let mode = cli.mode.select(&terminal, targets.len());
    let mut renderer = build_renderer(mode, &terminal, cli.no_color);

    // Log lines between live rows would shift the rows the renderer moves
    // the cursor back to.
    if mode == RenderMode::Live {
        log_hold.hold();
    }
    coordinator.run(&targets, renderer.as_mut()).await;
    log_hold.release_to(&mut std::io::stderr())?;

    if cli.pause {
        wait_for_enter().await?;
    }
    Ok(())
}

async fn wait_for_enter() -> AppResult<()> {
    if !std::io::stdin().is_terminal() {
        return Ok(());
    }

    let mut stdout = std::io::stdout();
    write!(stdout, "Press Enter to exit...")?;
    stdout.flush()?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(())
}
