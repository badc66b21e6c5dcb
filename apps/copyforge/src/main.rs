mod cli;
mod config;
mod errors;
mod export;
mod generation;
mod history;
mod llm_client;
mod render;
mod state;

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::errors::AppError;
use crate::generation::handlers;
use crate::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e:#}");
            return ExitCode::from(78);
        }
    };

    // Logs go to stderr; stdout carries only generated content.
    let filter = if cli.verbose {
        EnvFilter::new(format!("{}=debug", env!("CARGO_PKG_NAME")))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        })
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("Starting CopyForge v{}", env!("CARGO_PKG_VERSION"));

    match run(cli.command, config).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            let report = e.report();
            eprintln!("Error [{}]: {}", report.code, report.message);
            ExitCode::from(report.exit_code)
        }
    }
}

async fn run(command: Command, config: Config) -> Result<String, AppError> {
    let mut state = AppState::from_config(config)?;
    match &state.llm {
        Some(llm) => debug!(
            "LLM client ready (text: {}, vision: {})",
            llm.text_model(),
            llm.vision_model()
        ),
        None => debug!("No API key configured; generation commands are unavailable"),
    }

    match command {
        Command::Copy(args) => handlers::handle_copy(&mut state, args).await,
        Command::BrandKit(args) => handlers::handle_brand_kit(&mut state, args).await,
        Command::Analyze(args) => handlers::handle_analyze(&state, args).await,
        Command::History(command) => handlers::handle_history(&mut state, command).await,
    }
}
