//! Watermark manager - interactive image watermarking CLI.

mod actions;
mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod error;
mod output;
mod ports;
mod session;
mod workflow;

use std::path::Path;
use std::process;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::output::IMAGE_DIR;
use crate::workflow::Workflow;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("watermark_manager={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), error::AppError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(error::AppError::Config)?;
    debug!(path = %config_path.display(), ?config, "loaded config");

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("WATERMARK_REPLAY").ok();
    let is_recording = std::env::var("WATERMARK_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        debug!(cassette = %cassette_path, "replaying prompts");
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        debug!("recording prompts");
        let (ctx, session) = ServiceContext::recording();
        (ctx, Some(session))
    } else {
        (ServiceContext::live(), None)
    };

    let result = {
        let workflow = Workflow::new(ctx.prompter.as_ref(), IMAGE_DIR, &config.defaults);
        workflow.run().await
    };
    drop(ctx);

    // Finish recording even when the prompt channel failed
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => warn!("failed to save cassette: {e}"),
        }
    }

    let summary = result?;
    debug!(succeeded = summary.succeeded, failed = summary.failed, "workflow finished");
    Ok(())
}
