//! CLI argument parsing with clap.

use clap::Parser;

/// Interactive watermark manager. Put your images in `./img` and follow the
/// prompts.
#[derive(Parser, Debug)]
#[command(name = "watermark-manager", version)]
pub struct Cli {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}
