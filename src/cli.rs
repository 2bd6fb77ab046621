use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "localnet-chat",
    about = "Local-network chat demo with AI stickers (TUI)"
)]
pub struct Cli {
    /// Path to config file (default: ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start TUI shell
    Run,
    /// Generate one AI sticker and write it to a file
    Generate {
        /// What the sticker should show
        prompt: String,
        /// Output file; the image extension is added when missing
        #[arg(short, long, default_value = "sticker.png")]
        out: PathBuf,
    },
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}
