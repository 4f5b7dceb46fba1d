//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// upscaler-setup - find and cache upscaler model weights
///
/// Installs the upscaler's Python dependencies, searches the usual model
/// directories (then the whole filesystem) for NAME, and copies it into
/// the install root's models/upscalers directory.
#[derive(Parser, Debug)]
#[command(name = "upscaler-setup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Upscaler file name, e.g. RealESRGAN_x4plus.pth
    pub name: String,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Install root (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Don't fall back to a filesystem-wide search
    #[arg(long)]
    pub no_system_search: bool,

    /// Don't check or install Python dependencies
    #[arg(long)]
    pub skip_deps: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for the setup result
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable status lines
    Text,
    /// Single JSON object on stdout
    Json,
}
