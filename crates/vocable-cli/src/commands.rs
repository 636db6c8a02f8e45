//! Available subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Available commands for vocable.
#[derive(Subcommand)]
pub enum Commands {
    /// Estimate how long text takes to speak
    Estimate {
        /// Text to measure (`-` reads stdin)
        text: String,
        /// Speaking rate multiplier (defaults to the configured rate)
        #[arg(short, long)]
        rate: Option<f32>,
    },

    /// Synthesize text through the fallback endpoint and save it
    Export(ExportArgs),

    /// Print the effective settings as JSON
    Config,
}

/// Arguments for `vocable export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Text to speak (`-` reads stdin)
    pub text: String,

    /// Voice name passed to the endpoint
    #[arg(long)]
    pub voice: Option<String>,

    #[arg(long)]
    pub rate: Option<f32>,

    #[arg(long)]
    pub pitch: Option<f32>,

    #[arg(long)]
    pub volume: Option<f32>,

    /// Fallback synthesis endpoint (overrides VOCABLE_FALLBACK_URL)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Directory to save into (overrides VOCABLE_DOWNLOAD_DIR)
    #[arg(long = "out-dir")]
    pub out_dir: Option<PathBuf>,

    /// Filename to save as (defaults to speech-<unix-millis>.wav)
    #[arg(long)]
    pub filename: Option<String>,
}
