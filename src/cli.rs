// CLI definitions using clap

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "keyboardd")]
#[command(author, version, about = "Programmable RGB keyboard/mouse command daemon")]
pub struct Cli {
    /// Path to a TOML file overriding platform constants (mode count,
    /// OUTFIFO_MAX, N_KEYS_EXTENDED, scroll bounds, device kind).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Attach as an ISO-layout device instead of the ANSI default.
    #[arg(long)]
    pub iso: bool,

    /// Start the device active instead of idle.
    #[arg(long)]
    pub active: bool,
}
