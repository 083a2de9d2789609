//! Command line front end for `max72xx-chain`.
//!
//! Reads a capture in the plain-text event format (optionally gzipped) and
//! prints the decoded register writes or the reconstructed display state of
//! every chip on the chain.

mod cui;

use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use flate2::read::GzDecoder;
use max72xx_chain::{ChainConfig, DeviceType, TransferEvent};

#[derive(Parser, Debug)]
#[command(
    name = "max72xx-chain",
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Chain options shared by all subcommands.
#[derive(Args, Debug)]
struct ChainArgs {
    /// Device type: MAX7219 or MAX7221
    #[arg(long = "device-type", default_value = "MAX7219", value_parser = parse_device_type)]
    device_type: DeviceType,

    /// Number of devices sharing the chip-select line
    #[arg(long = "chain-length", default_value_t = 1)]
    chain_length: u32,
}

impl ChainArgs {
    fn config(&self) -> Result<ChainConfig> {
        ChainConfig::new(self.device_type, self.chain_length).context("invalid chain options")
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a capture and print one row per register write
    Decode {
        /// Capture file (.txt or .gz; use '-' for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        chain: ChainArgs,

        /// Print aligned plain text instead of a table
        #[arg(long)]
        plain: bool,
    },
    /// Replay a capture and print the final state of every device
    State {
        /// Capture file (.txt or .gz; use '-' for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        chain: ChainArgs,
    },
}

fn parse_device_type(s: &str) -> Result<DeviceType, String> {
    s.parse::<DeviceType>().map_err(|e| e.to_string())
}

/// Read a capture file, transparently decompressing `.gz` input (detected by
/// extension or by the gzip magic bytes). `-` reads stdin.
fn load_bytes_from_path(path: &Path) -> Result<Vec<u8>> {
    let data = if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        fs::read(path).with_context(|| format!("failed to read file: {}", path.display()))?
    };

    let is_gzip = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
        || (data.len() >= 2 && data[0] == 0x1f && data[1] == 0x8b);

    if is_gzip {
        let mut decoder = GzDecoder::new(Cursor::new(data));
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .context("gzip decompression failed")?;
        Ok(out)
    } else {
        Ok(data)
    }
}

/// Load and parse a capture into transfer events.
fn load_capture(path: &Path) -> Result<Vec<TransferEvent>> {
    let bytes = load_bytes_from_path(path)?;
    let text = String::from_utf8(bytes)
        .with_context(|| format!("capture is not valid UTF-8: {}", path.display()))?;
    let events = max72xx_chain::capture::parse_capture(&text)
        .with_context(|| format!("failed to parse capture: {}", path.display()))?;
    log::info!("loaded {} events from {}", events.len(), path.display());
    Ok(events)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Decode { file, chain, plain } => {
            let config = chain.config()?;
            let events = load_capture(&file)?;
            cui::decode::print_decode(&file, config, events, plain)?;
        }
        Commands::State { file, chain } => {
            let config = chain.config()?;
            let events = load_capture(&file)?;
            cui::state::print_state(&file, config, events)?;
        }
    }

    Ok(())
}
