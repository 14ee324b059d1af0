use anyhow::Context;
use clap::{Parser, Subcommand};
use maxrf_rs::logging::{init_enhanced_logging, init_logger, log_warn};
use maxrf_rs::util::hex::decode_hex;
use maxrf_rs::util::logging::debug::log_receive_stats;
use maxrf_rs::{DeviceRegistry, DeviceTableReport, MessageReport, Receiver, RegistryConfig};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "maxrf-cli")]
#[command(about = "CLI tool for MAX! heating control radio traffic")]
struct Cli {
    /// JSON file with the registry capacity and known devices
    #[arg(short, long, global = true)]
    devices: Option<PathBuf>,

    /// Print decoded messages as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode message bytes (header and payload, already dewhitened)
    Decode {
        /// Hex-encoded messages; read one per line from stdin when omitted
        frames: Vec<String>,
    },
    /// Decode whitened on-air frames (length byte, message, CRC)
    Receive {
        /// Hex-encoded frames; read one per line from stdin when omitted
        frames: Vec<String>,
    },
}

struct Session {
    receiver: Receiver,
    whitened: bool,
    json: bool,
}

impl Session {
    fn handle_line(&mut self, line: &str) -> anyhow::Result<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let mut bytes = match decode_hex(line) {
            Ok(bytes) => bytes,
            Err(e) => {
                log_warn(&format!("Skipping '{line}': {e}"));
                return Ok(());
            }
        };

        let decoded = if self.whitened {
            self.receiver.receive(&mut bytes)
        } else {
            self.receiver.decode(&bytes)
        };

        match decoded {
            Ok(message) if self.json => {
                println!("{}", serde_json::to_string(&message)?);
            }
            Ok(message) => {
                println!(
                    "{}",
                    MessageReport::with_registry(&message, self.receiver.registry())
                );
            }
            Err(e) => log_warn(&format!("Dropped '{line}': {e}")),
        }
        Ok(())
    }

    fn finish(&self) -> anyhow::Result<()> {
        let registry = self.receiver.registry();
        if self.json {
            let devices: Vec<_> = registry.iter().map(|(_, device)| device).collect();
            println!("{}", serde_json::to_string_pretty(&devices)?);
        } else {
            print!("{}", DeviceTableReport::new(registry));
        }
        log_receive_stats(&self.receiver.stats());
        Ok(())
    }
}

fn load_registry(path: Option<&PathBuf>) -> anyhow::Result<DeviceRegistry> {
    let Some(path) = path else {
        return Ok(DeviceRegistry::default());
    };
    let config = RegistryConfig::from_file(path)
        .with_context(|| format!("loading device configuration {}", path.display()))?;
    Ok(DeviceRegistry::from_config(&config)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = init_enhanced_logging() {
        eprintln!("Logging setup failed: {e}, using standard logging");
        init_logger();
    }

    let cli = Cli::parse();
    let registry = load_registry(cli.devices.as_ref())?;

    let (whitened, frames) = match cli.command {
        Commands::Decode { frames } => (false, frames),
        Commands::Receive { frames } => (true, frames),
    };

    let mut session = Session {
        receiver: Receiver::new(registry),
        whitened,
        json: cli.json,
    };

    if frames.is_empty() {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            session.handle_line(&line)?;
        }
    } else {
        for frame in &frames {
            session.handle_line(frame)?;
        }
    }

    session.finish()
}
