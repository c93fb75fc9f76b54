use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use airwave::config::LoggingSettings;
use tracing_subscriber::EnvFilter;

/// Send `tracing` output to the configured log file.
///
/// Without a file nothing is installed: stderr belongs to the terminal UI.
/// `RUST_LOG` overrides the configured filter.
pub fn init(settings: &LoggingSettings) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = settings.file.as_ref() else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.filter.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| e as Box<dyn std::error::Error>)?;

    Ok(())
}
