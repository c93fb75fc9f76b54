use std::path::PathBuf;

use serde::Deserialize;

use crate::station::{Artwork, Station};

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/airwave/config.toml` or `~/.config/airwave/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `AIRWAVE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub station: StationSettings,
    pub audio: AudioSettings,
    pub mpris: MprisSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StationSettings {
    /// Display name; also the artist shown when the stream names none.
    pub name: String,
    /// Stream URL (`http(s)://`, `file://` or a local path).
    pub url: String,
    /// Shown as the title when the stream carries no title.
    pub description: String,
    /// Artwork URI forwarded to the now-playing surface.
    pub artwork: Option<Artwork>,
}

impl Default for StationSettings {
    fn default() -> Self {
        Self {
            name: "WTSQ 88.1FM".to_string(),
            url: "http://stream.wtsq.org:8000/xstream2".to_string(),
            description: String::new(),
            artwork: None,
        }
    }
}

impl StationSettings {
    pub fn to_station(&self) -> Station {
        Station::new(&self.name, &self.url)
            .with_description(&self.description)
            .with_artwork(self.artwork.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Output volume, 1.0 is unchanged.
    pub volume: f32,
    /// Give up connecting to a stream after this many seconds.
    pub connect_timeout_secs: u64,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
    /// `User-Agent` sent when fetching http streams.
    pub user_agent: String,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            connect_timeout_secs: 10,
            quit_fade_out_ms: 300,
            user_agent: concat!("airwave/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MprisSettings {
    /// Publish now-playing info and accept media keys over D-Bus.
    pub enabled: bool,
    /// Player identity; the bus name is `org.mpris.MediaPlayer2.<identity>`.
    pub identity: String,
}

impl Default for MprisSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            identity: "airwave".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directives, e.g. `"info"` or `"airwave=debug"`.
    /// `RUST_LOG` wins when set.
    pub filter: String,
    /// Log file. Without one nothing is logged, since the terminal is
    /// owned by the UI.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}
