use std::sync::{Arc, Mutex};

/// What is currently on air, as last reported by the stream or set by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub is_playing: bool,
}

impl Track {
    /// Message shown when the station stream fails.
    pub fn offline(station_name: &str) -> Self {
        Self {
            title: format!("{station_name} is offline"),
            artist: "Please try again later".to_string(),
            is_playing: false,
        }
    }
}

/// Snapshot of the controller's track shared with other threads (UI, tests).
pub type TrackHandle = Arc<Mutex<Track>>;
