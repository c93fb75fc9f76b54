use crate::media::{InterruptionKind, MediaEvent, RouteChangeReason};
use crate::station::{Artwork, Station};

/// Everything that may change controller state, serialized onto its thread.
#[derive(Debug, Clone)]
pub enum RadioCmd {
    Play,
    Pause,
    TogglePlayPause,
    /// Override the displayed metadata. An empty or missing artist falls back
    /// to the station name.
    CustomMetadata {
        title: String,
        artist: Option<String>,
    },
    SetStation(Station),
    UpdateArtwork(Option<Artwork>),
    /// Notification from the media session.
    Media(MediaEvent),
    RouteChanged(RouteChangeReason),
    Interruption(InterruptionKind),
    /// Stop playback and shut the session down.
    Quit,
}
