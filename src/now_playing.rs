//! The OS now-playing surface the controller reports to.

use crate::station::Station;
use crate::track::Track;

/// Best-effort sink for now-playing information. Implementations swallow
/// their own failures.
pub trait NowPlayingPublisher: Send {
    fn publish(&self, track: &Track, station: &Station);

    /// Called on every play/pause transition.
    fn playback_changed(&self, _playing: bool) {}
}

/// Publisher that only writes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPublisher;

impl NowPlayingPublisher for LogPublisher {
    fn publish(&self, track: &Track, station: &Station) {
        tracing::info!(
            station = %station.name,
            artist = %track.artist,
            title = %track.title,
            "now playing"
        );
    }
}
