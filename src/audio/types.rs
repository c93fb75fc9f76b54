//! Commands understood by the audio thread.

use crate::media::MediaObserver;

#[derive(Debug)]
pub enum AudioCmd {
    /// Connect to `url` and queue it, paused.
    Open { url: String, observer: MediaObserver },
    /// Start or resume output.
    Start,
    /// Pause output, keeping the stream.
    Stop,
    /// Drop the stream and the observer.
    Release,
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}
