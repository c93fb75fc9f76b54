//! Internet radio playback with now-playing reporting.
//!
//! A [`RadioController`](controller::RadioController) plays one
//! [`Station`](station::Station) through a [`MediaSession`](media::MediaSession),
//! turns in-stream metadata into an artist/title [`Track`](track::Track),
//! reports it to a [`NowPlayingPublisher`](now_playing::NowPlayingPublisher)
//! and broadcasts [`RadioEvent`](events::RadioEvent)s.
//!
//! ```no_run
//! use airwave::audio::RodioSession;
//! use airwave::config::AudioSettings;
//! use airwave::now_playing::LogPublisher;
//! use airwave::runtime::spawn_radio;
//! use airwave::station::Station;
//!
//! let runtime = spawn_radio(
//!     Box::new(RodioSession::new(AudioSettings::default())),
//!     Box::new(LogPublisher),
//! );
//! let radio = runtime.handle();
//! radio.set_station(Station::new("WTSQ 88.1FM", "http://stream.wtsq.org:8000/xstream2"));
//! radio.play();
//! ```

pub mod audio;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod media;
pub mod metadata;
pub mod mpris;
pub mod now_playing;
pub mod runtime;
pub mod station;
pub mod track;

pub use controller::{PlaybackState, RadioCmd, RadioController};
pub use error::RadioError;
pub use events::{EventNotifier, RadioEvent};
pub use runtime::{RadioHandle, RadioRuntime, spawn_radio};
pub use station::{Artwork, Station};
pub use track::Track;
