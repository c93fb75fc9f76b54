//! Application model types: `App` and `PlaybackState`.

use airwave::events::RadioEvent;
use airwave::station::Station;
use airwave::track::Track;

pub const PROMPT_TEXT: &str = "Press Play to Begin";
pub const LOADING_TEXT: &str = "Loading...";
pub const PAUSED_TEXT: &str = "Paused...";

/// The playback state as the UI sees it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Offline,
}

/// What the user asked the radio to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Request {
    Play,
    Pause,
}

/// The main application model.
pub struct App {
    pub station_name: String,
    pub title: String,
    pub artist: String,
    pub playback: PlaybackState,
    station_configured: bool,
}

impl App {
    pub fn new(station: &Station) -> Self {
        Self {
            title: PROMPT_TEXT.to_string(),
            artist: station.name.clone(),
            station_name: station.name.clone(),
            playback: PlaybackState::Stopped,
            station_configured: station.is_configured(),
        }
    }

    /// Placeholder title to send ahead of `request`, so it is applied before
    /// anything the request itself causes (such as the offline track).
    pub fn placeholder(&self, request: Request) -> Option<&'static str> {
        match request {
            Request::Play if self.station_configured => Some(LOADING_TEXT),
            Request::Play => None,
            Request::Pause => Some(PAUSED_TEXT),
        }
    }

    /// Fold a batch of radio events into the model.
    pub fn apply_events(&mut self, events: &[RadioEvent]) {
        for event in events {
            match event {
                RadioEvent::PlayPressed => self.playback = PlaybackState::Playing,
                RadioEvent::PausePressed => {
                    if self.playback != PlaybackState::Offline {
                        self.playback = PlaybackState::Stopped;
                    }
                }
                RadioEvent::MetadataUpdated(track) => self.show_track(track),
                RadioEvent::StationOffline { station } => {
                    tracing::info!(station = %station, "station offline");
                    self.playback = PlaybackState::Offline;
                }
            }
        }
    }

    pub fn show_track(&mut self, track: &Track) {
        self.title = track.title.clone();
        self.artist = track.artist.clone();
    }

    pub fn is_playing(&self) -> bool {
        self.playback == PlaybackState::Playing
    }
}
