//! Controller model: `RadioController` and `PlaybackState`.
//!
//! The controller owns the `Track` and `Station`, drives a `MediaSession`
//! and reports changes to a `NowPlayingPublisher` and an `EventNotifier`.
//! Run it on one thread (see `runtime::spawn_radio`) and post `RadioCmd`s
//! to it.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::error::RadioError;
use crate::events::{EventNotifier, RadioEvent};
use crate::media::{
    InterruptionKind, ItemStatus, MediaEvent, MediaNotification, MediaObserver, MediaSession,
    RouteChangeReason,
};
use crate::metadata;
use crate::now_playing::NowPlayingPublisher;
use crate::station::{Artwork, Station};
use crate::track::{Track, TrackHandle};

use super::cmd::RadioCmd;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
}

pub struct RadioController {
    track: Track,
    station: Station,
    shared: TrackHandle,

    session: Box<dyn MediaSession>,
    publisher: Box<dyn NowPlayingPublisher>,
    events: EventNotifier,

    /// Where observers handed to the session post their notifications.
    commands: Sender<RadioCmd>,
    /// Bumped on every `play`; notifications from older sessions are dropped.
    generation: u64,
    active_generation: Option<u64>,
}

impl RadioController {
    /// Create an idle controller with no station. `commands` must feed back
    /// into whatever loop calls `handle` on this controller.
    pub fn new(
        commands: Sender<RadioCmd>,
        session: Box<dyn MediaSession>,
        publisher: Box<dyn NowPlayingPublisher>,
    ) -> Self {
        Self {
            track: Track::default(),
            station: Station::default(),
            shared: Arc::new(Mutex::new(Track::default())),
            session,
            publisher,
            events: EventNotifier::new(),
            commands,
            generation: 0,
            active_generation: None,
        }
    }

    pub fn events(&self) -> &EventNotifier {
        &self.events
    }

    pub fn track_handle(&self) -> TrackHandle {
        self.shared.clone()
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn station(&self) -> &Station {
        &self.station
    }

    pub fn track_title(&self) -> &str {
        &self.track.title
    }

    pub fn track_artist(&self) -> &str {
        &self.track.artist
    }

    pub fn is_playing(&self) -> bool {
        self.track.is_playing
    }

    pub fn state(&self) -> PlaybackState {
        if self.track.is_playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Idle
        }
    }

    /// Apply one command. Returns `true` when the controller has shut down.
    pub fn handle(&mut self, cmd: RadioCmd) -> bool {
        let result = match cmd {
            RadioCmd::Play => self.play(),
            RadioCmd::Pause => self.pause(),
            RadioCmd::TogglePlayPause => self.toggle_play_pause(),
            RadioCmd::CustomMetadata { title, artist } => {
                self.custom_metadata(&title, artist.as_deref());
                Ok(())
            }
            RadioCmd::SetStation(station) => {
                self.set_station(station);
                Ok(())
            }
            RadioCmd::UpdateArtwork(artwork) => {
                self.update_artwork(artwork);
                Ok(())
            }
            RadioCmd::Media(event) => self.on_media_event(event),
            RadioCmd::RouteChanged(reason) => {
                self.on_route_change(reason);
                Ok(())
            }
            RadioCmd::Interruption(kind) => {
                self.on_interruption(kind);
                Ok(())
            }
            RadioCmd::Quit => {
                self.shutdown();
                return true;
            }
        };

        if let Err(e) = result {
            warn!("{e}");
        }
        false
    }

    /// Replace the station. Takes effect on the next `play`.
    pub fn set_station(&mut self, station: Station) {
        if self.is_playing() {
            debug!(station = %station.name, "station replaced while playing");
        }
        self.station = station;
    }

    /// Replace only the station artwork and refresh the now-playing surface.
    pub fn update_artwork(&mut self, artwork: Option<Artwork>) {
        self.station.artwork = artwork;
        self.publisher.publish(&self.track, &self.station);
    }

    pub fn play(&mut self) -> Result<(), RadioError> {
        if !self.station.is_configured() {
            return Err(RadioError::NotConfigured);
        }
        if self.is_playing() {
            return Err(RadioError::AlreadyPlaying);
        }

        self.generation += 1;
        let observer = MediaObserver::new(self.generation, self.commands.clone());
        self.session.open(&self.station.url, observer);
        self.session.start();
        self.active_generation = Some(self.generation);

        info!(station = %self.station.name, url = %self.station.url, "play");
        self.track.is_playing = true;
        self.sync_shared();
        self.publisher.playback_changed(true);
        self.events.emit(RadioEvent::PlayPressed);
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), RadioError> {
        if !self.is_playing() {
            return Err(RadioError::AlreadyPaused);
        }
        self.stop_playback();
        Ok(())
    }

    /// Stop and release the session and report the pause. Callers check
    /// `is_playing` first.
    fn stop_playback(&mut self) {
        self.session.stop();
        self.session.release();
        self.active_generation = None;

        info!(station = %self.station.name, "pause");
        self.track.is_playing = false;
        self.sync_shared();
        self.publisher.playback_changed(false);
        self.events.emit(RadioEvent::PausePressed);
    }

    pub fn toggle_play_pause(&mut self) -> Result<(), RadioError> {
        if self.is_playing() {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Set the displayed metadata by hand; usable in any state.
    pub fn custom_metadata(&mut self, title: &str, artist: Option<&str>) {
        self.track.title = title.to_string();
        self.track.artist = match artist {
            Some(a) if !a.is_empty() => a.to_string(),
            _ => self.station.name.clone(),
        };
        self.metadata_changed();
    }

    fn on_media_event(&mut self, event: MediaEvent) -> Result<(), RadioError> {
        if self.active_generation != Some(event.generation) {
            debug!(
                generation = event.generation,
                active = ?self.active_generation,
                "dropping notification from released session"
            );
            return Ok(());
        }

        match event.notification {
            MediaNotification::StatusChanged(ItemStatus::Failed) => self.on_stream_failed(),
            MediaNotification::StatusChanged(status) => {
                debug!(?status, "item status changed");
                Ok(())
            }
            MediaNotification::TimedMetadata(Some(raw)) if !raw.is_empty() => {
                self.apply_stream_metadata(&raw);
                Ok(())
            }
            MediaNotification::TimedMetadata(_) => Ok(()),
        }
    }

    fn on_stream_failed(&mut self) -> Result<(), RadioError> {
        self.pause()?;

        let offline = Track::offline(&self.station.name);
        self.custom_metadata(&offline.title, Some(&offline.artist));
        self.events.emit(RadioEvent::StationOffline {
            station: self.station.name.clone(),
        });

        Err(RadioError::StreamFailed {
            station: self.station.name.clone(),
        })
    }

    fn apply_stream_metadata(&mut self, raw: &str) {
        let parsed = metadata::parse(raw, &self.station.name);
        self.track.artist = parsed.artist;
        self.track.title = if parsed.title.is_empty() {
            self.station.description.clone()
        } else {
            parsed.title
        };
        info!(artist = %self.track.artist, title = %self.track.title, "metadata");
        self.metadata_changed();
    }

    fn on_route_change(&mut self, reason: RouteChangeReason) {
        if reason != RouteChangeReason::OldDeviceUnavailable {
            debug!(?reason, "audio route changed");
            return;
        }
        info!("audio device was removed");
        if self.is_playing() {
            self.stop_playback();
        }
    }

    fn on_interruption(&mut self, kind: InterruptionKind) {
        match kind {
            InterruptionKind::Began => {
                info!("interruption began");
                if self.is_playing() {
                    self.stop_playback();
                }
            }
            InterruptionKind::Ended => info!("interruption ended"),
        }
    }

    fn shutdown(&mut self) {
        if self.is_playing() {
            self.stop_playback();
        }
        self.session.shutdown();
    }

    fn metadata_changed(&mut self) {
        self.sync_shared();
        self.publisher.publish(&self.track, &self.station);
        self.events.emit(RadioEvent::MetadataUpdated(self.track.clone()));
    }

    fn sync_shared(&self) {
        if let Ok(mut shared) = self.shared.lock() {
            *shared = self.track.clone();
        }
    }
}
