//! Runs a `RadioController` on its own thread.
//!
//! All state changes go through one command channel, so UI calls, media
//! notifications and route/interruption callbacks coming from other threads
//! are applied one at a time, in arrival order.

use std::sync::mpsc::{self, Receiver, SendError, Sender};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

use crate::controller::{RadioCmd, RadioController};
use crate::events::{EventNotifier, RadioEvent};
use crate::media::{InterruptionKind, MediaSession, RouteChangeReason};
use crate::now_playing::NowPlayingPublisher;
use crate::station::{Artwork, Station};
use crate::track::{Track, TrackHandle};

/// Cloneable front for a controller running on its own thread.
#[derive(Clone)]
pub struct RadioHandle {
    tx: Sender<RadioCmd>,
    track: TrackHandle,
    events: EventNotifier,
}

/// Owns the controller thread; dropping it does not stop the thread, call
/// `shutdown` for that.
pub struct RadioRuntime {
    handle: RadioHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

pub fn spawn_radio(
    session: Box<dyn MediaSession>,
    publisher: Box<dyn NowPlayingPublisher>,
) -> RadioRuntime {
    let (tx, rx) = mpsc::channel::<RadioCmd>();
    let controller = RadioController::new(tx.clone(), session, publisher);

    let handle = RadioHandle {
        tx,
        track: controller.track_handle(),
        events: controller.events().clone(),
    };

    let join = thread::spawn(move || run_controller(controller, rx));

    RadioRuntime {
        handle,
        join: Mutex::new(Some(join)),
    }
}

fn run_controller(mut controller: RadioController, rx: Receiver<RadioCmd>) {
    tracing::debug!("radio controller started");
    // The controller holds a sender itself, so `rx` only ends via `Quit`.
    for cmd in rx {
        if controller.handle(cmd) {
            break;
        }
    }
    tracing::debug!("radio controller stopped");
}

impl RadioRuntime {
    pub fn handle(&self) -> RadioHandle {
        self.handle.clone()
    }

    /// Stop playback, shut the session down and wait for the thread.
    pub fn shutdown(&self) {
        let _ = self.handle.send(RadioCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl RadioHandle {
    pub fn send(&self, cmd: RadioCmd) -> Result<(), SendError<RadioCmd>> {
        self.tx.send(cmd)
    }

    pub fn subscribe(&self) -> Receiver<RadioEvent> {
        self.events.subscribe()
    }

    pub fn set_station(&self, station: Station) {
        let _ = self.send(RadioCmd::SetStation(station));
    }

    pub fn update_artwork(&self, artwork: Option<Artwork>) {
        let _ = self.send(RadioCmd::UpdateArtwork(artwork));
    }

    pub fn play(&self) {
        let _ = self.send(RadioCmd::Play);
    }

    pub fn pause(&self) {
        let _ = self.send(RadioCmd::Pause);
    }

    pub fn toggle_play_pause(&self) {
        let _ = self.send(RadioCmd::TogglePlayPause);
    }

    pub fn custom_metadata(&self, title: impl Into<String>, artist: Option<String>) {
        let _ = self.send(RadioCmd::CustomMetadata {
            title: title.into(),
            artist,
        });
    }

    /// Forward a platform route-change notification.
    pub fn route_changed(&self, reason: RouteChangeReason) {
        let _ = self.send(RadioCmd::RouteChanged(reason));
    }

    /// Forward a platform audio-interruption notification.
    pub fn interruption(&self, kind: InterruptionKind) {
        let _ = self.send(RadioCmd::Interruption(kind));
    }

    /// Last track state published by the controller thread.
    pub fn track(&self) -> Track {
        self.track.lock().map(|t| t.clone()).unwrap_or_default()
    }

    pub fn track_title(&self) -> String {
        self.track().title
    }

    pub fn track_artist(&self) -> String {
        self.track().artist
    }

    pub fn is_playing(&self) -> bool {
        self.track().is_playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{ItemStatus, MediaObserver};
    use crate::now_playing::LogPublisher;
    use std::time::Duration;

    /// Session that optionally reports failure as soon as it is started.
    struct ScriptedSession {
        observer: Option<MediaObserver>,
        fail_on_start: bool,
    }

    impl ScriptedSession {
        fn boxed(fail_on_start: bool) -> Box<dyn MediaSession> {
            Box::new(Self {
                observer: None,
                fail_on_start,
            })
        }
    }

    impl MediaSession for ScriptedSession {
        fn open(&mut self, _url: &str, observer: MediaObserver) {
            self.observer = Some(observer);
        }
        fn start(&mut self) {
            if let (true, Some(o)) = (self.fail_on_start, &self.observer) {
                o.status_changed(ItemStatus::Failed);
            }
        }
        fn stop(&mut self) {}
        fn release(&mut self) {
            self.observer = None;
        }
    }

    fn next_event(rx: &Receiver<RadioEvent>) -> RadioEvent {
        rx.recv_timeout(Duration::from_secs(2)).expect("event")
    }

    #[test]
    fn commands_are_applied_in_order_on_the_controller_thread() {
        let runtime = spawn_radio(ScriptedSession::boxed(true), Box::new(LogPublisher));
        let radio = runtime.handle();
        let events = radio.subscribe();

        radio.set_station(Station::new("Test FM", "http://test.invalid/live"));
        radio.custom_metadata("Press Play to Begin", None);
        assert_eq!(
            next_event(&events),
            RadioEvent::MetadataUpdated(Track {
                title: "Press Play to Begin".into(),
                artist: "Test FM".into(),
                is_playing: false,
            })
        );

        radio.toggle_play_pause();
        assert_eq!(next_event(&events), RadioEvent::PlayPressed);
        assert_eq!(next_event(&events), RadioEvent::PausePressed);
        assert_eq!(next_event(&events).name(), "MetadataUpdated");
        assert_eq!(
            next_event(&events),
            RadioEvent::StationOffline {
                station: "Test FM".into()
            }
        );

        runtime.shutdown();
        assert_eq!(radio.track_title(), "Test FM is offline");
        assert_eq!(radio.track_artist(), "Please try again later");
        assert!(!radio.is_playing());
    }

    #[test]
    fn placeholder_sent_before_play_does_not_hide_offline_track() {
        let runtime = spawn_radio(ScriptedSession::boxed(true), Box::new(LogPublisher));
        let radio = runtime.handle();
        let events = radio.subscribe();
        radio.set_station(Station::new("Test FM", "http://test.invalid/live"));

        radio.custom_metadata("Loading...", None);
        radio.play();

        assert_eq!(next_event(&events).name(), "MetadataUpdated");
        assert_eq!(next_event(&events), RadioEvent::PlayPressed);
        assert_eq!(next_event(&events), RadioEvent::PausePressed);
        assert_eq!(next_event(&events).name(), "MetadataUpdated");
        assert_eq!(next_event(&events).name(), "StationOffline");

        runtime.shutdown();
        assert!(events.try_recv().is_err());
        assert_eq!(radio.track_title(), "Test FM is offline");
        assert_eq!(radio.track_artist(), "Please try again later");
    }

    #[test]
    fn route_and_interruption_notifications_pause_playback() {
        let runtime = spawn_radio(ScriptedSession::boxed(false), Box::new(LogPublisher));
        let radio = runtime.handle();
        let events = radio.subscribe();
        radio.set_station(Station::new("Test FM", "http://test.invalid/live"));

        radio.play();
        assert_eq!(next_event(&events), RadioEvent::PlayPressed);
        radio.interruption(InterruptionKind::Began);
        assert_eq!(next_event(&events), RadioEvent::PausePressed);

        radio.play();
        assert_eq!(next_event(&events), RadioEvent::PlayPressed);
        radio.route_changed(RouteChangeReason::OldDeviceUnavailable);
        assert_eq!(next_event(&events), RadioEvent::PausePressed);

        // Idle now: neither notification has any effect.
        radio.interruption(InterruptionKind::Began);
        radio.route_changed(RouteChangeReason::OldDeviceUnavailable);
        runtime.shutdown();
        assert!(events.try_recv().is_err());
        assert!(!radio.is_playing());
    }
}
