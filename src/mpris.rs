//! MPRIS now-playing surface.
//!
//! Exposes `org.mpris.MediaPlayer2` and `org.mpris.MediaPlayer2.Player` on the
//! session bus so desktop shells and `playerctl` can show the station, artist
//! and title, and forwards media-key presses back as `ControlCmd`s.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_io::{Timer, block_on};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use crate::now_playing::NowPlayingPublisher;
use crate::station::Station;
use crate::track::Track;

const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
const NOTIFY_POLL: Duration = Duration::from_millis(200);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
}

#[derive(Debug, Default)]
struct SharedState {
    playing: bool,
    title: Option<String>,
    artist: Vec<String>,
    album: Option<String>,
    art_url: Option<String>,
    url: Option<String>,
    /// Bumped on every metadata change so clients see a new track id.
    track_seq: u64,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
    notify: Sender<()>,
}

impl MprisHandle {
    pub fn set_playing(&self, playing: bool) {
        if let Ok(mut s) = self.state.lock() {
            s.playing = playing;
        }
        let _ = self.notify.send(());
    }

    pub fn set_now_playing(&self, track: &Track, station: &Station) {
        if let Ok(mut s) = self.state.lock() {
            s.title = Some(track.title.clone()).filter(|t| !t.is_empty());
            s.artist = if track.artist.is_empty() {
                Vec::new()
            } else {
                vec![track.artist.clone()]
            };
            s.album = Some(station.name.clone()).filter(|n| !n.is_empty());
            s.art_url = station.artwork.as_ref().map(|a| a.uri().to_string());
            s.url = Some(station.url.clone()).filter(|u| !u.is_empty());
            s.track_seq += 1;
        }
        let _ = self.notify.send(());
    }
}

impl NowPlayingPublisher for MprisHandle {
    fn publish(&self, track: &Track, station: &Station) {
        self.set_now_playing(track, station);
    }

    fn playback_changed(&self, playing: bool) {
        self.set_playing(playing);
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
    identity: String,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No window to raise.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        &self.identity
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["http".to_string(), "https".to_string(), "file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec!["audio/mpeg".to_string(), "audio/ogg".to_string()]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

fn owned<'a>(v: impl Into<Value<'a>>) -> Option<OwnedValue> {
    OwnedValue::try_from(v.into()).ok()
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        // A live stream has no next item.
    }

    fn previous(&self) {}

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        if s.playing { "Playing" } else { "Stopped" }
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_seek(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        let track_id = format!("{OBJECT_PATH}/track/{}", s.track_seq);
        if let Some(v) = ObjectPath::try_from(track_id).ok().and_then(owned) {
            map.insert("mpris:trackid".to_string(), v);
        }
        if let Some(v) = s.title.clone().and_then(owned) {
            map.insert("xesam:title".to_string(), v);
        }
        if !s.artist.is_empty() {
            if let Some(v) = owned(s.artist.clone()) {
                map.insert("xesam:artist".to_string(), v);
            }
        }
        if let Some(v) = s.album.clone().and_then(owned) {
            map.insert("xesam:album".to_string(), v);
        }
        if let Some(v) = s.art_url.clone().and_then(owned) {
            map.insert("mpris:artUrl".to_string(), v);
        }
        if let Some(v) = s.url.clone().and_then(owned) {
            map.insert("xesam:url".to_string(), v);
        }
        map
    }
}

/// Register the MPRIS service on a background thread. Failing to reach the
/// session bus is logged and otherwise ignored; the handle still works.
pub fn spawn_mpris(identity: &str, tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (notify_tx, notify_rx) = mpsc::channel::<()>();

    let state_for_thread = state.clone();
    let identity = identity.to_string();
    std::thread::spawn(move || {
        block_on(async move {
            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!("MPRIS: failed to connect to session bus: {e}");
                    return;
                }
            };

            let bus_name = format!("org.mpris.MediaPlayer2.{identity}");
            if let Err(e) = connection.request_name(bus_name.as_str()).await {
                tracing::warn!("MPRIS: failed to acquire name {bus_name}: {e}");
                return;
            }

            let object_server = connection.object_server();

            let root = RootIface {
                tx: tx.clone(),
                identity,
            };
            if let Err(e) = object_server.at(OBJECT_PATH, root).await {
                tracing::warn!("MPRIS: failed to register root iface: {e}");
                return;
            }

            let player = PlayerIface {
                tx,
                state: state_for_thread,
            };
            if let Err(e) = object_server.at(OBJECT_PATH, player).await {
                tracing::warn!("MPRIS: failed to register player iface: {e}");
                return;
            }

            tracing::debug!("MPRIS: registered as {bus_name}");

            // Keep the service alive and turn state changes into PropertiesChanged.
            loop {
                Timer::after(NOTIFY_POLL).await;
                match drain_notifications(&notify_rx) {
                    Some(false) => continue,
                    Some(true) => {}
                    None => return,
                }

                let Ok(iface) = object_server
                    .interface::<_, PlayerIface>(OBJECT_PATH)
                    .await
                else {
                    continue;
                };
                let emitter = iface.signal_emitter();
                let player = iface.get().await;
                if let Err(e) = player.metadata_changed(emitter).await {
                    tracing::debug!("MPRIS: metadata signal failed: {e}");
                }
                if let Err(e) = player.playback_status_changed(emitter).await {
                    tracing::debug!("MPRIS: status signal failed: {e}");
                }
            }
        });
    });

    MprisHandle {
        state,
        notify: notify_tx,
    }
}

/// `Some(true)` if anything changed since the last poll, `None` once every
/// handle is gone.
fn drain_notifications(rx: &Receiver<()>) -> Option<bool> {
    let mut changed = false;
    loop {
        match rx.try_recv() {
            Ok(()) => changed = true,
            Err(TryRecvError::Empty) => return Some(changed),
            Err(TryRecvError::Disconnected) => return None,
        }
    }
}

#[cfg(test)]
mod tests;
