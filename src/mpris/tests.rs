use super::*;
use crate::station::Artwork;
use std::sync::mpsc;

fn make_handle() -> (MprisHandle, Arc<Mutex<SharedState>>, Receiver<()>) {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (notify_tx, notify_rx) = mpsc::channel::<()>();
    let handle = MprisHandle {
        state: state.clone(),
        notify: notify_tx,
    };
    (handle, state, notify_rx)
}

fn station() -> Station {
    Station::new("Test FM", "http://radio.example/live")
        .with_artwork(Some(Artwork::new("file:///tmp/test-fm.png")))
}

#[test]
fn publish_sets_and_clears_shared_state() {
    let (handle, state, notify_rx) = make_handle();

    let track = Track {
        title: "Song Title".into(),
        artist: "DJ Example".into(),
        is_playing: true,
    };
    handle.publish(&track, &station());

    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Song Title"));
        assert_eq!(s.artist, vec!["DJ Example".to_string()]);
        assert_eq!(s.album.as_deref(), Some("Test FM"));
        assert_eq!(s.art_url.as_deref(), Some("file:///tmp/test-fm.png"));
        assert_eq!(s.url.as_deref(), Some("http://radio.example/live"));
        assert_eq!(s.track_seq, 1);
    }
    assert_eq!(drain_notifications(&notify_rx), Some(true));

    handle.publish(&Track::default(), &Station::default());
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert!(s.artist.is_empty());
        assert_eq!(s.album, None);
        assert_eq!(s.art_url, None);
        assert_eq!(s.url, None);
        assert_eq!(s.track_seq, 2);
    }
}

#[test]
fn playback_status_maps_state_to_mpris_strings() {
    let (handle, state, _notify_rx) = make_handle();
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    assert_eq!(iface.playback_status(), "Stopped");
    handle.playback_changed(true);
    assert_eq!(iface.playback_status(), "Playing");
    handle.playback_changed(false);
    assert_eq!(iface.playback_status(), "Stopped");
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let (handle, state, _notify_rx) = make_handle();
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    handle.publish(
        &Track {
            title: "Title".into(),
            artist: "Artist".into(),
            is_playing: true,
        },
        &station(),
    );

    let map = iface.metadata();
    for k in [
        "mpris:trackid",
        "xesam:title",
        "xesam:artist",
        "xesam:album",
        "xesam:url",
        "mpris:artUrl",
    ] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn metadata_omits_missing_fields() {
    let (_handle, state, _notify_rx) = make_handle();
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    let map = iface.metadata();
    assert!(map.contains_key("mpris:trackid"));
    assert!(!map.contains_key("xesam:title"));
    assert!(!map.contains_key("xesam:artist"));
    assert!(!map.contains_key("mpris:artUrl"));
}

#[test]
fn player_methods_forward_control_commands() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    iface.play();
    iface.pause();
    iface.play_pause();
    iface.stop();
    iface.next();

    let got: Vec<ControlCmd> = rx.try_iter().collect();
    assert_eq!(
        got,
        vec![
            ControlCmd::Play,
            ControlCmd::Pause,
            ControlCmd::PlayPause,
            ControlCmd::Stop,
        ]
    );
}

#[test]
fn drain_reports_disconnect() {
    let (handle, _state, notify_rx) = make_handle();
    assert_eq!(drain_notifications(&notify_rx), Some(false));
    drop(handle);
    assert_eq!(drain_notifications(&notify_rx), None);
}
