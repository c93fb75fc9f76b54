use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::config::AudioSettings;
use crate::media::{ItemStatus, MediaObserver};

use super::source::{OpenError, append_stream};
use super::types::AudioCmd;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped, which
                // would land on top of the terminal UI.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                tracing::error!("no audio output device: {e}");
                None
            }
        };

        let mut sink: Option<Sink> = None;
        let mut observer: Option<MediaObserver> = None;
        let mut playing = false;

        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(cmd) => match cmd {
                    AudioCmd::Open { url, observer: o } => {
                        drop_sink(&mut sink);
                        playing = false;

                        match open_sink(stream.as_ref(), &url, &audio_settings, &o) {
                            Ok(s) => {
                                tracing::info!(url = %url, "stream opened");
                                o.status_changed(ItemStatus::ReadyToPlay);
                                sink = Some(s);
                            }
                            Err(e) => {
                                tracing::warn!(url = %url, "failed to open stream: {e}");
                                o.status_changed(ItemStatus::Failed);
                            }
                        }
                        observer = Some(o);
                    }
                    AudioCmd::Start => {
                        if let Some(ref s) = sink {
                            s.play();
                            playing = true;
                        }
                    }
                    AudioCmd::Stop => {
                        if let Some(ref s) = sink {
                            s.pause();
                        }
                        playing = false;
                    }
                    AudioCmd::Release => {
                        drop_sink(&mut sink);
                        observer = None;
                        playing = false;
                    }
                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some(ref s) = sink {
                            if playing {
                                fade_out_sink(s, fade_out_ms);
                            }
                            s.stop();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // A live stream running dry means the connection is gone.
                    let drained = sink.as_ref().is_some_and(|s| playing && s.empty());
                    if drained {
                        tracing::warn!("stream ended");
                        playing = false;
                        if let Some(ref o) = observer {
                            o.status_changed(ItemStatus::Failed);
                        }
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        tracing::debug!("audio thread stopped");
    })
}

fn open_sink(
    stream: Option<&OutputStream>,
    url: &str,
    settings: &AudioSettings,
    observer: &MediaObserver,
) -> Result<Sink, OpenError> {
    let stream = stream.ok_or(OpenError::NoOutput)?;
    let sink = Sink::connect_new(stream.mixer());
    sink.pause();
    sink.set_volume(settings.volume);
    append_stream(&sink, url, settings, observer)?;
    Ok(sink)
}

fn drop_sink(sink: &mut Option<Sink>) {
    if let Some(s) = sink.take() {
        s.stop();
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    let start = sink.volume();
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(start * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
