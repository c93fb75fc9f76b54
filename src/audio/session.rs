use std::sync::Mutex;
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;

use crate::config::AudioSettings;
use crate::media::{MediaObserver, MediaSession};

use super::thread::spawn_audio_thread;
use super::types::AudioCmd;

pub struct RodioSession {
    tx: Sender<AudioCmd>,
    quit_fade_out_ms: u64,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioSession {
    pub fn new(audio_settings: AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let quit_fade_out_ms = audio_settings.quit_fade_out_ms;
        let audio_handle = spawn_audio_thread(rx, audio_settings);

        Self {
            tx,
            quit_fade_out_ms,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    fn send(&self, cmd: AudioCmd) {
        if self.tx.send(cmd).is_err() {
            tracing::warn!("audio thread is gone");
        }
    }
}

impl MediaSession for RodioSession {
    fn open(&mut self, url: &str, observer: MediaObserver) {
        self.send(AudioCmd::Open {
            url: url.to_string(),
            observer,
        });
    }

    fn start(&mut self) {
        self.send(AudioCmd::Start);
    }

    fn stop(&mut self) {
        self.send(AudioCmd::Stop);
    }

    fn release(&mut self) {
        self.send(AudioCmd::Release);
    }

    /// Fade out, stop the audio thread and wait for it.
    fn shutdown(&mut self) {
        let _ = self.tx.send(AudioCmd::Quit {
            fade_out_ms: self.quit_fade_out_ms,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
