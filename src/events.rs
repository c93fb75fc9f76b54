//! Events broadcast by the controller to UI layers.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::track::Track;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RadioEvent {
    /// Playback was started.
    PlayPressed,
    /// Playback was stopped, by request or because the stream went away.
    PausePressed,
    /// Artist/title changed; carries the new track.
    MetadataUpdated(Track),
    /// The stream reported a failure; carries the station name.
    StationOffline { station: String },
}

impl RadioEvent {
    /// Stable public name of the event kind.
    pub fn name(&self) -> &'static str {
        match self {
            RadioEvent::PlayPressed => "PlayPressed",
            RadioEvent::PausePressed => "PausePressed",
            RadioEvent::MetadataUpdated(_) => "MetadataUpdated",
            RadioEvent::StationOffline { .. } => "StationOffline",
        }
    }
}

/// Fan-out of `RadioEvent`s to any number of channel subscribers.
///
/// Cloning shares the subscriber list, so a UI can subscribe through a
/// handle while the controller thread emits.
#[derive(Clone, Default)]
pub struct EventNotifier {
    subscribers: Arc<Mutex<Vec<Sender<RadioEvent>>>>,
}

impl EventNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Receiver<RadioEvent> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }
        rx
    }

    /// Deliver `event` to every live subscriber. Subscribers whose receiver
    /// was dropped are forgotten.
    pub fn emit(&self, event: RadioEvent) {
        let Ok(mut subs) = self.subscribers.lock() else {
            return;
        };
        tracing::debug!(event = event.name(), subscribers = subs.len(), "emit");
        subs.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}
