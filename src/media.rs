//! The media-playback collaborator the controller drives.
//!
//! A `MediaSession` does the actual streaming and decoding. It reports back
//! asynchronously through the `MediaObserver` it was handed in `open`, which
//! posts onto the controller's command channel.

use std::sync::mpsc::Sender;

use crate::controller::RadioCmd;

/// Status of the currently opened stream item.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    Unknown,
    ReadyToPlay,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaNotification {
    StatusChanged(ItemStatus),
    /// In-band metadata from the stream (e.g. ICY `StreamTitle`).
    TimedMetadata(Option<String>),
}

/// A notification tagged with the session generation that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEvent {
    pub generation: u64,
    pub notification: MediaNotification,
}

/// Registration handed to a session on `open`. Every notification it sends
/// is marshalled onto the controller's command channel.
#[derive(Debug, Clone)]
pub struct MediaObserver {
    generation: u64,
    tx: Sender<RadioCmd>,
}

impl MediaObserver {
    pub(crate) fn new(generation: u64, tx: Sender<RadioCmd>) -> Self {
        Self { generation, tx }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `false` once the controller is gone.
    pub fn notify(&self, notification: MediaNotification) -> bool {
        self.tx
            .send(RadioCmd::Media(MediaEvent {
                generation: self.generation,
                notification,
            }))
            .is_ok()
    }

    pub fn status_changed(&self, status: ItemStatus) -> bool {
        self.notify(MediaNotification::StatusChanged(status))
    }

    pub fn timed_metadata(&self, value: Option<String>) -> bool {
        self.notify(MediaNotification::TimedMetadata(value))
    }
}

/// A platform media player able to stream one URL at a time.
///
/// Calls must not block: results arrive later through the observer.
pub trait MediaSession: Send {
    /// Prepare `url` for playback and register `observer` for its status
    /// and timed-metadata notifications.
    fn open(&mut self, url: &str, observer: MediaObserver);
    fn start(&mut self);
    fn stop(&mut self);
    /// Drop the current item and its observer registration.
    fn release(&mut self);
    /// Tear the session down for good.
    fn shutdown(&mut self) {}
}

/// Why the audio output route changed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RouteChangeReason {
    Unknown,
    NewDeviceAvailable,
    /// The device in use went away (headphones unplugged).
    OldDeviceUnavailable,
    CategoryChange,
    Override,
    Other(u32),
}

impl RouteChangeReason {
    /// Map a platform reason code.
    pub fn from_raw(code: u32) -> Self {
        match code {
            0 => Self::Unknown,
            1 => Self::NewDeviceAvailable,
            2 => Self::OldDeviceUnavailable,
            3 => Self::CategoryChange,
            4 => Self::Override,
            other => Self::Other(other),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InterruptionKind {
    Began,
    Ended,
}

impl InterruptionKind {
    pub fn from_raw(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Began),
            0 => Some(Self::Ended),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn observer_tags_notifications_with_generation() {
        let (tx, rx) = mpsc::channel();
        let observer = MediaObserver::new(7, tx);

        assert!(observer.status_changed(ItemStatus::Failed));
        match rx.try_recv().unwrap() {
            RadioCmd::Media(ev) => {
                assert_eq!(ev.generation, 7);
                assert_eq!(
                    ev.notification,
                    MediaNotification::StatusChanged(ItemStatus::Failed)
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }

        drop(rx);
        assert!(!observer.timed_metadata(Some("x".into())));
    }

    #[test]
    fn reason_codes_map_to_kinds() {
        assert_eq!(
            RouteChangeReason::from_raw(2),
            RouteChangeReason::OldDeviceUnavailable
        );
        assert_eq!(RouteChangeReason::from_raw(42), RouteChangeReason::Other(42));
        assert_eq!(InterruptionKind::from_raw(1), Some(InterruptionKind::Began));
        assert_eq!(InterruptionKind::from_raw(0), Some(InterruptionKind::Ended));
        assert_eq!(InterruptionKind::from_raw(9), None);
    }
}
