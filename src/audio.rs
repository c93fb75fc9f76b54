//! rodio-backed `MediaSession`.
//!
//! A dedicated audio thread owns the output stream and the sink for the
//! current station; `RodioSession` only sends it commands, so none of the
//! `MediaSession` calls block the controller.

mod icy;
mod session;
mod source;
mod thread;
mod types;

pub use session::RodioSession;
