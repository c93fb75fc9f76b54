//! Playback controller: the single owner of track and station state.

mod cmd;
mod model;

pub use cmd::*;
pub use model::*;
