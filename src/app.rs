//! Application module: the view model behind the terminal player.
//!
//! `App` mirrors what the radio reports through its events and decides
//! which placeholder text to show while a stream starts or stops.

mod model;

pub use model::*;
