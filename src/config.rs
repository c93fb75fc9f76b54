//! Configuration loader and schema types.
//!
//! Settings describe the station to play and how the audio session, MPRIS
//! surface and logging behave. See `Settings::load` for precedence.

mod load;
mod schema;

pub use load::{default_config_path, resolve_config_path};
pub use schema::*;

#[cfg(test)]
mod tests;
