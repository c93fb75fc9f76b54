//! Station descriptor: the fixed stream endpoint a controller plays.

use serde::Deserialize;

/// Opaque artwork reference shown next to the now-playing info.
///
/// Carried as a URI (`file://...` or `https://...`) so that surfaces such as
/// MPRIS can forward it as-is.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Artwork(String);

impl Artwork {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn uri(&self) -> &str {
        &self.0
    }
}

/// A named, fixed-URL audio stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Station {
    pub name: String,
    pub url: String,
    pub description: String,
    pub artwork: Option<Artwork>,
}

impl Station {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            description: String::new(),
            artwork: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_artwork(mut self, artwork: Option<Artwork>) -> Self {
        self.artwork = artwork;
        self
    }

    /// A station can only be played once it has a stream URL.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }
}
