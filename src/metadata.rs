//! Stream metadata cleaning and artist/title extraction.
//!
//! Broadcasters embed strings such as `"Artist - Title [4T3]"` in their
//! streams. `parse` turns those into an artist/title pair, falling back to
//! the station name when no usable artist is present.

/// Separator between the title part and a trailing song code (`"... [4T3]"`).
const SONG_CODE_SEPARATOR: &str = " [";
/// Separator between artist and title.
const PART_SEPARATOR: &str = " - ";

/// Artist/title pair extracted from raw stream metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamMetadata {
    pub artist: String,
    /// Empty when the stream carried no title; callers substitute the
    /// station description.
    pub title: String,
}

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '[' | ']')
}

/// Drop every character outside `[a-zA-Z0-9 \-\[\]]`.
pub fn sanitize(raw: &str) -> String {
    raw.chars().filter(|&c| is_safe_char(c)).collect()
}

/// Split raw stream metadata into artist and title.
///
/// The trailing song code is discarded, the remainder is split on `" - "`;
/// the first part is the artist and the rest, re-joined, is the title.
/// Without at least two parts there is no artist/title pair, so the artist
/// falls back to `station_name` and the title is left empty.
pub fn parse(raw: &str, station_name: &str) -> StreamMetadata {
    let cleaned = sanitize(raw);
    let without_code = cleaned.split(SONG_CODE_SEPARATOR).next().unwrap_or_default();
    let mut parts: Vec<&str> = without_code.split(PART_SEPARATOR).collect();

    if parts.len() < 2 {
        // Includes the empty split, which `str::split` never yields in practice.
        return StreamMetadata {
            artist: station_name.to_string(),
            title: String::new(),
        };
    }

    let artist = match parts.remove(0) {
        "" | "Unknown" | "unknown" => station_name.to_string(),
        a => a.to_string(),
    };

    StreamMetadata {
        artist,
        title: parts.join(PART_SEPARATOR),
    }
}
