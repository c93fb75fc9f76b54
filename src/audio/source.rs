//! Opening a station URL into something rodio can decode.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use rodio::{Decoder, Sink};
use ureq::Agent;

use crate::config::AudioSettings;
use crate::media::MediaObserver;

use super::icy::IcyReader;

/// Bytes kept from the start of a network stream so format probing can
/// rewind.
const REWIND_LIMIT: usize = 64 * 1024;

#[derive(Debug, thiserror::Error)]
pub(crate) enum OpenError {
    #[error("no audio output device")]
    NoOutput,
    #[error("failed to open file: {0}")]
    Io(#[from] io::Error),
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),
    #[error("failed to decode stream: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum StreamLocation {
    File(PathBuf),
    Http(String),
}

pub(crate) fn locate(url: &str) -> StreamLocation {
    if let Some(path) = url.strip_prefix("file://") {
        StreamLocation::File(PathBuf::from(path))
    } else if url.starts_with("http://") || url.starts_with("https://") {
        StreamLocation::Http(url.to_string())
    } else {
        StreamLocation::File(PathBuf::from(url))
    }
}

/// Format hint for the decoder from an HTTP `Content-Type`.
pub(crate) fn hint_for_content_type(content_type: &str) -> Option<&'static str> {
    let mime = content_type.split(';').next()?.trim().to_ascii_lowercase();
    match mime.as_str() {
        "audio/mpeg" | "audio/mp3" | "audio/mpeg3" => Some("mp3"),
        "audio/ogg" | "application/ogg" | "audio/vorbis" => Some("ogg"),
        "audio/flac" | "audio/x-flac" => Some("flac"),
        "audio/aac" | "audio/aacp" | "audio/mp4" => Some("aac"),
        "audio/wav" | "audio/x-wav" => Some("wav"),
        _ => None,
    }
}

/// Open `url` and queue its decoded audio on `sink`. ICY titles found in the
/// stream are forwarded to `observer` as timed metadata.
pub(crate) fn append_stream(
    sink: &Sink,
    url: &str,
    settings: &AudioSettings,
    observer: &MediaObserver,
) -> Result<(), OpenError> {
    match locate(url) {
        StreamLocation::File(path) => {
            let file = File::open(&path)?;
            sink.append(Decoder::new(BufReader::new(file))?);
        }
        StreamLocation::Http(url) => {
            let config = Agent::config_builder()
                .timeout_connect(Some(Duration::from_secs(settings.connect_timeout_secs)))
                .build();
            let agent: Agent = config.into();

            let response = agent
                .get(&url)
                .header("Icy-MetaData", "1")
                .header("User-Agent", settings.user_agent.as_str())
                .call()?;

            let header = |name: &str| {
                response
                    .headers()
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            };
            let metaint = header("icy-metaint").and_then(|v| v.trim().parse::<usize>().ok());
            let hint = header("content-type")
                .as_deref()
                .and_then(hint_for_content_type);
            tracing::debug!(url = %url, ?metaint, ?hint, "stream connected");

            let (_parts, body) = response.into_parts();
            let observer = observer.clone();
            let reader = IcyReader::new(body.into_reader(), metaint, move |title| {
                observer.timed_metadata(Some(title));
            });

            let mut builder = Decoder::builder()
                .with_data(RewindReader::new(reader))
                .with_seekable(false);
            if let Some(hint) = hint {
                builder = builder.with_hint(hint);
            }
            sink.append(builder.build()?);
        }
    }
    Ok(())
}

/// Adapts a forward-only stream to `Read + Seek` by remembering its first
/// `REWIND_LIMIT` bytes. Seeks are only honoured inside that window.
pub(crate) struct RewindReader<R> {
    inner: Mutex<R>,
    prefix: Vec<u8>,
    recording: bool,
    pos: u64,
}

impl<R: Read> RewindReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner: Mutex::new(inner),
            prefix: Vec::new(),
            recording: true,
            pos: 0,
        }
    }
}

impl<R: Read> Read for RewindReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let pos = self.pos as usize;
        if pos < self.prefix.len() {
            let n = buf.len().min(self.prefix.len() - pos);
            buf[..n].copy_from_slice(&self.prefix[pos..pos + n]);
            self.pos += n as u64;
            return Ok(n);
        }

        let inner = self
            .inner
            .get_mut()
            .map_err(|_| io::Error::other("stream reader poisoned"))?;
        let n = inner.read(buf)?;

        if self.recording {
            if self.prefix.len() + n <= REWIND_LIMIT {
                self.prefix.extend_from_slice(&buf[..n]);
            } else {
                self.recording = false;
            }
        }
        self.pos += n as u64;
        Ok(n)
    }
}

impl<R: Read> Seek for RewindReader<R> {
    fn seek(&mut self, to: SeekFrom) -> io::Result<u64> {
        let target = match to {
            SeekFrom::Start(n) => Some(n),
            SeekFrom::Current(d) => self.pos.checked_add_signed(d),
            SeekFrom::End(_) => None,
        };

        match target {
            Some(t) if t == self.pos => Ok(t),
            Some(t) if self.recording && t <= self.prefix.len() as u64 => {
                self.pos = t;
                Ok(t)
            }
            _ => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "live stream is not seekable",
            )),
        }
    }
}
