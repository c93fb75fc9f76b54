//! Shoutcast/Icecast in-band metadata.
//!
//! When a client sends `Icy-MetaData: 1`, the server interleaves a metadata
//! block after every `icy-metaint` bytes of audio: one length byte `n`
//! followed by `n * 16` bytes of `key='value';` pairs, NUL padded.

use std::io::{self, Read};

/// Passes audio through and hands every new `StreamTitle` to `on_title`.
pub(crate) struct IcyReader<R, F> {
    inner: R,
    metaint: Option<usize>,
    until_meta: usize,
    last_title: Option<String>,
    on_title: F,
}

impl<R: Read, F: FnMut(String)> IcyReader<R, F> {
    /// `metaint` of `None` (or zero) means the stream carries no metadata.
    pub(crate) fn new(inner: R, metaint: Option<usize>, on_title: F) -> Self {
        let metaint = metaint.filter(|&n| n > 0);
        Self {
            inner,
            metaint,
            until_meta: metaint.unwrap_or(0),
            last_title: None,
            on_title,
        }
    }

    fn read_metadata_block(&mut self) -> io::Result<()> {
        let mut len = [0u8; 1];
        self.inner.read_exact(&mut len)?;
        let size = len[0] as usize * 16;
        if size == 0 {
            return Ok(());
        }

        let mut block = vec![0u8; size];
        self.inner.read_exact(&mut block)?;
        let text = String::from_utf8_lossy(&block);

        if let Some(title) = stream_title(&text) {
            if self.last_title.as_deref() != Some(title) {
                tracing::debug!(title, "icy stream title");
                self.last_title = Some(title.to_string());
                (self.on_title)(title.to_string());
            }
        }
        Ok(())
    }
}

impl<R: Read, F: FnMut(String)> Read for IcyReader<R, F> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(metaint) = self.metaint else {
            return self.inner.read(buf);
        };
        if buf.is_empty() {
            return Ok(0);
        }

        if self.until_meta == 0 {
            self.read_metadata_block()?;
            self.until_meta = metaint;
        }

        let want = buf.len().min(self.until_meta);
        let n = self.inner.read(&mut buf[..want])?;
        self.until_meta -= n;
        Ok(n)
    }
}

/// Extract the `StreamTitle` value from a metadata block.
pub(crate) fn stream_title(block: &str) -> Option<&str> {
    const KEY: &str = "StreamTitle='";
    let start = block.find(KEY)? + KEY.len();
    let rest = &block[start..];
    // Titles may themselves contain `'`, so only `';` ends the value.
    let end = rest.find("';").or_else(|| rest.rfind('\''))?;
    Some(&rest[..end])
}
