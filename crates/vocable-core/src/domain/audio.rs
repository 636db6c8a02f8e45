//! Exported audio payloads.

/// MIME type attached to captured speech.
pub const WAV_MIME: &str = "audio/wav";

/// An opaque audio payload with its MIME type.
///
/// Produced once per capture or fallback request and owned by the caller
/// afterwards; nothing inside vocable mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBlob {
    bytes: Vec<u8>,
    mime: String,
}

impl AudioBlob {
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
        }
    }

    /// Concatenate recorder chunks, in order, into a single blob.
    pub fn from_chunks<I>(chunks: I, mime: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        let bytes = chunks.into_iter().flatten().collect();
        Self::new(bytes, mime)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
