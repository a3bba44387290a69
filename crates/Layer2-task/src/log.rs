//! Task output capture
//!
//! The orchestrator hands back output as a lazy sequence of byte chunks
//! ([`LogChunks`]). It is finite and can only be walked once. The default
//! consumer, [`collect_output`], drains it into a single [`OutputBuffer`].

use futures::stream::BoxStream;
use futures::StreamExt;
use podrun_foundation::Result;
use tracing::debug;

/// One-shot stream of raw output chunks, in emission order
pub type LogChunks = BoxStream<'static, Result<Vec<u8>>>;

/// Bytes accumulated from a task's stdout/stderr
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    bytes: Vec<u8>,
    chunks: usize,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
        self.chunks += 1;
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of chunks that went into the buffer
    pub fn chunk_count(&self) -> usize {
        self.chunks
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode as UTF-8; invalid sequences become U+FFFD
    pub fn into_string(self) -> String {
        match String::from_utf8(self.bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    }
}

/// Drain `chunks` completely into memory
///
/// The stream is consumed and dropped before this returns, on success and on
/// error. An error mid-stream discards everything read so far.
pub async fn collect_output(mut chunks: LogChunks) -> Result<OutputBuffer> {
    let mut buffer = OutputBuffer::new();
    while let Some(chunk) = chunks.next().await {
        buffer.push(&chunk?);
    }
    debug!(
        bytes = buffer.len(),
        chunks = buffer.chunk_count(),
        "Output stream drained"
    );
    Ok(buffer)
}
