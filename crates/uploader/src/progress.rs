//! Progress reporting for the streamed request body.

use bytes::Bytes;

/// Callback invoked with integer percent complete after each body chunk.
pub type ProgressFn = Box<dyn Fn(u8) + Send + Sync>;

/// Integer percent complete: `floor(sent * 100 / total)`.
pub fn percent_complete(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    ((sent * 100) / total).min(100) as u8
}

/// Iterator yielding fixed-size payload chunks, reporting cumulative
/// progress as each chunk is handed to the transport.
pub(crate) struct ProgressChunks {
    payload: Vec<u8>,
    offset: usize,
    chunk_size: usize,
    on_progress: Option<ProgressFn>,
}

impl ProgressChunks {
    pub(crate) fn new(
        payload: Vec<u8>,
        chunk_size: usize,
        on_progress: Option<ProgressFn>,
    ) -> Self {
        Self {
            payload,
            offset: 0,
            chunk_size,
            on_progress,
        }
    }
}

impl Iterator for ProgressChunks {
    type Item = Bytes;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.payload.len() {
            return None;
        }
        let end = (self.offset + self.chunk_size).min(self.payload.len());
        let chunk = Bytes::copy_from_slice(&self.payload[self.offset..end]);
        self.offset = end;

        if let Some(on_progress) = &self.on_progress {
            on_progress(percent_complete(
                self.offset as u64,
                self.payload.len() as u64,
            ));
        }
        Some(chunk)
    }
}
