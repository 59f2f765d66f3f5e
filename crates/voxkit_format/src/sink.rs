//! Per-chunk diagnostic records.
//!
//! When [`crate::DecodeOptions::write_log`] is set, the decoder hands one
//! [`ChunkLogRecord`] per parsed chunk to a [`ChunkLogSink`]. The detail
//! lines describe what the chunk contributed to the model.

/// One parsed chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkLogRecord {
    /// 1-based position of the chunk in document order.
    pub ordinal: usize,
    /// Tag as text (lossy for non-ASCII tags).
    pub tag: String,
    /// Declared content length.
    pub content_len: usize,
    /// Declared children length.
    pub children_len: usize,
    /// Chunk-specific detail lines.
    pub details: Vec<String>,
}

impl std::fmt::Display for ChunkLogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "CHUNK NAME: {} ({})", self.tag, self.ordinal)?;
        writeln!(f, "CHUNK SIZE: {} BYTES", self.content_len)?;
        write!(f, "CHILD CHUNK SIZE: {}", self.children_len)?;
        for line in &self.details {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}

/// Receives chunk records during decoding.
pub trait ChunkLogSink {
    /// Called once per parsed chunk, after its content was applied.
    fn record(&mut self, record: ChunkLogRecord);
}

/// Forwards records to `tracing` at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl ChunkLogSink for TracingSink {
    fn record(&mut self, record: ChunkLogRecord) {
        tracing::debug!(
            ordinal = record.ordinal,
            tag = %record.tag,
            content_len = record.content_len,
            children_len = record.children_len,
            "{}",
            record.details.join("; ")
        );
    }
}

/// Collects records in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    records: Vec<ChunkLogRecord>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records received so far.
    #[must_use]
    pub fn records(&self) -> &[ChunkLogRecord] {
        &self.records
    }

    /// Takes ownership of the collected records.
    #[must_use]
    pub fn into_records(self) -> Vec<ChunkLogRecord> {
        self.records
    }
}

impl ChunkLogSink for MemorySink {
    fn record(&mut self, record: ChunkLogRecord) {
        self.records.push(record);
    }
}

impl<S: ChunkLogSink + ?Sized> ChunkLogSink for &mut S {
    fn record(&mut self, record: ChunkLogRecord) {
        (**self).record(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_display() {
        let record = ChunkLogRecord {
            ordinal: 2,
            tag: "SIZE".to_string(),
            content_len: 12,
            children_len: 0,
            details: vec!["-> SIZE: 3 3 3".to_string()],
        };
        assert_eq!(
            record.to_string(),
            "CHUNK NAME: SIZE (2)\nCHUNK SIZE: 12 BYTES\nCHILD CHUNK SIZE: 0\n-> SIZE: 3 3 3"
        );
    }

    fn feed<S: ChunkLogSink>(mut sink: S) {
        sink.record(ChunkLogRecord {
            ordinal: 1,
            tag: "MAIN".to_string(),
            content_len: 0,
            children_len: 0,
            details: Vec::new(),
        });
    }

    #[test]
    fn test_memory_sink_through_reference() {
        let mut sink = MemorySink::new();
        feed(&mut sink);
        feed(&mut sink);
        assert_eq!(sink.records().len(), 2);
        assert_eq!(sink.into_records()[1].tag, "MAIN");
    }
}
