use thiserror::Error;
use treescope_protocol::HierarchyNode;

/// A failure retrieving one entry of a trace.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("entry index {index} out of range (trace has {len} entries)")]
    OutOfRange { index: usize, len: usize },
    #[error("corrupted entry at index {index}: {reason}")]
    Corrupted { index: usize, reason: String },
}

/// One decoded point in time of a trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Elapsed-realtime nanoseconds.
    pub timestamp: u64,
    pub root: HierarchyNode,
}

/// Indexed access to a trace's snapshots.
///
/// Entry retrieval is fallible: a source may decode lazily and only
/// discover a corrupted record when it is first asked for.
pub trait TraceSource {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, index: usize) -> Result<&Snapshot, SourceError>;
}

/// A fully decoded trace held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    snapshots: Vec<Snapshot>,
}

impl InMemorySource {
    pub fn new(snapshots: Vec<Snapshot>) -> Self {
        Self { snapshots }
    }
}

impl TraceSource for InMemorySource {
    fn len(&self) -> usize {
        self.snapshots.len()
    }

    fn entry(&self, index: usize) -> Result<&Snapshot, SourceError> {
        self.snapshots.get(index).ok_or(SourceError::OutOfRange {
            index,
            len: self.snapshots.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_lookup_and_bounds() {
        let source = InMemorySource::new(vec![Snapshot {
            timestamp: 100,
            root: HierarchyNode::new("root", "root"),
        }]);
        assert_eq!(source.len(), 1);
        assert!(!source.is_empty());
        let entry = source.entry(0).expect("entry in range");
        assert_eq!(entry.timestamp, 100);
        assert_eq!(entry.root.id, "root");
    }

    #[test]
    fn out_of_range_error_carries_context() {
        let source = InMemorySource::default();
        match source.entry(3) {
            Err(SourceError::OutOfRange { index: 3, len: 0 }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
