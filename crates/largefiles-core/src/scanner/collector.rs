/// Thread-safe accumulation of discovered files.
///
/// Discovery tasks append concurrently through `&Collector`; the results are
/// only reachable through [`Collector::drain`], which takes the collector by
/// value. The borrow checker therefore guarantees that draining happens after
/// every task holding a reference has finished.
use crate::model::FileRecord;
use parking_lot::Mutex;

#[derive(Debug, Default)]
pub struct Collector {
    records: Mutex<Vec<FileRecord>>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record. Each call holds the lock only for the push.
    pub fn submit(&self, record: FileRecord) {
        self.records.lock().push(record);
    }

    /// Number of records submitted so far.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the collector and return every submitted record, in no
    /// particular order.
    pub fn drain(self) -> Vec<FileRecord> {
        self.records.into_inner()
    }
}
