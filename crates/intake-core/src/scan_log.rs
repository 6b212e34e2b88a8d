use std::collections::VecDeque;

use intake_model::ScanLogEntry;

pub const DEFAULT_SCAN_LOG_CAPACITY: usize = 20;

/// Most recent scan events, newest first.
#[derive(Debug, Clone)]
pub struct ScanLog {
    entries: VecDeque<ScanLogEntry>,
    capacity: usize,
}

impl ScanLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: ScanLogEntry) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn entries(&self) -> Vec<ScanLogEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ScanLog {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use intake_model::ScanStatus;

    use super::*;

    fn entry(id: usize) -> ScanLogEntry {
        ScanLogEntry {
            sample_id: id.to_string(),
            status: ScanStatus::Success,
            qaqc_type: None,
            date: "2024-05-01".to_string(),
            time: "10:00:00".to_string(),
        }
    }

    #[test]
    fn keeps_newest_within_capacity() {
        let mut log = ScanLog::new(3);
        for id in 0..5 {
            log.push(entry(id));
        }
        let ids: Vec<String> = log.entries().into_iter().map(|e| e.sample_id).collect();
        assert_eq!(ids, vec!["4", "3", "2"]);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut log = ScanLog::new(0);
        log.push(entry(1));
        assert!(log.is_empty());
    }
}
