//! Fixed-capacity circular history of controller transitions.

use heapless::{HistoryBuffer, Vec};

use super::entry::LogEntry;

/// Number of entries retained by the default event log.
pub const EVENT_LOG_CAPACITY: usize = 50;

/// Circular buffer of [`LogEntry`] records.
///
/// Appending never fails: once full, each append evicts the oldest entry.
/// Indexing is chronological, `0` being the oldest retained entry.
pub struct EventLog<const C: usize = EVENT_LOG_CAPACITY> {
    ring: HistoryBuffer<LogEntry, C>,
}

impl<const C: usize> Default for EventLog<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const C: usize> core::fmt::Debug for EventLog<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventLog")
            .field("count", &self.count())
            .field("capacity", &C)
            .finish()
    }
}

impl<const C: usize> EventLog<C> {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self {
            ring: HistoryBuffer::new(),
        }
    }

    /// Append an entry, overwriting the oldest one when full.
    #[inline]
    pub fn append(&mut self, entry: LogEntry) {
        self.ring.write(entry);
    }

    /// Number of valid entries, at most `C`.
    #[inline]
    pub fn count(&self) -> usize {
        self.ring.len()
    }

    /// Check if no entries are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.len() == 0
    }

    /// Maximum number of retained entries.
    #[inline]
    pub const fn capacity(&self) -> usize {
        C
    }

    /// Entry `index` in chronological order, or `None` past the newest.
    pub fn entry_at(&self, index: usize) -> Option<&LogEntry> {
        if index >= self.count() {
            return None;
        }
        self.ring.oldest_ordered().nth(index)
    }

    /// Most recently appended entry.
    #[inline]
    pub fn latest(&self) -> Option<&LogEntry> {
        self.ring.recent()
    }

    /// Iterate over entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> + '_ {
        self.ring.oldest_ordered()
    }

    /// Up to `max_entries` of the newest faulted entries, oldest first.
    pub fn recent_faults(&self, max_entries: usize) -> Vec<LogEntry, C> {
        let total = self.iter().filter(|entry| entry.is_fault()).count();
        let skip = total.saturating_sub(max_entries);

        let mut faults = Vec::new();
        for entry in self
            .iter()
            .filter(|entry| entry.is_fault())
            .skip(skip)
            .take(max_entries)
        {
            // Bounded by the ring length, which never exceeds C.
            let _ = faults.push(*entry);
        }
        faults
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.ring.clear();
        info!("event log cleared");
    }
}
