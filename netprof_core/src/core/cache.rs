use log::debug;
use parking_lot::Mutex;

use super::profile::ProfileRecord;

/// In-memory copy of the daemon's profile list.
///
/// Every operation takes the lock once, copies or swaps the vector, and
/// releases it. The lock is never held across an `.await`, so a stalled
/// daemon call can not block readers.
#[derive(Debug, Default)]
pub struct ProfileCache {
    records: Mutex<Vec<ProfileRecord>>,
}

impl ProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole content. Never merges with what was there.
    pub fn set(&self, records: Vec<ProfileRecord>) {
        let count = records.len();
        let previous = {
            let mut guard = self.records.lock();
            std::mem::replace(&mut *guard, records)
        };
        debug!("profile cache replaced: {} -> {} entries", previous.len(), count);
    }

    pub fn clear(&self) {
        let previous = std::mem::take(&mut *self.records.lock());
        debug!("profile cache cleared ({} entries dropped)", previous.len());
    }

    /// Owned copy of the current list, in daemon order.
    pub fn snapshot(&self) -> Vec<ProfileRecord> {
        self.records.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}
