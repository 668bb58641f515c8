//! Pending set: hosts waiting for a tick, in FIFO order

use std::collections::{HashSet, VecDeque};

use crate::foundation::collections::HostHandle;

/// Membership set paired with a processing queue
///
/// A handle popped from the queue stays a member until the caller either
/// pushes it back or forgets it, so re-registration while it is being
/// processed cannot enqueue it twice.
#[derive(Debug, Default)]
pub struct PendingSet {
    marked: HashSet<HostHandle>,
    queue: VecDeque<HostHandle>,
}

impl PendingSet {
    /// Add a host; returns false if it was already pending
    pub fn insert(&mut self, handle: HostHandle) -> bool {
        if !self.marked.insert(handle) {
            return false;
        }
        self.queue.push_back(handle);
        true
    }

    /// Take the next host to process
    pub fn pop_front(&mut self) -> Option<HostHandle> {
        self.queue.pop_front()
    }

    /// Put a popped host at the back of the queue
    pub fn requeue(&mut self, handle: HostHandle) {
        debug_assert!(self.marked.contains(&handle));
        self.queue.push_back(handle);
    }

    /// Drop a popped host from membership
    pub fn forget(&mut self, handle: HostHandle) {
        self.marked.remove(&handle);
    }

    /// Remove a host whether or not it is queued
    pub fn remove(&mut self, handle: HostHandle) -> bool {
        if !self.marked.remove(&handle) {
            return false;
        }
        self.queue.retain(|&queued| queued != handle);
        true
    }

    /// Whether the host is pending
    pub fn contains(&self, handle: HostHandle) -> bool {
        self.marked.contains(&handle)
    }

    /// Number of pending hosts
    pub fn len(&self) -> usize {
        self.marked.len()
    }

    /// No host is pending
    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.marked.clear();
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::SlotMap;

    fn handles(count: usize) -> Vec<HostHandle> {
        let mut map: SlotMap<HostHandle, ()> = SlotMap::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_insert_is_idempotent() {
        let h = handles(1);
        let mut pending = PendingSet::default();

        assert!(pending.insert(h[0]));
        assert!(!pending.insert(h[0]));
        assert_eq!(pending.len(), 1);
        assert_eq!(pending.pop_front(), Some(h[0]));
        assert_eq!(pending.pop_front(), None);
    }

    #[test]
    fn test_popped_handle_is_still_member_until_forgotten() {
        let h = handles(2);
        let mut pending = PendingSet::default();
        pending.insert(h[0]);
        pending.insert(h[1]);

        let first = pending.pop_front().expect("queued");
        assert!(!pending.insert(first), "in-flight host must not be queued twice");
        pending.requeue(first);
        assert_eq!(pending.pop_front(), Some(h[1]));
        pending.forget(h[1]);
        assert!(!pending.contains(h[1]));
        assert_eq!(pending.pop_front(), Some(h[0]));
    }

    #[test]
    fn test_remove_purges_queue() {
        let h = handles(3);
        let mut pending = PendingSet::default();
        for &handle in &h {
            pending.insert(handle);
        }

        assert!(pending.remove(h[1]));
        assert!(!pending.remove(h[1]));
        assert_eq!(pending.pop_front(), Some(h[0]));
        assert_eq!(pending.pop_front(), Some(h[2]));
        assert_eq!(pending.pop_front(), None);
    }
}
