use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Handle for a scheduled task, usable to cancel it before it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Virtual millisecond clock with one-shot timers.
///
/// Tasks due at the same instant fire in the order they were scheduled.
/// Cancelled entries stay in the heap and are skipped when reached.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: u64,
    next_id: u64,
    queue: BinaryHeap<Reverse<(u64, TimerId)>>,
    pending: HashMap<TimerId, T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 0,
            queue: BinaryHeap::new(),
            pending: HashMap::new(),
        }
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.push(Reverse((self.now + delay_ms, id)));
        self.pending.insert(id, task);
        id
    }

    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Deadline of the earliest live timer.
    pub fn next_deadline(&mut self) -> Option<u64> {
        while let Some(Reverse((deadline, id))) = self.queue.peek().copied() {
            if self.pending.contains_key(&id) {
                return Some(deadline);
            }
            self.queue.pop();
        }
        None
    }

    /// Take the next task due at or before `until`, moving the clock to its
    /// deadline.
    pub fn pop_due(&mut self, until: u64) -> Option<T> {
        while let Some(Reverse((deadline, id))) = self.queue.peek().copied() {
            if deadline > until {
                return None;
            }
            self.queue.pop();
            if let Some(task) = self.pending.remove(&id) {
                self.now = self.now.max(deadline);
                return Some(task);
            }
        }
        None
    }

    /// Move the clock forward once nothing more is due. Never goes backwards.
    pub fn settle(&mut self, until: u64) {
        self.now = self.now.max(until);
    }
}
