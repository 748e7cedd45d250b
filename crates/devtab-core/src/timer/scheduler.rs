//! Single-threaded callback scheduler with a virtual clock.
//!
//! The scheduler never sleeps and owns no threads. Whoever drives it moves
//! the clock forward and pulls due handles with [`Scheduler::pop_due`]; the
//! owner of a handle decides what firing it means.

use std::time::Duration;

/// Cancellable handle for a scheduled callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy)]
enum Kind {
    Repeating { period_ms: u64 },
    Once,
}

#[derive(Debug, Clone)]
struct Entry {
    handle: TimerHandle,
    due_ms: u64,
    kind: Kind,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds elapsed on the virtual clock.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule a repeating callback, first due one `period` from now.
    pub fn every(&mut self, period: Duration) -> TimerHandle {
        let period_ms = (period.as_millis() as u64).max(1);
        self.push(period_ms, Kind::Repeating { period_ms })
    }

    /// Schedule a one-shot callback due `delay` from now.
    pub fn once(&mut self, delay: Duration) -> TimerHandle {
        self.push(delay.as_millis() as u64, Kind::Once)
    }

    /// Cancel a pending callback. Returns false if it was not scheduled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Earliest deadline among pending callbacks, in virtual milliseconds.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.due_ms).min()
    }

    /// Pop the next callback due at or before `until_ms`.
    ///
    /// Moves the clock to the callback's deadline. Ties go to the entry
    /// scheduled first. Repeating entries are re-armed one period later.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerHandle> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= until_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.handle.0))
            .map(|(i, _)| i)?;

        let Entry { handle, due_ms, kind } = self.entries[idx].clone();
        self.now_ms = self.now_ms.max(due_ms);
        match kind {
            Kind::Repeating { period_ms } => self.entries[idx].due_ms = due_ms + period_ms,
            Kind::Once => {
                self.entries.remove(idx);
            }
        }
        Some(handle)
    }

    /// Move the clock forward to `ms` without firing anything.
    pub fn set_now(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }

    fn push(&mut self, delay_ms: u64, kind: Kind) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.entries.push(Entry {
            handle,
            due_ms: self.now_ms.saturating_add(delay_ms),
            kind,
        });
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeating_entry_rearms() {
        let mut s = Scheduler::new();
        let h = s.every(Duration::from_secs(1));
        assert_eq!(s.pop_due(2500), Some(h));
        assert_eq!(s.now_ms(), 1000);
        assert_eq!(s.pop_due(2500), Some(h));
        assert_eq!(s.now_ms(), 2000);
        assert_eq!(s.pop_due(2500), None);
        assert!(s.is_scheduled(h));
        assert_eq!(s.next_deadline_ms(), Some(3000));
    }

    #[test]
    fn once_entry_fires_once() {
        let mut s = Scheduler::new();
        let h = s.once(Duration::from_secs(1));
        assert_eq!(s.pop_due(5000), Some(h));
        assert_eq!(s.pop_due(5000), None);
        assert!(!s.is_scheduled(h));
    }

    #[test]
    fn cancelled_entry_never_fires() {
        let mut s = Scheduler::new();
        let h = s.every(Duration::from_secs(1));
        assert!(s.cancel(h));
        assert!(!s.cancel(h));
        assert_eq!(s.pop_due(10_000), None);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn ties_fire_in_creation_order() {
        let mut s = Scheduler::new();
        let a = s.once(Duration::from_secs(1));
        let b = s.every(Duration::from_secs(1));
        assert_eq!(s.pop_due(1000), Some(a));
        assert_eq!(s.pop_due(1000), Some(b));
    }

    #[test]
    fn deadlines_are_relative_to_current_clock() {
        let mut s = Scheduler::new();
        s.set_now(4200);
        let h = s.once(Duration::from_millis(800));
        assert_eq!(s.next_deadline_ms(), Some(5000));
        assert_eq!(s.pop_due(4999), None);
        assert_eq!(s.pop_due(5000), Some(h));
    }
}
