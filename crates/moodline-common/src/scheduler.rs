use std::collections::BTreeMap;
use std::time::Instant;

/// Purpose of a deferred action. At most one action per key is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKey {
    FirstLayout,
    Recenter,
    GraceRelease,
    AutoReturn,
}

impl TimerKey {
    pub fn label(self) -> &'static str {
        match self {
            TimerKey::FirstLayout => "first-layout",
            TimerKey::Recenter => "recenter",
            TimerKey::GraceRelease => "grace-release",
            TimerKey::AutoReturn => "auto-return",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    deadline: Instant,
    seq: u64,
}

/// Keyed, cancellable deferred actions driven by caller-supplied time
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: BTreeMap<TimerKey, Pending>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `key` for `deadline`, replacing any pending instance of it
    pub fn schedule(&mut self, key: TimerKey, deadline: Instant) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert(key, Pending { deadline, seq });
    }

    /// Returns whether something was actually pending
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        self.pending.remove(&key).is_some()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.pending.contains_key(&key)
    }

    pub fn deadline(&self, key: TimerKey) -> Option<Instant> {
        self.pending.get(&key).map(|p| p.deadline)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.deadline).min()
    }

    pub fn keys(&self) -> Vec<TimerKey> {
        self.pending.keys().copied().collect()
    }

    /// Remove and return the earliest action due at or before `now`.
    ///
    /// Equal deadlines fire in the order they were scheduled.
    pub fn pop_due(&mut self, now: Instant) -> Option<(TimerKey, Instant)> {
        let (key, pending) = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .min_by_key(|(_, p)| (p.deadline, p.seq))
            .map(|(k, p)| (*k, *p))?;
        self.pending.remove(&key);
        Some((key, pending.deadline))
    }
}
