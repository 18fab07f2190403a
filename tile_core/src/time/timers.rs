/// Identifies a scheduled timer. Handles are never reused, so cancelling a
/// timer that already fired (or was cleared) is a harmless no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Entry<K> {
    id: u64,
    due: f64,
    period: Option<f64>,
    /// Scheduling order; breaks ties between timers due at the same instant.
    seq: u64,
    payload: K,
}

/// Delayed and repeating callbacks on a millisecond timeline.
///
/// Timers carry a payload instead of a closure; the owner drains due payloads
/// and handles them itself, which keeps everything single threaded and
/// replayable.
#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    now: f64,
    next_id: u64,
    next_seq: u64,
    entries: Vec<Entry<K>>,
}

/// Repeating timers never fire more often than this.
const MIN_PERIOD_MS: f64 = 1.0;

impl<K: Clone> TimerQueue<K> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            next_seq: 0,
            entries: Vec::new(),
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn schedule_once(&mut self, delay_ms: f64, payload: K) -> TimerHandle {
        self.push(delay_ms.max(0.0), None, payload)
    }

    pub fn schedule_repeating(&mut self, interval_ms: f64, payload: K) -> TimerHandle {
        let period = interval_ms.max(MIN_PERIOD_MS);
        self.push(period, Some(period), payload)
    }

    /// Returns `true` if the timer was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != handle.0);
        self.entries.len() != before
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.id == handle.0)
    }

    /// Drops every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Pops the earliest timer due at or before `until`, moving the clock to
    /// its due time. Repeating timers are re-armed one period later.
    pub fn pop_due(&mut self, until: f64) -> Option<K> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= until)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i)?;

        let due = self.entries[idx].due;
        if due > self.now {
            self.now = due;
        }

        match self.entries[idx].period {
            Some(period) => {
                let seq = self.bump_seq();
                let entry = &mut self.entries[idx];
                entry.due += period;
                entry.seq = seq;
                Some(entry.payload.clone())
            }
            None => Some(self.entries.swap_remove(idx).payload),
        }
    }

    /// Moves the clock forward without firing anything.
    pub fn advance_to(&mut self, t: f64) {
        if t > self.now {
            self.now = t;
        }
    }

    /// Fires everything due within the next `dt_ms` and moves the clock.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<K> {
        let until = self.now + dt_ms.max(0.0);
        let mut fired = Vec::new();
        while let Some(payload) = self.pop_due(until) {
            fired.push(payload);
        }
        self.advance_to(until);
        fired
    }

    fn push(&mut self, delay: f64, period: Option<f64>, payload: K) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        let seq = self.bump_seq();
        self.entries.push(Entry {
            id,
            due: self.now + delay,
            period,
            seq,
            payload,
        });
        TimerHandle(id)
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

impl<K: Clone> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}
