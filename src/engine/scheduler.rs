/// Identifies a timer created by [`Scheduler::once`] or [`Scheduler::every`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Timer {
    id: TimerId,
    /// Absolute virtual time of the next fire.
    deadline: u64,
    /// Reschedule period for periodic timers; `None` for one-shots.
    period: Option<u64>,
}

/// Single-threaded timer queue over a virtual millisecond clock.
///
/// The host loop moves the clock forward with [`Scheduler::fire_before`],
/// which yields due timers one at a time in deadline order. A handler that
/// cancels a timer between fires therefore suppresses every later fire of
/// that timer. Tests drive the same object with hand-picked targets instead
/// of wall-clock delays.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: u64,
    next_id: u64,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of timers still scheduled.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Schedule a one-shot timer `delay` milliseconds from now.
    pub fn once(&mut self, delay: u64) -> TimerId {
        self.push(delay, None)
    }

    /// Schedule a periodic timer firing every `period` milliseconds. The
    /// period is floored to 1 so a periodic timer always makes progress.
    pub fn every(&mut self, period: u64) -> TimerId {
        let period = period.max(1);
        self.push(period, Some(period))
    }

    /// Cancel a timer. Cancelling an already-fired or unknown timer is a
    /// no-op, so cancellation is idempotent.
    pub fn cancel(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }

    /// Advance the clock to the earliest due deadline at or before `target`
    /// and return that timer's id; the timer is rescheduled (periodic) or
    /// removed (one-shot) before this returns. With nothing due, the clock
    /// lands on `target` and `None` is returned. Timers sharing a deadline
    /// fire in creation order.
    pub fn fire_before(&mut self, target: u64) -> Option<TimerId> {
        let due = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= target)
            .min_by_key(|(_, t)| (t.deadline, t.id.0))
            .map(|(i, _)| i);
        match due {
            Some(i) => {
                self.now = self.timers[i].deadline;
                let id = self.timers[i].id;
                match self.timers[i].period {
                    Some(period) => self.timers[i].deadline += period,
                    None => {
                        self.timers.remove(i);
                    }
                }
                Some(id)
            }
            None => {
                if target > self.now {
                    self.now = target;
                }
                None
            }
        }
    }

    fn push(&mut self, delay: u64, period: Option<u64>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer { id, deadline: self.now + delay, period });
        id
    }
}
