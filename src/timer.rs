use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Session tick period
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Production clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-advanced clock for tests. Clones share the same time.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// A cancellable repeating schedule.
///
/// The timer never calls anything itself; the owner asks how many periods
/// have come due with [`IntervalTimer::due`]. Starting an active timer and
/// stopping an inactive one are both no-ops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntervalTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns false if the timer was already running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.next_due.is_some() {
            return false;
        }
        self.next_due = Some(now + self.period);
        true
    }

    /// Returns false if the timer was not running.
    pub fn stop(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    /// Number of whole periods that have elapsed since the last call, advancing
    /// the schedule past them.
    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next_due else {
            return 0;
        };

        let mut fired = 0;
        while next <= now {
            fired += 1;
            next += self.period;
        }
        self.next_due = Some(next);
        fired
    }

    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|next| next.saturating_duration_since(now))
    }
}

impl Default for IntervalTimer {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}
