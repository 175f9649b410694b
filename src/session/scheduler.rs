//! Clock and repeating-timer queue.
//!
//! Nothing here runs on its own thread. The owner asks the queue which timers
//! are due ([`Scheduler::take_due`]) and dispatches them itself, so every
//! callback runs to completion before the next one starts. A timer that is
//! late fires once; the periods it missed are skipped, never replayed.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// Source of time for the session.
pub trait Clock {
    /// Monotonic time elapsed since the clock's origin.
    fn elapsed(&self) -> Duration;

    /// Current wall-clock time, used for timestamps shown to the user.
    fn wall_time(&self) -> DateTime<Utc>;
}

/// Real time, measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }

    fn wall_time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
    base: DateTime<Utc>,
}

impl ManualClock {
    /// Manual clock whose wall time starts at the current instant.
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    /// Manual clock whose wall time starts at `base`.
    pub fn starting_at(base: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(Duration::ZERO)),
            base,
        }
    }

    /// Move time forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        self.now.get()
    }

    fn wall_time(&self) -> DateTime<Utc> {
        let offset = chrono::Duration::from_std(self.now.get()).unwrap_or(chrono::Duration::zero());
        self.base + offset
    }
}

/// Monotonic session counter. Bumped every time the active identity changes
/// or is removed; timers carry the generation they were started under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// The generation after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Which session timer a handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// One-second lifetime tick.
    Countdown,
    /// Simulated arrival tick.
    Feed,
}

/// What a timer is for and which session started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTag {
    pub kind: TimerKind,
    pub generation: Generation,
}

/// Opaque handle returned by [`Scheduler::schedule_repeating`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// A timer that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub handle: TimerHandle,
    pub tag: TimerTag,
    /// The deadline that was reached (not the time it was noticed).
    pub due: Duration,
}

/// Repeating-timer scheduling.
pub trait Scheduler {
    /// Start a timer that first fires one `period` after `now`, then every `period`.
    fn schedule_repeating(&mut self, now: Duration, period: Duration, tag: TimerTag) -> TimerHandle;

    /// Stop a timer. Returns `false` if it was not scheduled. Once this
    /// returns the handle is never reported by [`Scheduler::take_due`] again.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Whether `handle` is still scheduled.
    fn is_scheduled(&self, handle: TimerHandle) -> bool;

    /// Timers due at `now`, earliest deadline first. Each timer appears at
    /// most once per call.
    fn take_due(&mut self, now: Duration) -> Vec<Fired>;

    /// The earliest pending deadline.
    fn next_deadline(&self) -> Option<Duration>;
}

#[derive(Debug, Clone)]
struct Timer {
    handle: TimerHandle,
    period: Duration,
    next_due: Duration,
    tag: TimerTag,
}

/// In-memory [`Scheduler`].
#[derive(Debug, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
    next_id: u64,
}

/// Shortest period accepted; a zero period would fire on every poll.
const MIN_PERIOD: Duration = Duration::from_millis(1);

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scheduled timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Number of scheduled timers of `kind`.
    pub fn count_kind(&self, kind: TimerKind) -> usize {
        self.timers.iter().filter(|t| t.tag.kind == kind).count()
    }
}

impl Scheduler for TimerQueue {
    fn schedule_repeating(&mut self, now: Duration, period: Duration, tag: TimerTag) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let period = period.max(MIN_PERIOD);
        self.timers.push(Timer {
            handle,
            period,
            next_due: now.saturating_add(period),
            tag,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    fn take_due(&mut self, now: Duration) -> Vec<Fired> {
        let mut fired = Vec::new();
        for timer in self.timers.iter_mut().filter(|t| t.next_due <= now) {
            fired.push(Fired {
                handle: timer.handle,
                tag: timer.tag,
                due: timer.next_due,
            });
            // Skip any whole periods that were missed: the next deadline is
            // the first period boundary strictly after `now`.
            let period = timer.period.as_nanos();
            let into_period = (now - timer.next_due).as_nanos() % period;
            let step = u64::try_from(period - into_period)
                .map(Duration::from_nanos)
                .unwrap_or(timer.period);
            timer.next_due = now.saturating_add(step);
        }
        fired.sort_by_key(|f| (f.due, f.handle.0));
        fired
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.next_due).min()
    }
}
