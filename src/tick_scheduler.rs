//! Tick scheduling and timing utilities.
//!
//! Provides portable fixed-period pacing without async/await or
//! platform-specific timers. The caller is responsible for sleeping or
//! waiting between polls.

use embassy_time::{Duration, Instant};

/// Number of periods we may fall behind before the backlog is dropped.
const MAX_DRIFT_PERIODS: u32 = 2;

/// Repeating timer driven by caller-supplied time.
///
/// - `start` arms the timer with the first tick due immediately
/// - `poll` reports at most one due tick per call
/// - when we fall more than two periods behind, missed ticks are skipped
///   instead of replayed in a burst
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = TickScheduler::new(Duration::from_millis(25));
/// scheduler.start(Instant::now());
///
/// loop {
///     if scheduler.poll(Instant::now()) {
///         render();
///     }
///     // Platform-specific sleep
///     sleep_until(scheduler.next_deadline());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TickScheduler {
    period: Duration,
    next_tick: Option<Instant>,
}

impl TickScheduler {
    /// Create a stopped scheduler
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            next_tick: None,
        }
    }

    /// (Re)start the timer, the first tick is due at `now`
    pub fn start(&mut self, now: Instant) {
        self.next_tick = Some(now);
    }

    /// Stop the timer
    pub fn stop(&mut self) {
        self.next_tick = None;
    }

    pub const fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Deadline of the next tick, `None` when stopped
    pub const fn next_deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Check whether a tick is due and schedule the following one.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(mut next) = self.next_tick else {
            return false;
        };
        if now < next {
            return false;
        }

        // Drift correction: if we've fallen too far behind, reset to now
        if now > next + self.period * MAX_DRIFT_PERIODS {
            next = now;
        }
        self.next_tick = Some(next + self.period);

        true
    }

    /// How long to wait until the next tick (zero if behind schedule)
    pub fn sleep_duration(&self, now: Instant) -> Option<Duration> {
        self.next_tick
            .map(|next| next.checked_duration_since(now).unwrap_or(Duration::from_ticks(0)))
    }
}
