#![forbid(unsafe_code)]

//! Recurring-timer capability used for auto-play.
//!
//! The stepper never touches a wall clock. It asks a [`Scheduler`] for a
//! recurring timer and receives an opaque [`TimerHandle`]; the host delivers
//! each firing back through [`Stepper::on_tick`](crate::Stepper::on_tick).
//! This keeps playback host-driven: a browser host maps the trait onto
//! `setInterval`/`clearInterval`, and tests use [`ManualScheduler`] to advance
//! time explicitly.

use core::time::Duration;

/// Opaque identifier of a scheduled recurring timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Wrap a host-assigned timer id.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// The host-assigned timer id.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Schedules and cancels recurring callbacks.
///
/// After [`cancel`](Scheduler::cancel) returns, the handle must never be
/// reported as fired again. Cancelling an unknown or already-cancelled handle
/// is a no-op.
pub trait Scheduler {
    /// Start a timer that fires every `interval` until cancelled.
    fn schedule(&mut self, interval: Duration) -> TimerHandle;

    /// Stop a timer.
    fn cancel(&mut self, handle: TimerHandle);
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn schedule(&mut self, interval: Duration) -> TimerHandle {
        (**self).schedule(interval)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        (**self).cancel(handle);
    }
}

impl<S: Scheduler + ?Sized> Scheduler for Box<S> {
    fn schedule(&mut self, interval: Duration) -> TimerHandle {
        (**self).schedule(interval)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        (**self).cancel(handle);
    }
}

/// Upper bound on firings returned by one [`ManualScheduler::advance`].
pub const MAX_FIRINGS_PER_ADVANCE: usize = 1 << 16;

#[derive(Debug, Clone)]
struct ActiveTimer {
    handle: TimerHandle,
    interval: Duration,
    next_due: Duration,
}

/// Deterministic scheduler driven by an explicit monotonic clock.
///
/// Time only moves when [`advance`](Self::advance),
/// [`fire_next`](Self::fire_next) or [`skip_to`](Self::skip_to) is called.
/// Firings are reported in time order. Call counters make it usable as a
/// test double.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    timers: Vec<ActiveTimer>,
    schedule_calls: usize,
    cancel_calls: usize,
}

impl ManualScheduler {
    /// Create a scheduler whose clock starts at `0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of [`Scheduler::schedule`] calls so far.
    #[must_use]
    pub const fn schedule_calls(&self) -> usize {
        self.schedule_calls
    }

    /// Number of [`Scheduler::cancel`] calls so far.
    #[must_use]
    pub const fn cancel_calls(&self) -> usize {
        self.cancel_calls
    }

    /// Number of timers that have not been cancelled.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Whether `handle` is still scheduled.
    #[must_use]
    pub fn is_active(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|timer| timer.handle == handle)
    }

    /// Move the clock forward by `delta` and return every timer firing that
    /// fell due, ordered by due time (ties by handle).
    ///
    /// A timer whose interval fits several times into `delta` fires several
    /// times. At most [`MAX_FIRINGS_PER_ADVANCE`] firings are returned; when
    /// the cap is hit the clock stops at the last returned firing, and the
    /// rest are reported by the next call.
    pub fn advance(&mut self, delta: Duration) -> Vec<TimerHandle> {
        let target = self.now.saturating_add(delta);
        let mut fired = Vec::new();
        while fired.len() < MAX_FIRINGS_PER_ADVANCE {
            let Some(handle) = self.fire_next(target) else {
                self.now = target;
                break;
            };
            fired.push(handle);
        }
        fired
    }

    /// Deliver the earliest firing due at or before `deadline`, moving the
    /// clock to its due time.
    ///
    /// Returns `None`, leaving the clock alone, when nothing is due. A timer
    /// whose next due time would pass [`Duration::MAX`] fires once more and
    /// then expires.
    pub fn fire_next(&mut self, deadline: Duration) -> Option<TimerHandle> {
        let position = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.next_due <= deadline)
            .min_by_key(|(_, timer)| (timer.next_due, timer.handle))
            .map(|(position, _)| position)?;
        let timer = &mut self.timers[position];
        let handle = timer.handle;
        self.now = self.now.max(timer.next_due);
        match timer.next_due.checked_add(timer.interval) {
            Some(next_due) => timer.next_due = next_due,
            None => {
                self.timers.remove(position);
            }
        }
        Some(handle)
    }

    /// Move the clock to `target` without reporting firings.
    ///
    /// Every timer keeps its phase: its next due time becomes the first one
    /// after `target`. Targets in the past are ignored.
    pub fn skip_to(&mut self, target: Duration) {
        if target <= self.now {
            return;
        }
        self.timers.retain_mut(|timer| {
            if timer.next_due > target {
                return true;
            }
            let interval = timer.interval.as_nanos();
            let missed = (target - timer.next_due).as_nanos() / interval + 1;
            let next_due = timer
                .next_due
                .as_nanos()
                .saturating_add(missed.saturating_mul(interval));
            match duration_from_nanos(next_due) {
                Some(next_due) => {
                    timer.next_due = next_due;
                    true
                }
                None => false,
            }
        });
        self.now = target;
    }
}

fn duration_from_nanos(nanos: u128) -> Option<Duration> {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    let secs = u64::try_from(nanos / NANOS_PER_SEC).ok()?;
    // Remainder is below one second, so it fits in u32.
    let subsec = (nanos % NANOS_PER_SEC) as u32;
    Some(Duration::new(secs, subsec))
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, interval: Duration) -> TimerHandle {
        self.schedule_calls += 1;
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        // Zero intervals would fire forever within a single advance.
        let interval = interval.max(Duration::from_nanos(1));
        self.timers.push(ActiveTimer {
            handle,
            interval,
            next_due: self.now.saturating_add(interval),
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.cancel_calls += 1;
        self.timers.retain(|timer| timer.handle != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn timer_fires_once_per_interval() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule(ms(1100));

        assert!(scheduler.advance(ms(1099)).is_empty());
        assert_eq!(scheduler.advance(ms(1)), vec![handle]);
        assert_eq!(scheduler.advance(ms(1100)), vec![handle]);
        assert_eq!(scheduler.now(), ms(2200));
    }

    #[test]
    fn long_advance_reports_every_firing() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule(ms(100));
        assert_eq!(scheduler.advance(ms(350)), vec![handle, handle, handle]);
        // Remaining phase carries over: next firing at 400ms.
        assert_eq!(scheduler.advance(ms(50)), vec![handle]);
    }

    #[test]
    fn firings_are_ordered_by_due_time() {
        let mut scheduler = ManualScheduler::new();
        let slow = scheduler.schedule(ms(300));
        let fast = scheduler.schedule(ms(200));
        assert_eq!(scheduler.advance(ms(600)), vec![fast, slow, fast, slow, fast]);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule(ms(10));
        scheduler.cancel(handle);
        assert!(!scheduler.is_active(handle));
        assert!(scheduler.advance(ms(1000)).is_empty());
        assert_eq!(scheduler.cancel_calls(), 1);
    }

    #[test]
    fn cancel_unknown_handle_is_noop() {
        let mut scheduler = ManualScheduler::new();
        let kept = scheduler.schedule(ms(10));
        scheduler.cancel(TimerHandle::from_raw(999));
        assert_eq!(scheduler.active_count(), 1);
        assert!(scheduler.is_active(kept));
    }

    #[test]
    fn handles_are_unique() {
        let mut scheduler = ManualScheduler::new();
        let a = scheduler.schedule(ms(10));
        scheduler.cancel(a);
        let b = scheduler.schedule(ms(10));
        assert_ne!(a, b);
        assert_eq!(scheduler.schedule_calls(), 2);
    }

    #[test]
    fn scheduling_mid_stream_starts_from_now() {
        let mut scheduler = ManualScheduler::new();
        let _ = scheduler.advance(ms(250));
        let handle = scheduler.schedule(ms(100));
        assert!(scheduler.advance(ms(99)).is_empty());
        assert_eq!(scheduler.advance(ms(1)), vec![handle]);
    }

    #[test]
    fn advance_to_end_of_time_is_capped() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule(ms(1100));
        let fired = scheduler.advance(Duration::MAX);
        assert_eq!(fired.len(), MAX_FIRINGS_PER_ADVANCE);
        assert!(fired.iter().all(|&h| h == handle));
        // Clock stops at the last reported firing.
        assert_eq!(scheduler.now(), ms(1100) * MAX_FIRINGS_PER_ADVANCE as u32);
        assert!(scheduler.is_active(handle));
    }

    #[test]
    fn saturating_timer_fires_once_then_expires() {
        let mut scheduler = ManualScheduler::new();
        let _ = scheduler.advance(ms(5));
        let handle = scheduler.schedule(Duration::MAX);
        assert_eq!(scheduler.advance(Duration::MAX), vec![handle]);
        assert!(!scheduler.is_active(handle));
        assert_eq!(scheduler.now(), Duration::MAX);
        assert!(scheduler.advance(Duration::MAX).is_empty());
    }

    #[test]
    fn fire_next_delivers_one_firing_at_a_time() {
        let mut scheduler = ManualScheduler::new();
        let slow = scheduler.schedule(ms(300));
        let fast = scheduler.schedule(ms(200));
        assert_eq!(scheduler.fire_next(ms(500)), Some(fast));
        assert_eq!(scheduler.now(), ms(200));
        assert_eq!(scheduler.fire_next(ms(500)), Some(slow));
        assert_eq!(scheduler.fire_next(ms(500)), Some(fast));
        assert_eq!(scheduler.fire_next(ms(500)), None);
        assert_eq!(scheduler.now(), ms(400));
    }

    #[test]
    fn skip_to_keeps_phase_without_reporting() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule(ms(100));
        scheduler.skip_to(ms(350));
        assert_eq!(scheduler.now(), ms(350));
        assert!(scheduler.advance(ms(49)).is_empty());
        assert_eq!(scheduler.advance(ms(1)), vec![handle]);
    }

    #[test]
    fn skip_to_end_of_time_terminates() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule(ms(1100));
        scheduler.skip_to(Duration::MAX);
        assert_eq!(scheduler.now(), Duration::MAX);
        assert!(!scheduler.is_active(handle));
    }

    #[test]
    fn boxed_scheduler_forwards() {
        let mut scheduler: Box<ManualScheduler> = Box::default();
        let handle = Scheduler::schedule(&mut scheduler, ms(5));
        assert!(scheduler.is_active(handle));
        Scheduler::cancel(&mut scheduler, handle);
        assert_eq!(scheduler.active_count(), 0);
    }
}
