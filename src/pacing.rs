//! Shared cadence and reset discipline for every effect.
//!
//! Each effect remembers the instant of its next scheduled update in a [`Pace`]. On
//! every tick the effect asks whether it is due:
//!
//! - not yet due: return without touching the frame;
//! - due, but the effect has not run for a while (or ever): restart from a clean state;
//! - due: advance one step.
//!
//! An effect that is not called simply ages, so switching away and back is seamless
//! when quick and a clean restart otherwise.

use core::cmp::max;

use embassy_time::{Duration, Instant};

/// Audio sampling period. No effect is considered stale before this much time passes.
pub const AUDIO_SAMPLE_PERIOD: Duration = Duration::from_millis(40);

/// The never-initialized mark.
pub const NEVER: Instant = Instant::from_ticks(0);

/// Outcome of a due check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pacing {
    /// The mark is still in the future.
    NotDue,
    /// Due, and the effect should restart from its initial state.
    Reset,
    /// Due; take one step.
    Advance,
}

impl Pacing {
    #[must_use]
    pub const fn is_due(self) -> bool {
        !matches!(self, Self::NotDue)
    }
}

// Missed steps tolerated before an effect restarts.
const STALE_STEPS: u32 = 3;

/// The instant `delay` after `now`, pinned to the end of time instead of overflowing.
#[must_use]
pub fn later(now: Instant, delay: Duration) -> Instant {
    now.checked_add(delay).unwrap_or(Instant::MAX)
}

/// One of `parts` equal slices of `period`. Zero parts leaves the period whole.
#[must_use]
pub fn split_period(period: Duration, parts: u32) -> Duration {
    period.checked_div(parts).unwrap_or(period)
}

/// How long an effect may go unserviced before it resets.
#[must_use]
pub fn stale_after(step: Duration) -> Duration {
    max(step.checked_mul(STALE_STEPS).unwrap_or(Duration::MAX), AUDIO_SAMPLE_PERIOD)
}

/// Decide whether an effect scheduled for `mark` should run at `now`.
#[must_use]
pub fn is_due(mark: Instant, step: Duration, now: Instant) -> Pacing {
    let Some(overdue) = now.checked_duration_since(mark) else {
        return Pacing::NotDue;
    };
    if mark == NEVER || overdue > stale_after(step) {
        Pacing::Reset
    } else {
        Pacing::Advance
    }
}

/// The next scheduled update of one effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pace {
    mark: Instant,
}

impl Default for Pace {
    fn default() -> Self {
        Self { mark: NEVER }
    }
}

impl Pace {
    /// Check the mark; when due, reschedule to `now + step` before returning.
    pub fn check(&mut self, step: Duration, now: Instant) -> Pacing {
        let pacing = is_due(self.mark, step, now);
        if pacing.is_due() {
            self.mark = later(now, step);
        }
        pacing
    }

    /// Cadence gate for effects without a reset state.
    pub fn tick(&mut self, step: Duration, now: Instant) -> bool {
        if self.mark > now {
            return false;
        }
        self.mark = later(now, step);
        true
    }

    #[must_use]
    pub const fn mark(&self) -> Instant {
        self.mark
    }
}
