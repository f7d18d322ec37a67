//! Non-blocking periodic on/off scheduler.
//!
//! One [`Toggle`] drives each periodic effect (colon blink, completion flash). The
//! scheduler never sleeps: callers hand it the current instant every loop iteration
//! and it flips when a full interval has elapsed since the previous flip.

use crate::time::{TimeDuration, TimeInstant};

/// Visible phase of a periodic effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    On,
    Off,
}

impl Phase {
    /// The opposite phase.
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Phase::On => Phase::Off,
            Phase::Off => Phase::On,
        }
    }

    /// Returns true for [`Phase::On`].
    #[inline]
    pub fn is_on(self) -> bool {
        self == Phase::On
    }
}

/// Result of a single [`Toggle::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToggleTick {
    /// Phase after the tick.
    pub phase: Phase,
    /// True if this tick flipped the phase.
    pub flipped: bool,
}

/// Interval timer that flips between [`Phase::On`] and [`Phase::Off`].
///
/// The instant of each flip becomes the new anchor, so a late tick delays only that
/// flip; it never shortens or accumulates into the following intervals.
#[derive(Debug, Clone, Copy)]
pub struct Toggle<I: TimeInstant> {
    last_flip: I,
    phase: Phase,
    interval: I::Duration,
}

impl<I: TimeInstant> Toggle<I> {
    /// Creates a toggle anchored at `now`.
    pub fn new(interval: I::Duration, phase: Phase, now: I) -> Self {
        Self {
            last_flip: now,
            phase,
            interval,
        }
    }

    /// Advances the toggle to `now`, flipping at most once.
    pub fn tick(&mut self, now: I) -> ToggleTick {
        let elapsed = now.duration_since(self.last_flip);
        let flipped = elapsed.as_millis() >= self.interval.as_millis();

        if flipped {
            self.phase = self.phase.flipped();
            self.last_flip = now;
        }

        ToggleTick {
            phase: self.phase,
            flipped,
        }
    }

    /// Forces `phase` and re-anchors the interval at `now`.
    pub fn restart(&mut self, phase: Phase, now: I) {
        self.phase = phase;
        self.last_flip = now;
    }

    /// Current phase without advancing.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Configured flip interval.
    #[inline]
    pub fn interval(&self) -> I::Duration {
        self.interval
    }
}
