//! Drift-free countdown timer.
//!
//! The timer stores only the instant it was started and the requested duration.
//! Remaining time is recomputed from the monotonic clock on every query, so a stalled
//! or slow control loop shows a coarser countdown but never a wrong one.

use crate::time::{TimeDuration, TimeInstant};

/// Largest accepted minutes value.
pub const MAX_MINUTES: u32 = 99;

/// Largest accepted seconds value.
pub const MAX_SECONDS: u32 = 59;

/// Externally visible phase of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownPhase {
    /// Not counting. Remaining time reads as zero.
    Idle,
    /// Counting down from the anchor.
    Running,
    /// Reached zero; stays here until stopped or reset.
    Completed,
}

/// Snapshot returned by [`Countdown::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CountdownReading {
    pub phase: CountdownPhase,
    /// Whole seconds left, zero unless running.
    pub remaining_secs: u32,
    /// True only on the poll that moved the timer into `Completed`.
    pub completed_now: bool,
}

impl CountdownReading {
    /// Minutes part of the remaining time.
    #[inline]
    pub fn minutes(&self) -> u32 {
        self.remaining_secs / 60
    }

    /// Seconds part of the remaining time.
    #[inline]
    pub fn seconds(&self) -> u32 {
        self.remaining_secs % 60
    }
}

#[derive(Debug, Clone, Copy)]
enum State<I> {
    Idle,
    Running { anchor: I, duration_secs: u32 },
    Completed { duration_secs: u32 },
}

/// Countdown timer state machine.
///
/// `Idle -> Running -> Completed`, with `stop`/`reset` returning to `Idle` from any
/// state. The transition into `Completed` happens inside [`poll`](Self::poll), so the
/// owner must poll at least once per loop iteration while the timer may be running.
#[derive(Debug, Clone, Copy)]
pub struct Countdown<I: TimeInstant> {
    state: State<I>,
}

impl<I: TimeInstant> Countdown<I> {
    /// Creates an idle countdown.
    pub const fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Starts (or restarts) counting down from `minutes:seconds`.
    ///
    /// Minutes are clamped to 0-99 and seconds to 0-59. Returns the effective
    /// duration in seconds.
    pub fn start(&mut self, minutes: u32, seconds: u32, now: I) -> u32 {
        let duration_secs = minutes.min(MAX_MINUTES) * 60 + seconds.min(MAX_SECONDS);

        self.state = State::Running {
            anchor: now,
            duration_secs,
        };

        #[cfg(feature = "defmt")]
        defmt::info!("countdown started: {=u32}s", duration_secs);

        duration_secs
    }

    /// Returns to `Idle` from any state.
    pub fn stop(&mut self) {
        if self.is_active() {
            #[cfg(feature = "defmt")]
            defmt::info!("countdown stopped");
        }

        self.state = State::Idle;
    }

    /// Same as [`stop`](Self::stop).
    pub fn reset(&mut self) {
        self.stop();
    }

    /// Whole seconds left at `now`. May complete the countdown as a side effect.
    pub fn remaining(&mut self, now: I) -> u32 {
        self.poll(now).remaining_secs
    }

    /// Evaluates the countdown at `now`, moving to `Completed` on the first poll at or
    /// past the deadline.
    pub fn poll(&mut self, now: I) -> CountdownReading {
        match self.state {
            State::Idle => CountdownReading {
                phase: CountdownPhase::Idle,
                remaining_secs: 0,
                completed_now: false,
            },
            State::Completed { .. } => CountdownReading {
                phase: CountdownPhase::Completed,
                remaining_secs: 0,
                completed_now: false,
            },
            State::Running {
                anchor,
                duration_secs,
            } => {
                let elapsed_secs = now.duration_since(anchor).as_secs();

                if elapsed_secs >= u64::from(duration_secs) {
                    self.state = State::Completed { duration_secs };

                    #[cfg(feature = "defmt")]
                    defmt::info!("countdown completed");

                    return CountdownReading {
                        phase: CountdownPhase::Completed,
                        remaining_secs: 0,
                        completed_now: true,
                    };
                }

                CountdownReading {
                    phase: CountdownPhase::Running,
                    remaining_secs: duration_secs - elapsed_secs as u32,
                    completed_now: false,
                }
            }
        }
    }

    /// Current phase, as of the last poll.
    pub fn phase(&self) -> CountdownPhase {
        match self.state {
            State::Idle => CountdownPhase::Idle,
            State::Running { .. } => CountdownPhase::Running,
            State::Completed { .. } => CountdownPhase::Completed,
        }
    }

    /// Duration of the current or last finished run; zero when idle.
    pub fn duration_secs(&self) -> u32 {
        match self.state {
            State::Idle => 0,
            State::Running { duration_secs, .. } | State::Completed { duration_secs } => {
                duration_secs
            }
        }
    }

    /// True unless idle.
    #[inline]
    pub fn is_active(&self) -> bool {
        !matches!(self.state, State::Idle)
    }
}

impl<I: TimeInstant> Default for Countdown<I> {
    fn default() -> Self {
        Self::new()
    }
}
