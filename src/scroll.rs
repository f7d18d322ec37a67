//! Time-boxed text scrolling for the boot sequence.
//!
//! A [`Scroller`] is a pure function of elapsed time: the control loop asks it which
//! four characters to show right now and never waits on it. [`BootSequence`] chains
//! the network-address scroll and an optional greeting.

use crate::display::DIGIT_UNITS;
use crate::time::{TimeDuration, TimeInstant};
use heapless::String;

/// Longest text a scroller holds, in bytes.
///
/// Fits the longest textual IPv6 address
/// (`ffff:ffff:ffff:ffff:ffff:ffff:255.255.255.255`, 45 bytes).
pub const SCROLL_CAPACITY: usize = 48;

/// Scroll cadence and time box, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollTiming {
    /// Time each window position is shown.
    pub step_ms: u64,
    /// Extra hold on the last window before the scroll repeats.
    pub end_pause_ms: u64,
    /// Total time the scroll is shown.
    pub total_ms: u64,
}

impl Default for ScrollTiming {
    fn default() -> Self {
        Self {
            step_ms: 500,
            end_pause_ms: 1_000,
            total_ms: 10_000,
        }
    }
}

/// Scrolls a text through the four-digit window until its time box runs out.
#[derive(Debug, Clone)]
pub struct Scroller<I: TimeInstant> {
    text: String<SCROLL_CAPACITY>,
    anchor: I,
    timing: ScrollTiming,
}

impl<I: TimeInstant> Scroller<I> {
    /// Starts scrolling `text` at `now`. Text beyond [`SCROLL_CAPACITY`] is dropped.
    pub fn new(text: &str, timing: ScrollTiming, now: I) -> Self {
        let mut buffer = String::new();
        for c in text.chars() {
            if buffer.push(c).is_err() {
                break;
            }
        }

        Self {
            text: buffer,
            anchor: now,
            timing,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of distinct window positions.
    fn positions(&self) -> u64 {
        let len = self.text.chars().count();
        (len.saturating_sub(DIGIT_UNITS) + 1) as u64
    }

    /// Four characters visible at `now`, or `None` once the time box has elapsed.
    pub fn window(&self, now: I) -> Option<[char; DIGIT_UNITS]> {
        let elapsed = now.duration_since(self.anchor).as_millis();
        if elapsed >= self.timing.total_ms {
            return None;
        }

        let step = self.timing.step_ms.max(1);
        let scroll_ms = self.positions() * step;
        let cycle_ms = scroll_ms + self.timing.end_pause_ms;
        let t = elapsed % cycle_ms;

        let position = if t < scroll_ms {
            t / step
        } else {
            self.positions() - 1
        };

        let mut window = [' '; DIGIT_UNITS];
        for (slot, c) in window
            .iter_mut()
            .zip(self.text.chars().skip(position as usize))
        {
            *slot = c;
        }
        Some(window)
    }

    /// Returns true once the time box has elapsed.
    pub fn is_finished(&self, now: I) -> bool {
        now.duration_since(self.anchor).as_millis() >= self.timing.total_ms
    }
}

/// Which part of the boot sequence is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootStage {
    /// Waiting for the network to come up.
    Pending,
    /// Scrolling the device network address.
    Address,
    /// Scrolling the greeting text.
    Greeting,
    /// Boot sequence over; regular content from here on.
    Done,
}

/// One-shot boot sequence: address scroll, then optional greeting scroll.
#[derive(Debug, Clone)]
pub struct BootSequence<I: TimeInstant> {
    stage: BootStage,
    greeting: Option<&'static str>,
    timing: ScrollTiming,
    scroller: Option<Scroller<I>>,
}

impl<I: TimeInstant> BootSequence<I> {
    /// A boot sequence waiting to be armed.
    pub fn new(greeting: Option<&'static str>, timing: ScrollTiming) -> Self {
        Self {
            stage: BootStage::Pending,
            greeting,
            timing,
            scroller: None,
        }
    }

    /// A boot sequence that has already finished.
    pub fn skipped() -> Self {
        Self {
            stage: BootStage::Done,
            greeting: None,
            timing: ScrollTiming::default(),
            scroller: None,
        }
    }

    /// Starts the sequence with `address`. Does nothing unless still pending.
    ///
    /// An empty address skips straight to the greeting.
    pub fn arm(&mut self, address: &str, now: I) {
        if self.stage != BootStage::Pending {
            return;
        }

        if address.is_empty() {
            self.start_greeting(now);
        } else {
            self.enter(BootStage::Address, Some(Scroller::new(address, self.timing, now)));
        }
    }

    /// Characters to show at `now`, or `None` when the boot sequence is not on screen.
    pub fn poll(&mut self, now: I) -> Option<[char; DIGIT_UNITS]> {
        loop {
            let scroller = self.scroller.as_ref()?;
            if let Some(window) = scroller.window(now) {
                return Some(window);
            }

            match self.stage {
                BootStage::Address => self.start_greeting(now),
                _ => self.enter(BootStage::Done, None),
            }
        }
    }

    pub fn stage(&self) -> BootStage {
        self.stage
    }

    /// Returns true while boot content owns the display.
    pub fn is_running(&self) -> bool {
        matches!(self.stage, BootStage::Address | BootStage::Greeting)
    }

    fn start_greeting(&mut self, now: I) {
        match self.greeting {
            Some(text) if !text.is_empty() => {
                self.enter(BootStage::Greeting, Some(Scroller::new(text, self.timing, now)))
            }
            _ => self.enter(BootStage::Done, None),
        }
    }

    fn enter(&mut self, stage: BootStage, scroller: Option<Scroller<I>>) {
        #[cfg(feature = "defmt")]
        defmt::info!("boot stage: {} -> {}", self.stage, stage);

        self.stage = stage;
        self.scroller = scroller;
    }
}
