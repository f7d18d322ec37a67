//! What the clock face shows on a given tick.
//!
//! Selection is a pure priority decision over the countdown phase, network state and
//! wall-clock state. Rendering turns the chosen content into a [`Frame`].

use crate::color::Rgb8;
use crate::countdown::{CountdownPhase, CountdownReading};
use crate::display::{DIGIT_UNITS, Frame};
use crate::toggle::Phase;

/// Wall-clock time of day as last reported by the time provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClock {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// False until the first successful time sync.
    pub known: bool,
}

impl WallClock {
    /// A synced time of day.
    pub const fn at(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
            known: true,
        }
    }

    /// No time sync yet.
    pub const fn unknown() -> Self {
        Self {
            hour: 0,
            minute: 0,
            second: 0,
            known: false,
        }
    }
}

/// Network state as last reported by the network provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetworkStatus<'a> {
    pub connected: bool,
    /// Device address, shown once by the boot sequence.
    pub address: &'a str,
}

impl<'a> NetworkStatus<'a> {
    pub const fn connected(address: &'a str) -> Self {
        Self {
            connected: true,
            address,
        }
    }

    pub const fn disconnected() -> Self {
        Self {
            connected: false,
            address: "",
        }
    }
}

/// Status codes shown on all four digits while the clock cannot show time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusCode {
    /// Network not connected.
    Connecting,
    /// Connected, waiting for the first time sync.
    AwaitingTime,
}

impl StatusCode {
    /// Glyph repeated across the digits.
    pub const fn symbol(self) -> char {
        match self {
            StatusCode::Connecting => '0',
            StatusCode::AwaitingTime => '2',
        }
    }
}

/// Content on the face for a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ContentKind {
    /// Boot-sequence scroll (chosen ahead of the priority rules).
    Boot,
    Countdown,
    Status(StatusCode),
    Clock,
}

/// Regular content chosen by [`select`] once no boot scroll is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Selection {
    Countdown,
    Status(StatusCode),
    Clock,
}

impl From<Selection> for ContentKind {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Countdown => ContentKind::Countdown,
            Selection::Status(code) => ContentKind::Status(code),
            Selection::Clock => ContentKind::Clock,
        }
    }
}

/// Chooses the regular (post-boot) content, highest priority first:
/// active countdown, not connected, awaiting time sync, clock.
pub fn select(
    countdown: CountdownPhase,
    wall: &WallClock,
    network: &NetworkStatus<'_>,
) -> Selection {
    if countdown != CountdownPhase::Idle {
        Selection::Countdown
    } else if !network.connected {
        Selection::Status(StatusCode::Connecting)
    } else if !wall.known {
        Selection::Status(StatusCode::AwaitingTime)
    } else {
        Selection::Clock
    }
}

/// `HH:MM` with the colon following the blink phase.
pub fn render_clock(frame: &mut Frame, wall: &WallClock, colon: Phase, color: Rgb8) {
    frame.clear();
    frame.set_pair(0, wall.hour, color);
    frame.set_pair(2, wall.minute, color);
    frame.set_colon(colon.is_on(), color);
}

/// `MM:SS` of the countdown.
///
/// While running the colon is solid. Once completed, `flash` gates the whole face:
/// `00:00` during the on phase, every unit dark during the off phase.
pub fn render_countdown(
    frame: &mut Frame,
    reading: &CountdownReading,
    flash: Phase,
    color: Rgb8,
) {
    frame.clear();

    if reading.phase == CountdownPhase::Completed && !flash.is_on() {
        return;
    }

    frame.set_pair(0, reading.minutes() as u8, color);
    frame.set_pair(2, reading.seconds() as u8, color);
    frame.set_colon(true, color);
}

/// The status glyph on all four digits, colon off.
pub fn render_status(frame: &mut Frame, code: StatusCode, color: Rgb8) {
    frame.clear();
    frame.set_text([code.symbol(); DIGIT_UNITS], color);
}

/// Four arbitrary characters, colon off.
pub fn render_text(frame: &mut Frame, text: [char; DIGIT_UNITS], color: Rgb8) {
    frame.clear();
    frame.set_text(text, color);
}
