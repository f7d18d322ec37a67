//! Per-LED frame buffers and the hardware push trait.

use crate::color::{OFF, Rgb8};
use crate::segment::{self, SEGMENT_COUNT, SegmentMask};

/// Number of digit units on the clock face.
pub const DIGIT_UNITS: usize = 4;

/// Number of LEDs in the colon unit.
pub const COLON_LEDS: usize = 2;

/// LED colors of one digit, in chain order.
pub type DigitUnit = [Rgb8; SEGMENT_COUNT];

/// LED colors of the colon.
pub type ColonUnit = [Rgb8; COLON_LEDS];

/// Trait for abstracting the LED hardware.
///
/// Implement this for your LED driver (WS2812 over RMT/PIO/SPI, a simulator window,
/// ...). The engine calls [`show`](Self::show) exactly once per tick. Handle transport
/// errors internally - this method cannot fail.
pub trait DisplayDriver {
    /// Transmits a full frame and applies the global brightness scalar (0-255).
    fn show(&mut self, frame: &Frame, brightness: u8);
}

/// Colors of all five display units: four digits (left to right) and the colon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    digits: [DigitUnit; DIGIT_UNITS],
    colon: ColonUnit,
}

impl Frame {
    /// Every LED off.
    pub const BLANK: Frame = Frame {
        digits: [[OFF; SEGMENT_COUNT]; DIGIT_UNITS],
        colon: [OFF; COLON_LEDS],
    };

    /// Turns every LED off.
    pub fn clear(&mut self) {
        *self = Self::BLANK;
    }

    /// Paints digit unit `unit` with `mask` lit in `color`. Out-of-range units are ignored.
    pub fn set_mask(&mut self, unit: usize, mask: SegmentMask, color: Rgb8) {
        if let Some(leds) = self.digits.get_mut(unit) {
            for (index, led) in leds.iter_mut().enumerate() {
                *led = if mask.is_lit_at(index) { color } else { OFF };
            }
        }
    }

    /// Paints the glyph for `symbol` on digit unit `unit`.
    #[inline]
    pub fn set_char(&mut self, unit: usize, symbol: char, color: Rgb8) {
        self.set_mask(unit, segment::encode(symbol), color);
    }

    /// Paints decimal `digit` on digit unit `unit`.
    #[inline]
    pub fn set_digit(&mut self, unit: usize, digit: u8, color: Rgb8) {
        self.set_mask(unit, segment::encode_digit(digit), color);
    }

    /// Paints one character per digit unit.
    pub fn set_text(&mut self, text: [char; DIGIT_UNITS], color: Rgb8) {
        for (unit, symbol) in text.into_iter().enumerate() {
            self.set_char(unit, symbol, color);
        }
    }

    /// Paints a two-digit number on units `first` and `first + 1`, zero padded.
    pub fn set_pair(&mut self, first: usize, value: u8, color: Rgb8) {
        self.set_digit(first, (value / 10) % 10, color);
        self.set_digit(first + 1, value % 10, color);
    }

    /// Lights both colon LEDs in `color`, or turns them off.
    pub fn set_colon(&mut self, on: bool, color: Rgb8) {
        self.colon = if on { [color; COLON_LEDS] } else { [OFF; COLON_LEDS] };
    }

    /// LED colors of digit unit `unit`.
    pub fn digit(&self, unit: usize) -> Option<&DigitUnit> {
        self.digits.get(unit)
    }

    pub fn digits(&self) -> &[DigitUnit; DIGIT_UNITS] {
        &self.digits
    }

    pub fn colon(&self) -> &ColonUnit {
        &self.colon
    }

    /// Reconstructs which segments of `unit` are lit (any LED not [`OFF`]).
    pub fn mask(&self, unit: usize) -> SegmentMask {
        let mut bits = 0u8;
        if let Some(leds) = self.digits.get(unit) {
            for (index, led) in leds.iter().enumerate() {
                if *led != OFF {
                    bits |= 1 << index;
                }
            }
        }
        SegmentMask::from_bits(bits)
    }

    /// Returns true if the colon is lit.
    pub fn colon_on(&self) -> bool {
        self.colon.iter().any(|led| *led != OFF)
    }

    /// Returns true if no LED is lit.
    pub fn is_blank(&self) -> bool {
        *self == Self::BLANK
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::BLANK
    }
}
