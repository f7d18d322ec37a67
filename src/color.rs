//! Display color and brightness resolution.
//!
//! Color comes either from the configured static color or from a rotating position on
//! the hue wheel. Brightness is the configured maximum, optionally scaled by a
//! percentage chosen by the hour of day.

use crate::settings::{ColorMode, Percent, Settings};
use palette::{FromColor, Hsv, Srgb};

/// 8-bit sRGB pixel value, as sent to the LEDs.
pub type Rgb8 = Srgb<u8>;

/// Unlit pixel.
pub const OFF: Rgb8 = Srgb::new(0, 0, 0);

/// Creates a pixel color from HSV components (hue in degrees, others 0.0-1.0).
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Rgb8 {
    let rgb: Srgb = Srgb::from_color(Hsv::new(hue, saturation, value));
    rgb.into_format()
}

/// Fully saturated color at byte position `position` of the hue wheel.
///
/// The 256 positions divide the 360 degrees evenly; 0 is red, 128 is cyan.
#[inline]
pub fn wheel(position: u8) -> Rgb8 {
    hsv(position as f32 * (360.0 / 256.0), 1.0, 1.0)
}

/// Rotating position on the hue wheel.
///
/// Wraps modulo 256 when advanced past the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HueCursor(u8);

impl HueCursor {
    pub const fn new(position: u8) -> Self {
        HueCursor(position)
    }

    #[inline]
    pub const fn position(self) -> u8 {
        self.0
    }

    /// Moves the cursor forward by `step` positions.
    #[inline]
    pub fn advance(&mut self, step: u8) {
        self.0 = self.0.wrapping_add(step);
    }

    /// Color at the current position.
    #[inline]
    pub fn color(self) -> Rgb8 {
        wheel(self.0)
    }
}

/// Time-of-day brightness band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BrightnessBand {
    /// `[22, 24)` and `[0, 6)`.
    Night,
    /// `[9, 18)`.
    Day,
    /// `[6, 9)` and `[18, 22)`.
    Transition,
}

impl BrightnessBand {
    /// Band containing `hour`. Hours past 23 wrap.
    pub const fn for_hour(hour: u8) -> Self {
        match hour % 24 {
            0..6 | 22..24 => BrightnessBand::Night,
            9..18 => BrightnessBand::Day,
            _ => BrightnessBand::Transition,
        }
    }

    /// Configured percentage for this band.
    pub const fn percent(self, settings: &Settings) -> Percent {
        match self {
            BrightnessBand::Night => settings.night_brightness,
            BrightnessBand::Day => settings.day_brightness,
            BrightnessBand::Transition => settings.transition_brightness,
        }
    }
}

/// Current display color: the static color, or the hue wheel at `hue`.
pub fn resolve_color(settings: &Settings, hue: HueCursor) -> Rgb8 {
    match settings.mode {
        ColorMode::Static => settings.static_color,
        ColorMode::Rainbow => hue.color(),
    }
}

/// Current brightness scalar for the hardware push.
///
/// Without auto-brightness this is `max_brightness` verbatim; with it, the band
/// percentage of `max_brightness`, truncated.
pub fn resolve_brightness(settings: &Settings, hour: u8) -> u8 {
    if !settings.auto_brightness {
        return settings.max_brightness;
    }

    BrightnessBand::for_hour(hour)
        .percent(settings)
        .of(settings.max_brightness)
}
