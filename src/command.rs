//! Validated mutations produced by remote command channels.
//!
//! Numeric inputs arrive as the raw integers a form field or message payload carries
//! and are clamped into range when applied. The only rejection is at the parse
//! boundary ([`parse_hex_color`]) or for a capability the engine was built without.

use crate::color::Rgb8;
use crate::settings::{ColorMode, Percent, RainbowSpeed, Settings};
use palette::Srgb;

/// Errors returned to a command channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Color text is not `#RRGGBB` / `RRGGBB`.
    InvalidColor,
    /// Countdown commands sent to an engine built without the countdown.
    TimerDisabled,
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CommandError::InvalidColor => {
                write!(f, "color must be six hex digits, optionally prefixed with '#'")
            }
            CommandError::TimerDisabled => {
                write!(f, "countdown timer is not enabled on this clock")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}

/// A single settings mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingsCommand {
    /// Raw maximum brightness, 0-255.
    SetMaxBrightness(u8),
    /// Maximum brightness as a percentage of 255, clamped to 0-100.
    SetMaxBrightnessPercent(i32),
    SetMode(ColorMode),
    SetStaticColor(Rgb8),
    /// Clamped to 1-10.
    SetRainbowSpeed(i32),
    SetAutoBrightness(bool),
    /// Clamped to 0-100.
    SetDayBrightness(i32),
    /// Clamped to 0-100.
    SetNightBrightness(i32),
    /// Clamped to 0-100.
    SetTransitionBrightness(i32),
}

impl Settings {
    /// Applies one mutation, clamping as needed.
    pub fn apply(&mut self, command: SettingsCommand) {
        match command {
            SettingsCommand::SetMaxBrightness(value) => self.max_brightness = value,
            SettingsCommand::SetMaxBrightnessPercent(pct) => {
                self.max_brightness = Percent::new(pct).of(u8::MAX)
            }
            SettingsCommand::SetMode(mode) => self.mode = mode,
            SettingsCommand::SetStaticColor(color) => self.static_color = color,
            SettingsCommand::SetRainbowSpeed(speed) => {
                self.rainbow_speed = RainbowSpeed::new(speed)
            }
            SettingsCommand::SetAutoBrightness(on) => self.auto_brightness = on,
            SettingsCommand::SetDayBrightness(pct) => self.day_brightness = Percent::new(pct),
            SettingsCommand::SetNightBrightness(pct) => self.night_brightness = Percent::new(pct),
            SettingsCommand::SetTransitionBrightness(pct) => {
                self.transition_brightness = Percent::new(pct)
            }
        }
    }
}

/// A batch of optional field changes applied as one mutation (a form submit).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SettingsUpdate {
    pub max_brightness_percent: Option<i32>,
    pub mode: Option<ColorMode>,
    pub static_color: Option<Rgb8>,
    pub rainbow_speed: Option<i32>,
    pub auto_brightness: Option<bool>,
    pub day_brightness: Option<i32>,
    pub night_brightness: Option<i32>,
    pub transition_brightness: Option<i32>,
}

impl SettingsUpdate {
    /// Applies every present field to `settings`.
    pub fn apply_to(&self, settings: &mut Settings) {
        let commands = [
            self.max_brightness_percent
                .map(SettingsCommand::SetMaxBrightnessPercent),
            self.mode.map(SettingsCommand::SetMode),
            self.static_color.map(SettingsCommand::SetStaticColor),
            self.rainbow_speed.map(SettingsCommand::SetRainbowSpeed),
            self.auto_brightness.map(SettingsCommand::SetAutoBrightness),
            self.day_brightness.map(SettingsCommand::SetDayBrightness),
            self.night_brightness.map(SettingsCommand::SetNightBrightness),
            self.transition_brightness
                .map(SettingsCommand::SetTransitionBrightness),
        ];

        for command in commands.into_iter().flatten() {
            settings.apply(command);
        }
    }
}

/// Countdown control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerAction {
    /// Start from `minutes:seconds` (clamped to 99:59).
    Start { minutes: u32, seconds: u32 },
    Stop,
    Reset,
}

/// Anything a command channel can ask of the clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockAction {
    Settings(SettingsCommand),
    Update(SettingsUpdate),
    Timer(TimerAction),
}

impl From<SettingsCommand> for ClockAction {
    fn from(command: SettingsCommand) -> Self {
        ClockAction::Settings(command)
    }
}

impl From<SettingsUpdate> for ClockAction {
    fn from(update: SettingsUpdate) -> Self {
        ClockAction::Update(update)
    }
}

impl From<TimerAction> for ClockAction {
    fn from(action: TimerAction) -> Self {
        ClockAction::Timer(action)
    }
}

/// Parses `#RRGGBB` or `RRGGBB`.
pub fn parse_hex_color(text: &str) -> Result<Rgb8, CommandError> {
    let hex = text.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CommandError::InvalidColor);
    }

    let value = u32::from_str_radix(hex, 16).map_err(|_| CommandError::InvalidColor)?;

    Ok(Srgb::new(
        (value >> 16) as u8,
        (value >> 8) as u8,
        value as u8,
    ))
}
