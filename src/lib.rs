#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ClockEngine`**: Runs one non-blocking control-loop iteration per `tick` and pushes exactly one frame
//! - **`DisplayDriver`**: Trait to implement for your LED hardware
//! - **`TimeSource`**: Trait to implement for your monotonic timing system
//! - **`Frame`**: Per-LED colors of the four digit units and the colon
//! - **`SharedSettings`**: The settings snapshot, read whole by the engine and replaced whole by command handlers
//! - **`Countdown`**: Anchored countdown timer (`Idle` / `Running` / `Completed`)
//! - **`Toggle`**: Periodic on/off scheduler behind the colon blink and completion flash
//! - **`BootSequence`**: Time-boxed scroll of the network address and greeting
//! - **`ClockAction`**: Commands a remote channel can send to the engine
//!
//! Pixels are `Srgb<u8>` ([`Rgb8`]); rainbow hues are computed through `palette`'s HSV
//! conversion. The brightness scalar is passed to the driver separately from the frame.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod time;
pub mod segment;
pub mod toggle;
pub mod color;
pub mod countdown;
pub mod display;
pub mod scroll;
pub mod content;
pub mod settings;
pub mod command;
pub mod engine;

#[cfg(test)]
mod test_support;

pub use time::{TimeDuration, TimeInstant, TimeSource};
#[cfg(feature = "std")]
pub use time::StdTimeSource;
pub use segment::{Segment, SegmentMask, encode, encode_digit};
pub use toggle::{Phase, Toggle, ToggleTick};
pub use color::{BrightnessBand, HueCursor, OFF, Rgb8, resolve_brightness, resolve_color};
pub use countdown::{Countdown, CountdownPhase, CountdownReading};
pub use display::{DIGIT_UNITS, DisplayDriver, Frame};
pub use scroll::{BootSequence, BootStage, ScrollTiming, Scroller};
pub use content::{ContentKind, NetworkStatus, Selection, StatusCode, WallClock};
pub use settings::{
    ColorMode, Percent, RainbowSpeed, Settings, SettingsStore, SharedSettings, load_settings,
    save_settings,
};
pub use command::{
    ClockAction, CommandError, SettingsCommand, SettingsUpdate, TimerAction, parse_hex_color,
};
pub use engine::{ClockEngine, ClockInputs, ClockStatus, EngineConfig, TickReport};

pub const RED: Rgb8 = Srgb::new(255, 0, 0);
pub const GREEN: Rgb8 = Srgb::new(0, 255, 0);
pub const BLUE: Rgb8 = Srgb::new(0, 0, 255);
pub const WHITE: Rgb8 = Srgb::new(255, 255, 255);
