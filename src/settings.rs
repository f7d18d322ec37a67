//! The settings snapshot shared between the engine and command handlers.
//!
//! Range checks happen when a value is constructed ([`Percent::new`],
//! [`RainbowSpeed::new`]), so a [`Settings`] value can never hold an out-of-range
//! field and readers never clamp.

use crate::color::Rgb8;
use core::cell::Cell;
use critical_section::Mutex;
use palette::Srgb;

/// A brightness percentage, clamped to `0..=100` on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Percent(u8);

impl Percent {
    /// 100 %.
    pub const FULL: Percent = Percent(100);

    /// Creates a percentage, clamping into `0..=100`.
    pub const fn new(value: i32) -> Self {
        let clamped = if value < 0 {
            0
        } else if value > 100 {
            100
        } else {
            value
        };
        Percent(clamped as u8)
    }

    /// The percentage value.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Scales `value` by this percentage, truncating.
    #[inline]
    pub const fn of(self, value: u8) -> u8 {
        (value as u16 * self.0 as u16 / 100) as u8
    }
}

/// Hue cursor increment per tick in rainbow mode, clamped to `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RainbowSpeed(u8);

impl RainbowSpeed {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Creates a speed, clamping into `1..=10`.
    pub const fn new(value: i32) -> Self {
        let clamped = if value < Self::MIN as i32 {
            Self::MIN
        } else if value > Self::MAX as i32 {
            Self::MAX
        } else {
            value as u8
        };
        RainbowSpeed(clamped)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// How the display color is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorMode {
    /// Rotating hue.
    Rainbow,
    /// Fixed [`Settings::static_color`].
    Static,
}

impl ColorMode {
    /// Decodes the numeric mode used by remote forms and storage.
    ///
    /// `0` is rainbow; every other value selects the static color.
    pub const fn from_index(index: u8) -> Self {
        match index {
            0 => ColorMode::Rainbow,
            _ => ColorMode::Static,
        }
    }

    /// Numeric form of the mode.
    pub const fn index(self) -> u8 {
        match self {
            ColorMode::Rainbow => 0,
            ColorMode::Static => 1,
        }
    }
}

/// Complete display configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Upper brightness bound, `0..=255`.
    pub max_brightness: u8,
    pub mode: ColorMode,
    pub static_color: Rgb8,
    pub rainbow_speed: RainbowSpeed,
    /// Scale brightness by time of day.
    pub auto_brightness: bool,
    /// 09:00-18:00.
    pub day_brightness: Percent,
    /// 22:00-06:00.
    pub night_brightness: Percent,
    /// 06:00-09:00 and 18:00-22:00.
    pub transition_brightness: Percent,
}

impl Settings {
    /// Factory configuration, used when nothing has been persisted.
    pub const DEFAULT: Settings = Settings {
        max_brightness: 25,
        mode: ColorMode::Rainbow,
        static_color: Srgb::new(255, 0, 0),
        rainbow_speed: RainbowSpeed::new(1),
        auto_brightness: true,
        day_brightness: Percent::new(100),
        night_brightness: Percent::new(10),
        transition_brightness: Percent::new(50),
    };
}

impl Default for Settings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A [`Settings`] cell that may be shared between the render loop and a command
/// handler running in another task or interrupt.
///
/// Every read returns a whole copy and every write replaces the whole snapshot
/// inside one critical section, so the three brightness percentages (or any other
/// group of fields) are always observed together.
pub struct SharedSettings {
    inner: Mutex<Cell<Settings>>,
}

impl SharedSettings {
    pub const fn new(settings: Settings) -> Self {
        Self {
            inner: Mutex::new(Cell::new(settings)),
        }
    }

    /// Copy of the current snapshot.
    pub fn snapshot(&self) -> Settings {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }

    /// Replaces the whole snapshot.
    pub fn replace(&self, settings: Settings) -> Settings {
        critical_section::with(|cs| self.inner.borrow(cs).replace(settings))
    }

    /// Applies `f` to a copy and stores the result, atomically.
    pub fn update<R>(&self, f: impl FnOnce(&mut Settings) -> R) -> R {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut settings = cell.get();
            let result = f(&mut settings);
            cell.set(settings);
            result
        })
    }
}

impl Default for SharedSettings {
    fn default() -> Self {
        Self::new(Settings::DEFAULT)
    }
}

/// Key names of the persisted snapshot.
pub mod keys {
    /// Namespace the keys live under.
    pub const NAMESPACE: &str = "clockSettings";

    pub const BRIGHTNESS: &str = "brightness";
    pub const MODE: &str = "mode";
    pub const RED: &str = "red";
    pub const GREEN: &str = "green";
    pub const BLUE: &str = "blue";
    pub const RAINBOW_SPEED: &str = "rainbowSpeed";
    pub const AUTO_BRIGHTNESS: &str = "autoBrightness";
    pub const DAY_BRIGHTNESS: &str = "dayBrightness";
    pub const NIGHT_BRIGHTNESS: &str = "nightBrightness";
    pub const TRANSITION_BRIGHTNESS: &str = "transitionBrightness";
}

/// Key/value persistence backend (flash preferences, EEPROM, a file, ...).
///
/// The encoding is entirely up to the implementation; the engine only moves whole
/// snapshots through [`load_settings`] and [`save_settings`].
pub trait SettingsStore {
    type Error;

    /// Reads a byte value, `None` if absent or unreadable.
    fn get_u8(&mut self, key: &str) -> Option<u8>;

    /// Reads a flag, `None` if absent or unreadable.
    fn get_bool(&mut self, key: &str) -> Option<bool>;

    fn put_u8(&mut self, key: &str, value: u8) -> Result<(), Self::Error>;

    fn put_bool(&mut self, key: &str, value: bool) -> Result<(), Self::Error>;
}

/// Loads a snapshot, falling back to [`Settings::DEFAULT`].
///
/// A store without the brightness key is treated as never written and yields the
/// defaults wholesale. Otherwise each missing key takes its default value, and every
/// stored value passes through the same range checks as a command would.
pub fn load_settings<S: SettingsStore>(store: &mut S) -> Settings {
    let defaults = Settings::DEFAULT;

    let Some(max_brightness) = store.get_u8(keys::BRIGHTNESS) else {
        #[cfg(feature = "defmt")]
        defmt::info!("no saved settings found, using defaults");
        return defaults;
    };

    fn byte<S: SettingsStore>(store: &mut S, key: &str, default: u8) -> u8 {
        store.get_u8(key).unwrap_or(default)
    }

    let settings = Settings {
        max_brightness,
        mode: ColorMode::from_index(byte(store, keys::MODE, defaults.mode.index())),
        static_color: Srgb::new(
            byte(store, keys::RED, defaults.static_color.red),
            byte(store, keys::GREEN, defaults.static_color.green),
            byte(store, keys::BLUE, defaults.static_color.blue),
        ),
        rainbow_speed: RainbowSpeed::new(
            byte(store, keys::RAINBOW_SPEED, defaults.rainbow_speed.get()).into(),
        ),
        auto_brightness: store
            .get_bool(keys::AUTO_BRIGHTNESS)
            .unwrap_or(defaults.auto_brightness),
        day_brightness: Percent::new(
            byte(store, keys::DAY_BRIGHTNESS, defaults.day_brightness.get()).into(),
        ),
        night_brightness: Percent::new(
            byte(store, keys::NIGHT_BRIGHTNESS, defaults.night_brightness.get()).into(),
        ),
        transition_brightness: Percent::new(
            byte(
                store,
                keys::TRANSITION_BRIGHTNESS,
                defaults.transition_brightness.get(),
            )
            .into(),
        ),
    };

    #[cfg(feature = "defmt")]
    defmt::info!("settings loaded from store");

    settings
}

/// Writes the full snapshot.
pub fn save_settings<S: SettingsStore>(store: &mut S, settings: &Settings) -> Result<(), S::Error> {
    store.put_u8(keys::BRIGHTNESS, settings.max_brightness)?;
    store.put_u8(keys::MODE, settings.mode.index())?;
    store.put_u8(keys::RED, settings.static_color.red)?;
    store.put_u8(keys::GREEN, settings.static_color.green)?;
    store.put_u8(keys::BLUE, settings.static_color.blue)?;
    store.put_u8(keys::RAINBOW_SPEED, settings.rainbow_speed.get())?;
    store.put_bool(keys::AUTO_BRIGHTNESS, settings.auto_brightness)?;
    store.put_u8(keys::DAY_BRIGHTNESS, settings.day_brightness.get())?;
    store.put_u8(keys::NIGHT_BRIGHTNESS, settings.night_brightness.get())?;
    store.put_u8(keys::TRANSITION_BRIGHTNESS, settings.transition_brightness.get())?;

    #[cfg(feature = "defmt")]
    defmt::info!("settings saved to store");

    Ok(())
}
