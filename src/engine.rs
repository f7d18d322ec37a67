//! The clock control loop.
//!
//! Provides [`ClockEngine`], which owns the display driver and all time-derived
//! state, and turns one call to [`ClockEngine::tick`] into exactly one frame push.
//! Nothing in a tick blocks; every effect is anchored on the shared monotonic
//! [`TimeSource`], so arbitrary gaps between ticks never cause drift.

use crate::color::{self, HueCursor, Rgb8};
use crate::command::{ClockAction, CommandError, TimerAction};
use crate::content::{self, ContentKind, NetworkStatus, Selection, StatusCode, WallClock};
use crate::countdown::{Countdown, CountdownPhase, CountdownReading};
use crate::display::{DisplayDriver, Frame};
use crate::scroll::{BootSequence, BootStage, ScrollTiming};
use crate::settings::{ColorMode, Settings, SharedSettings};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::toggle::{Phase, Toggle};

/// Build-time choices for one clock.
///
/// Optional features are capability flags rather than separate firmware variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Accept countdown commands.
    pub timer_enabled: bool,
    /// Scroll the network address (and greeting) once the network comes up.
    pub boot_enabled: bool,
    /// Text scrolled after the address.
    pub greeting: Option<&'static str>,
    /// Colon blink half-period.
    pub colon_blink_ms: u64,
    /// Completion flash half-period.
    pub flash_ms: u64,
    pub scroll: ScrollTiming,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timer_enabled: true,
            boot_enabled: true,
            greeting: None,
            colon_blink_ms: 500,
            flash_ms: 500,
            scroll: ScrollTiming::default(),
        }
    }
}

/// Collaborator state sampled for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockInputs<'a> {
    pub wall: WallClock,
    pub network: NetworkStatus<'a>,
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub content: ContentKind,
    /// Brightness scalar handed to the driver.
    pub brightness: u8,
    /// Resolved display color (before content-specific overrides).
    pub color: Rgb8,
    /// True if the pushed frame differs from the previous one.
    pub changed: bool,
}

/// Current state, for status reporting over a command channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockStatus {
    pub settings: Settings,
    pub countdown: CountdownReading,
    pub content: Option<ContentKind>,
    pub boot: BootStage,
}

/// Brightness for the hardware push.
///
/// Until the first time sync the hour is a placeholder, so the time-of-day bands are
/// skipped and the configured maximum is used as is.
fn brightness_for(settings: &Settings, wall: &WallClock) -> u8 {
    if wall.known {
        color::resolve_brightness(settings, wall.hour)
    } else {
        settings.max_brightness
    }
}

/// Drives a four-digit seven-segment clock face.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source and settings references
/// * `I` - Time instant type
/// * `D` - Display driver type
/// * `T` - Time source implementation type
pub struct ClockEngine<'t, I: TimeInstant, D: DisplayDriver, T: TimeSource<I>> {
    display: D,
    time_source: &'t T,
    settings: &'t SharedSettings,
    config: EngineConfig,
    hue: HueCursor,
    status_hue: HueCursor,
    colon: Toggle<I>,
    flash: Toggle<I>,
    countdown: Countdown<I>,
    boot: BootSequence<I>,
    frame: Frame,
    last_content: Option<ContentKind>,
    ticks: u32,
}

impl<'t, I: TimeInstant, D: DisplayDriver, T: TimeSource<I>> ClockEngine<'t, I, D, T> {
    /// Creates an engine and blanks the display.
    pub fn new(
        mut display: D,
        time_source: &'t T,
        settings: &'t SharedSettings,
        config: EngineConfig,
    ) -> Self {
        let now = time_source.now();
        let snapshot = settings.snapshot();

        display.show(&Frame::BLANK, brightness_for(&snapshot, &WallClock::unknown()));

        let boot = if config.boot_enabled {
            BootSequence::new(config.greeting, config.scroll)
        } else {
            BootSequence::skipped()
        };

        Self {
            display,
            time_source,
            settings,
            config,
            hue: HueCursor::default(),
            status_hue: HueCursor::default(),
            colon: Toggle::new(I::Duration::from_millis(config.colon_blink_ms), Phase::Off, now),
            flash: Toggle::new(I::Duration::from_millis(config.flash_ms), Phase::On, now),
            countdown: Countdown::new(),
            boot,
            frame: Frame::BLANK,
            last_content: None,
            ticks: 0,
        }
    }

    /// Runs one control-loop iteration and pushes one frame.
    pub fn tick(&mut self, inputs: &ClockInputs<'_>) -> TickReport {
        let now = self.time_source.now();
        let settings = self.settings.snapshot();

        let brightness = brightness_for(&settings, &inputs.wall);
        let color = color::resolve_color(&settings, self.hue);

        // Both effects advance every tick whatever is on screen.
        let colon = self.colon.tick(now).phase;
        self.flash.tick(now);

        let reading = self.countdown.poll(now);
        if reading.completed_now {
            self.flash.restart(Phase::On, now);
        }

        if inputs.network.connected {
            self.boot.arm(inputs.network.address, now);
        }

        let previous = self.frame;

        let shown = if let Some(window) = self.boot.poll(now) {
            content::render_text(&mut self.frame, window, color);
            ContentKind::Boot
        } else {
            let selection = content::select(reading.phase, &inputs.wall, &inputs.network);
            match selection {
                Selection::Countdown => {
                    content::render_countdown(&mut self.frame, &reading, self.flash.phase(), color)
                }
                Selection::Status(StatusCode::Connecting) => content::render_status(
                    &mut self.frame,
                    StatusCode::Connecting,
                    self.status_hue.color(),
                ),
                Selection::Status(code) => content::render_status(&mut self.frame, code, color),
                Selection::Clock => {
                    content::render_clock(&mut self.frame, &inputs.wall, colon, color)
                }
            }
            ContentKind::from(selection)
        };

        self.display.show(&self.frame, brightness);

        if self.last_content != Some(shown) {
            #[cfg(feature = "defmt")]
            defmt::info!("display content: {}", shown);
            self.last_content = Some(shown);
        }

        if settings.mode == ColorMode::Rainbow {
            self.hue.advance(settings.rainbow_speed.get());
        }
        self.status_hue.advance(1);
        self.ticks = self.ticks.wrapping_add(1);

        TickReport {
            content: shown,
            brightness,
            color,
            changed: previous != self.frame,
        }
    }

    /// Applies a command from a remote channel.
    ///
    /// Settings changes go to the shared snapshot and are visible from the next tick;
    /// countdown commands take effect on the next poll.
    pub fn handle_action(&mut self, action: ClockAction) -> Result<(), CommandError> {
        match action {
            ClockAction::Settings(command) => {
                self.settings.update(|s| s.apply(command));

                #[cfg(feature = "defmt")]
                defmt::debug!("settings command applied");

                Ok(())
            }
            ClockAction::Update(update) => {
                self.settings.update(|s| update.apply_to(s));

                #[cfg(feature = "defmt")]
                defmt::debug!("settings update applied");

                Ok(())
            }
            ClockAction::Timer(action) => {
                if !self.config.timer_enabled {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("countdown command rejected: {}", action);
                    return Err(CommandError::TimerDisabled);
                }

                let now = self.time_source.now();
                match action {
                    TimerAction::Start { minutes, seconds } => {
                        self.countdown.start(minutes, seconds, now);
                    }
                    TimerAction::Stop => self.countdown.stop(),
                    TimerAction::Reset => self.countdown.reset(),
                }
                Ok(())
            }
        }
    }

    /// Current settings, countdown and content, for status reports.
    ///
    /// Reads the countdown without advancing it, so completion is still reported to
    /// the next tick.
    pub fn status(&self) -> ClockStatus {
        let now = self.time_source.now();
        let mut countdown = self.countdown;
        ClockStatus {
            settings: self.settings.snapshot(),
            countdown: countdown.poll(now),
            content: self.last_content,
            boot: self.boot.stage(),
        }
    }

    /// Phase of the countdown as of the last poll.
    pub fn countdown_phase(&self) -> CountdownPhase {
        self.countdown.phase()
    }

    /// Last rendered frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn hue(&self) -> HueCursor {
        self.hue
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn boot_stage(&self) -> BootStage {
        self.boot.stage()
    }

    /// Number of ticks run so far (wrapping).
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }
}
