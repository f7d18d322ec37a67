//! Shared test infrastructure for segment-clock integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use segment_clock::{
    DisplayDriver, Frame, Rgb8, SettingsStore, TimeDuration, TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Display
// ============================================================================

/// Mock display that records every pushed frame
pub struct MockDisplay {
    last_frame: Frame,
    last_brightness: u8,
    pushes: usize,
    history: heapless::Vec<Frame, 64>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            last_frame: Frame::BLANK,
            last_brightness: 0,
            pushes: 0,
            history: heapless::Vec::new(),
        }
    }

    pub fn last_frame(&self) -> &Frame {
        &self.last_frame
    }

    pub fn last_brightness(&self) -> u8 {
        self.last_brightness
    }

    /// Total number of `show` calls, including those past the history capacity
    pub fn pushes(&self) -> usize {
        self.pushes
    }

    /// First 64 frames pushed
    pub fn history(&self) -> &[Frame] {
        &self.history
    }
}

impl DisplayDriver for MockDisplay {
    fn show(&mut self, frame: &Frame, brightness: u8) {
        self.last_frame = *frame;
        self.last_brightness = brightness;
        self.pushes += 1;
        let _ = self.history.push(*frame);
    }
}

// ============================================================================
// In-memory settings store
// ============================================================================

/// Error returned by a [`MemoryStore`] once it is full or marked read-only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreFull;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value {
    Byte(u8),
    Flag(bool),
}

/// Key/value store backed by a fixed-capacity map
pub struct MemoryStore {
    entries: heapless::Vec<(&'static str, Value), 16>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: heapless::Vec::new(),
            read_only: false,
        }
    }

    /// A store that rejects every write
    pub fn read_only() -> Self {
        Self {
            entries: heapless::Vec::new(),
            read_only: true,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Seed a raw byte, bypassing the range checks a command would apply
    pub fn insert_u8(&mut self, key: &'static str, value: u8) {
        let _ = self.insert(key, Value::Byte(value));
    }

    pub fn insert_bool(&mut self, key: &'static str, value: bool) {
        let _ = self.insert(key, Value::Flag(value));
    }

    fn insert(&mut self, key: &'static str, value: Value) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
            return true;
        }
        self.entries.push((key, value)).is_ok()
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
    }

    fn intern(key: &str) -> Option<&'static str> {
        use segment_clock::settings::keys;
        [
            keys::BRIGHTNESS,
            keys::MODE,
            keys::RED,
            keys::GREEN,
            keys::BLUE,
            keys::RAINBOW_SPEED,
            keys::AUTO_BRIGHTNESS,
            keys::DAY_BRIGHTNESS,
            keys::NIGHT_BRIGHTNESS,
            keys::TRANSITION_BRIGHTNESS,
        ]
        .into_iter()
        .find(|k| *k == key)
    }

    fn put(&mut self, key: &str, value: Value) -> Result<(), StoreFull> {
        if self.read_only {
            return Err(StoreFull);
        }
        let key = Self::intern(key).ok_or(StoreFull)?;
        if self.insert(key, value) {
            Ok(())
        } else {
            Err(StoreFull)
        }
    }
}

impl SettingsStore for MemoryStore {
    type Error = StoreFull;

    fn get_u8(&mut self, key: &str) -> Option<u8> {
        match self.get(key)? {
            Value::Byte(value) => Some(value),
            Value::Flag(_) => None,
        }
    }

    fn get_bool(&mut self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Flag(value) => Some(value),
            Value::Byte(_) => None,
        }
    }

    fn put_u8(&mut self, key: &str, value: u8) -> Result<(), Self::Error> {
        self.put(key, Value::Byte(value))
    }

    fn put_bool(&mut self, key: &str, value: bool) -> Result<(), Self::Error> {
        self.put(key, Value::Flag(value))
    }
}

// ============================================================================
// Re-export color constants from library for test convenience
// ============================================================================

#[allow(unused_imports)]
pub use segment_clock::{BLUE, GREEN, OFF, RED, WHITE};

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Glyph characters shown on the four digit units, `'?'` for an unknown pattern
pub fn shown_text(frame: &Frame) -> [char; 4] {
    const CANDIDATES: &str = "0123456789.-AbCcdEFGHhIJLnoPrtUuy ";
    core::array::from_fn(|unit| {
        let mask = frame.mask(unit);
        CANDIDATES
            .chars()
            .find(|c| segment_clock::encode(*c) == mask)
            .unwrap_or('?')
    })
}

/// True if every lit LED on the face (digits and colon) has `color`
pub fn lit_in(frame: &Frame, color: Rgb8) -> bool {
    frame
        .digits()
        .iter()
        .flatten()
        .chain(frame.colon().iter())
        .all(|led| *led == OFF || *led == color)
}

/// Compare two 8-bit colors allowing one step of rounding per channel
pub fn colors_close(a: Rgb8, b: Rgb8) -> bool {
    a.red.abs_diff(b.red) <= 1 && a.green.abs_diff(b.green) <= 1 && a.blue.abs_diff(b.blue) <= 1
}
