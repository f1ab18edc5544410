//! Shared test infrastructure for status-flasher integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use status_flasher::{
    ChannelMap, Millis, PinDriver, PinId, PinState, Polarity, SignalController, TimeSource,
};

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock clock with controllable time advancement
pub struct MockClock {
    current_time: Cell<u32>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(millis: u32) -> Self {
        Self {
            current_time: Cell::new(millis),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u32) {
        self.current_time.set(self.current_time.get() + millis);
    }

    pub fn set_time(&self, millis: u32) {
        self.current_time.set(millis);
    }

    pub fn millis(&self) -> u32 {
        self.current_time.get()
    }
}

impl TimeSource for MockClock {
    fn now(&self) -> Millis {
        Millis(self.current_time.get())
    }
}

// ============================================================================
// Mock Pins
// ============================================================================

/// Mock pin driver that records the level of every pin and each write
pub struct MockPins {
    levels: [Option<PinState>; 16],
    configured: heapless::Vec<PinId, 16>,
    history: heapless::Vec<(PinId, PinState), 64>,
    writes: usize,
}

impl MockPins {
    pub fn new() -> Self {
        Self {
            levels: [None; 16],
            configured: heapless::Vec::new(),
            history: heapless::Vec::new(),
            writes: 0,
        }
    }

    pub fn level(&self, pin: u8) -> Option<PinState> {
        self.levels[pin as usize]
    }

    pub fn is_high(&self, pin: u8) -> bool {
        self.level(pin) == Some(PinState::High)
    }

    pub fn configured(&self) -> &[PinId] {
        &self.configured
    }

    /// First writes only; the buffer stops recording once full
    pub fn history(&self) -> &[(PinId, PinState)] {
        &self.history
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.writes = 0;
    }
}

impl PinDriver for MockPins {
    fn configure_output(&mut self, pin: PinId) {
        let _ = self.configured.push(pin);
    }

    fn set_level(&mut self, pin: PinId, level: PinState) {
        self.levels[pin.0 as usize] = Some(level);
        self.writes += 1;
        let _ = self.history.push((pin, level));
    }
}

// ============================================================================
// Pin Layout
// ============================================================================

pub const RED_PIN: u8 = 5;
pub const GREEN_PIN: u8 = 6;
pub const BLUE_PIN: u8 = 7;
pub const BUILTIN_PIN: u8 = 2;

/// All four channels active-high except the active-low built-in LED
pub fn full_map() -> ChannelMap {
    ChannelMap::new()
        .red(PinId(RED_PIN), Polarity::ActiveHigh)
        .green(PinId(GREEN_PIN), Polarity::ActiveHigh)
        .blue(PinId(BLUE_PIN), Polarity::ActiveHigh)
        .builtin(PinId(BUILTIN_PIN), Polarity::ActiveLow)
}

pub type TestController<'t> = SignalController<'t, MockPins, MockClock>;

/// Controller with `full_map` already configured
pub fn configured_controller(clock: &MockClock) -> TestController<'_> {
    let mut controller = SignalController::new(MockPins::new(), clock);
    controller.configure_channels(full_map());
    controller
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// True if the active-high RGB pins show exactly `red`, `green`, `blue`
pub fn rgb_is(pins: &MockPins, red: bool, green: bool, blue: bool) -> bool {
    pins.is_high(RED_PIN) == red && pins.is_high(GREEN_PIN) == green && pins.is_high(BLUE_PIN) == blue
}

/// True if no channel of `full_map` is lit
pub fn all_dark(pins: &MockPins) -> bool {
    rgb_is(pins, false, false, false) && pins.is_high(BUILTIN_PIN)
}

/// Polls every `step_ms` for `duration_ms`, calling `sample` after each poll
pub fn run_for(
    controller: &mut TestController<'_>,
    clock: &MockClock,
    duration_ms: u32,
    step_ms: u32,
    mut sample: impl FnMut(&TestController<'_>),
) {
    let end = clock.millis() + duration_ms;
    while clock.millis() < end {
        controller.poll();
        sample(&*controller);
        clock.advance(step_ms);
    }
}

/// Counts rising edges in a sequence of on/off samples
pub fn count_pulses(samples: &[bool]) -> usize {
    let mut previous = false;
    samples
        .iter()
        .filter(|&&on| {
            let rising = on && !previous;
            previous = on;
            rising
        })
        .count()
}
