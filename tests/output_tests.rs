//! Integration tests for HalPinBank driving a SignalController

mod common;
use common::*;

use embedded_hal::digital::{Error, ErrorKind, ErrorType, OutputPin};
use status_flasher::{
    BankError, ChannelMap, Colour, HalPinBank, PinDriver, PinId, PinState, Polarity,
    SignalController,
};
use std::cell::Cell;
use std::rc::Rc;

// ============================================================================
// Mock Output Pins
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WriteRejected;

impl Error for WriteRejected {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Output pin whose level is observable through a shared cell
#[derive(Clone)]
struct SharedPin {
    high: Rc<Cell<bool>>,
    fail: bool,
}

impl SharedPin {
    fn new() -> (Self, Rc<Cell<bool>>) {
        let high = Rc::new(Cell::new(false));
        (
            Self {
                high: high.clone(),
                fail: false,
            },
            high,
        )
    }

    fn failing() -> Self {
        Self {
            high: Rc::new(Cell::new(false)),
            fail: true,
        }
    }
}

impl ErrorType for SharedPin {
    type Error = WriteRejected;
}

impl OutputPin for SharedPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.fail {
            return Err(WriteRejected);
        }
        self.high.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if self.fail {
            return Err(WriteRejected);
        }
        self.high.set(true);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn bank_errors_format_for_display() {
    assert_eq!(
        format!("{}", BankError::BankFull),
        "pin bank is full, cannot add more outputs"
    );
    assert_eq!(
        format!("{}", BankError::DuplicatePin(PinId(4))),
        "pin 4 is already registered in the bank"
    );
}

#[test]
fn controller_drives_hal_pins_through_the_bank() {
    let (red, red_level) = SharedPin::new();
    let (green, green_level) = SharedPin::new();
    let (builtin, builtin_level) = SharedPin::new();

    let bank: HalPinBank<SharedPin, 3> = HalPinBank::new()
        .with(PinId(5), red)
        .and_then(|bank| bank.with(PinId(6), green))
        .and_then(|bank| bank.with(PinId(2), builtin))
        .expect("bank has room for three pins");

    let clock = MockClock::new();
    let mut controller = SignalController::new(bank, &clock);
    controller.configure_channels(
        ChannelMap::new()
            .red(PinId(5), Polarity::ActiveHigh)
            .green(PinId(6), Polarity::ActiveHigh)
            .builtin(PinId(2), Polarity::ActiveLow),
    );

    controller.set_pattern(1, Colour::ORANGE);
    assert!(!red_level.get() && !green_level.get());
    assert!(builtin_level.get());

    controller.poll();
    assert!(red_level.get() && green_level.get());
    assert!(builtin_level.get());

    controller.set_override(true, Colour::BUILTIN);
    assert!(!red_level.get() && !green_level.get());
    assert!(!builtin_level.get());

    let bank = controller.release();
    assert_eq!(bank.write_faults(), 0);
    assert_eq!(bank.len(), 3);
}

#[test]
fn rejected_writes_are_counted_not_propagated() {
    let (good, good_level) = SharedPin::new();
    let mut bank: HalPinBank<SharedPin, 2> = HalPinBank::new();
    bank.add(PinId(1), good).unwrap();
    bank.add(PinId(2), SharedPin::failing()).unwrap();

    bank.set_level(PinId(1), PinState::High);
    bank.set_level(PinId(2), PinState::High);
    bank.set_level(PinId(2), PinState::Low);

    assert!(good_level.get());
    assert_eq!(bank.write_faults(), 2);
}

#[test]
fn unknown_pins_are_skipped() {
    let clock = MockClock::new();
    let bank: HalPinBank<SharedPin, 1> = HalPinBank::new();
    let mut controller = SignalController::new(bank, &clock);

    // Channel points at a pin the bank does not own
    controller.configure_channels(ChannelMap::new().blue(PinId(3), Polarity::ActiveHigh));
    controller.stop(Colour::BLUE);

    assert_eq!(controller.shown_colour(), Colour::BLUE);
    assert_eq!(controller.driver().write_faults(), 0);
    assert!(controller.driver().is_empty());
}

#[test]
fn borrowed_driver_can_be_shared_with_the_controller() {
    let clock = MockClock::new();
    let mut pins = MockPins::new();
    {
        let mut controller = SignalController::new(&mut pins, &clock);
        controller.configure_channels(full_map());
        controller.stop(Colour::RED);
    }
    assert!(pins.is_high(RED_PIN));
    assert!(!pins.is_high(GREEN_PIN));
}
