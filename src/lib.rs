#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`SignalController`**: Drives the status LED; poll it once per main-loop iteration
//! - **`Colour`**: Bitmask selecting which channels light (`RED | GREEN` is `ORANGE`)
//! - **`ChannelMap`**: Assigns pins and polarity to the Red, Green, Blue and Builtin channels
//! - **`PinDriver`**: Trait to implement for your GPIO hardware
//! - **`HalPinBank`**: Ready-made `PinDriver` over `embedded-hal` output pins
//! - **`TimeSource`**: Trait to implement for your millisecond counter
//! - **`PulseCount`** / **`Phase`**: The flasher's pulse-code cycle
//! - **`SignalCommand`**: Commands that can be sent to a controller
//!
//! Output priority is override, then blink, then the flasher pattern. Only one
//! of them drives the LEDs at a time.

mod fmt;

pub mod channel;
pub mod colour;
pub mod command;
pub mod controller;
pub mod cycle;
pub mod output;
pub mod time;

pub use channel::{Channel, ChannelConfig, ChannelMap, PinId, Polarity, effective_level};
pub use colour::Colour;
pub use command::SignalCommand;
pub use controller::{ActiveMode, ControllerConfig, DEFAULT_TICK_MS, SignalController};
pub use cycle::{MAX_PULSES, Phase, PhaseAction, PulseCount};
pub use output::{BankError, HalPinBank, PinDriver};
pub use time::{FnTimeSource, Millis, TimeSource};

#[cfg(feature = "std")]
pub use time::StdTimeSource;

pub use embedded_hal::digital::PinState;
