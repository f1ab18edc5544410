//! Output driver abstraction.
//!
//! The controller never touches hardware directly. It addresses pins by
//! [`PinId`] through a [`PinDriver`], which lets the same controller run on a
//! board's GPIO, an I/O expander, or a recording mock in tests.

use crate::channel::PinId;
use embedded_hal::digital::{OutputPin, PinState};
use heapless::Vec;

/// Trait for abstracting digital output hardware.
///
/// Implement this for your GPIO layer. Both methods are infallible; handle any
/// hardware errors internally.
pub trait PinDriver {
    /// Prepares `pin` to be used as a digital output.
    fn configure_output(&mut self, pin: PinId);

    /// Drives `pin` to `level`.
    fn set_level(&mut self, pin: PinId, level: PinState);
}

impl<D: PinDriver + ?Sized> PinDriver for &mut D {
    fn configure_output(&mut self, pin: PinId) {
        (**self).configure_output(pin);
    }

    fn set_level(&mut self, pin: PinId, level: PinState) {
        (**self).set_level(pin, level);
    }
}

/// Errors that can occur while registering outputs in a [`HalPinBank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BankError {
    /// The bank is full and cannot accept more outputs.
    BankFull,

    /// An output is already registered under this pin.
    DuplicatePin(PinId),
}

impl core::fmt::Display for BankError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BankError::BankFull => write!(f, "pin bank is full, cannot add more outputs"),
            BankError::DuplicatePin(pin) => {
                write!(f, "pin {} is already registered in the bank", pin.0)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BankError {}

/// A [`PinDriver`] over up to `N` `embedded-hal` output pins.
///
/// HAL pin types are already configured as outputs when they are constructed,
/// so `configure_output` only checks that the pin is known. Write errors are
/// logged and counted, never propagated.
///
/// # Type Parameters
/// * `P` - Output pin type (use a HAL's type-erased pin to mix physical pins)
/// * `N` - Maximum number of pins
pub struct HalPinBank<P: OutputPin, const N: usize> {
    pins: Vec<(PinId, P), N>,
    write_faults: u32,
}

impl<P: OutputPin, const N: usize> HalPinBank<P, N> {
    /// Creates an empty bank.
    pub fn new() -> Self {
        Self {
            pins: Vec::new(),
            write_faults: 0,
        }
    }

    /// Registers `output` under `pin`.
    ///
    /// # Errors
    /// * `DuplicatePin` - `pin` is already registered
    /// * `BankFull` - the bank already holds `N` outputs
    pub fn add(&mut self, pin: PinId, output: P) -> Result<(), BankError> {
        if self.contains(pin) {
            return Err(BankError::DuplicatePin(pin));
        }
        self.pins
            .push((pin, output))
            .map_err(|_| BankError::BankFull)
    }

    /// Builder-style variant of [`add`](Self::add).
    pub fn with(mut self, pin: PinId, output: P) -> Result<Self, BankError> {
        self.add(pin, output)?;
        Ok(self)
    }

    /// Returns true if an output is registered under `pin`.
    pub fn contains(&self, pin: PinId) -> bool {
        self.pins.iter().any(|(id, _)| *id == pin)
    }

    /// Returns the number of registered outputs.
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Returns true if no outputs are registered.
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Returns the output registered under `pin`.
    pub fn get_mut(&mut self, pin: PinId) -> Option<&mut P> {
        self.pins
            .iter_mut()
            .find(|(id, _)| *id == pin)
            .map(|(_, output)| output)
    }

    /// Number of writes the underlying pins rejected.
    pub fn write_faults(&self) -> u32 {
        self.write_faults
    }
}

impl<P: OutputPin, const N: usize> Default for HalPinBank<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: OutputPin, const N: usize> PinDriver for HalPinBank<P, N> {
    fn configure_output(&mut self, pin: PinId) {
        if !self.contains(pin) {
            warn!("pin {} is not registered in the bank", pin.0);
        }
    }

    fn set_level(&mut self, pin: PinId, level: PinState) {
        let Some(output) = self.get_mut(pin) else {
            return;
        };
        if output.set_state(level).is_err() {
            self.write_faults = self.write_faults.saturating_add(1);
            warn!("write to pin {} failed", pin.0);
        }
    }
}
