//! Command-based control for controllers.

use crate::colour::Colour;

/// Actions that can be sent to a [`SignalController`](crate::SignalController).
///
/// Useful when commands arrive over a channel from other tasks and the
/// controller lives in a single polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalCommand {
    /// Repeat a pulse-code pattern.
    SetPattern { pulses: u8, colour: Colour },
    /// Show a solid colour for a while, then return to the pattern.
    Blink { duration_ms: u32, colour: Colour },
    /// Show or release a solid colour that pre-empts everything else.
    Override { active: bool, colour: Colour },
    /// Stop all activity and latch a colour.
    Stop(Colour),
}

impl SignalCommand {
    /// Stop and turn every LED off.
    pub const fn off() -> Self {
        SignalCommand::Stop(Colour::OFF)
    }

    /// Release an active override.
    pub const fn release_override() -> Self {
        SignalCommand::Override {
            active: false,
            colour: Colour::ALL,
        }
    }
}
