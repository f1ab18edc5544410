//! Channel roles, pin assignments and polarity.

use embedded_hal::digital::PinState;

/// One of the four LED lines the controller can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Red,
    Green,
    Blue,
    /// The board's built-in LED.
    Builtin,
}

impl Channel {
    /// All channels, in the order they are driven.
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Builtin];

    /// Bit selecting this channel in a [`Colour`](crate::Colour).
    #[inline]
    pub const fn mask(self) -> u8 {
        match self {
            Channel::Red => 1,
            Channel::Green => 2,
            Channel::Blue => 4,
            Channel::Builtin => 8,
        }
    }

    #[inline]
    const fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Builtin => 3,
        }
    }
}

/// Physical pin identifier understood by the [`PinDriver`](crate::PinDriver).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(pub u8);

/// Which logic level lights the LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// High lights the LED (common cathode).
    #[default]
    ActiveHigh,
    /// Low lights the LED (common anode, most built-in LEDs).
    ActiveLow,
}

impl Polarity {
    /// Maps an "inverted" wiring flag onto a polarity.
    pub const fn from_inverted(inverted: bool) -> Self {
        if inverted {
            Polarity::ActiveLow
        } else {
            Polarity::ActiveHigh
        }
    }
}

/// Returns the pin level that puts an LED into the wanted state.
#[inline]
pub const fn effective_level(active: bool, polarity: Polarity) -> PinState {
    match (active, polarity) {
        (true, Polarity::ActiveHigh) | (false, Polarity::ActiveLow) => PinState::High,
        (false, Polarity::ActiveHigh) | (true, Polarity::ActiveLow) => PinState::Low,
    }
}

/// Pin assignment for a single channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelConfig {
    /// `None` leaves the channel unused.
    pub pin: Option<PinId>,
    pub polarity: Polarity,
}

impl ChannelConfig {
    /// A channel with no pin. Never driven.
    pub const UNASSIGNED: ChannelConfig = ChannelConfig {
        pin: None,
        polarity: Polarity::ActiveHigh,
    };

    pub const fn new(pin: PinId, polarity: Polarity) -> Self {
        Self {
            pin: Some(pin),
            polarity,
        }
    }
}

/// Pin assignments for all four channels.
///
/// ```
/// use status_flasher::{ChannelMap, PinId, Polarity};
///
/// let map = ChannelMap::new()
///     .red(PinId(5), Polarity::ActiveHigh)
///     .green(PinId(6), Polarity::ActiveHigh)
///     .builtin(PinId(2), Polarity::ActiveLow);
/// assert_eq!(map.assigned().count(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelMap {
    configs: [ChannelConfig; 4],
}

impl ChannelMap {
    /// Creates a map with every channel unassigned.
    pub const fn new() -> Self {
        Self {
            configs: [ChannelConfig::UNASSIGNED; 4],
        }
    }

    /// Assigns `channel` to `pin`.
    pub const fn with(mut self, channel: Channel, pin: PinId, polarity: Polarity) -> Self {
        self.configs[channel.index()] = ChannelConfig::new(pin, polarity);
        self
    }

    pub const fn red(self, pin: PinId, polarity: Polarity) -> Self {
        self.with(Channel::Red, pin, polarity)
    }

    pub const fn green(self, pin: PinId, polarity: Polarity) -> Self {
        self.with(Channel::Green, pin, polarity)
    }

    pub const fn blue(self, pin: PinId, polarity: Polarity) -> Self {
        self.with(Channel::Blue, pin, polarity)
    }

    pub const fn builtin(self, pin: PinId, polarity: Polarity) -> Self {
        self.with(Channel::Builtin, pin, polarity)
    }

    /// Returns the configuration of one channel.
    pub const fn get(&self, channel: Channel) -> ChannelConfig {
        self.configs[channel.index()]
    }

    /// Iterates over channels that have a pin, with that pin and its polarity.
    pub fn assigned(&self) -> impl Iterator<Item = (Channel, PinId, Polarity)> + '_ {
        Channel::ALL.into_iter().filter_map(move |channel| {
            let config = self.get(channel);
            config.pin.map(|pin| (channel, pin, config.polarity))
        })
    }
}
