//! Indicator colours as channel bitmasks.
//!
//! A [`Colour`] selects which of the four LED channels light up. Composite
//! colours are unions of the primary channels, so `Colour::RED | Colour::GREEN`
//! is `Colour::ORANGE`. Any `u8` is a valid colour: bits outside the four
//! channels are carried along but never select anything.

use crate::channel::Channel;
use core::ops::{BitAnd, BitOr};
use palette::Srgb;

/// A set of LED channels to light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Colour(pub u8);

impl Colour {
    pub const OFF: Colour = Colour(0);
    pub const RED: Colour = Colour(1);
    pub const GREEN: Colour = Colour(2);
    pub const ORANGE: Colour = Colour(3);
    pub const BLUE: Colour = Colour(4);
    pub const PURPLE: Colour = Colour(5);
    pub const TEAL: Colour = Colour(6);
    pub const WHITE: Colour = Colour(7);
    pub const BUILTIN: Colour = Colour(8);
    pub const ALL: Colour = Colour(15);

    /// Returns the raw bitmask.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if `channel` is part of this colour.
    #[inline]
    pub const fn contains(self, channel: Channel) -> bool {
        self.0 & channel.mask() != 0
    }

    /// Returns true if no channel is selected.
    #[inline]
    pub const fn is_off(self) -> bool {
        self.0 & Colour::ALL.0 == 0
    }

    /// Iterates over the channels selected by this colour.
    pub fn channels(self) -> impl Iterator<Item = Channel> {
        Channel::ALL.into_iter().filter(move |ch| self.contains(*ch))
    }

    /// Returns the well-known name of this colour, if it has one.
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("off"),
            1 => Some("red"),
            2 => Some("green"),
            3 => Some("orange"),
            4 => Some("blue"),
            5 => Some("purple"),
            6 => Some("teal"),
            7 => Some("white"),
            8 => Some("builtin"),
            15 => Some("all"),
            _ => None,
        }
    }
}

impl From<u8> for Colour {
    fn from(bits: u8) -> Self {
        Colour(bits)
    }
}

impl From<Colour> for u8 {
    fn from(colour: Colour) -> Self {
        colour.0
    }
}

impl From<Channel> for Colour {
    fn from(channel: Channel) -> Self {
        Colour(channel.mask())
    }
}

impl BitOr for Colour {
    type Output = Colour;

    fn bitor(self, rhs: Colour) -> Colour {
        Colour(self.0 | rhs.0)
    }
}

impl BitAnd for Colour {
    type Output = Colour;

    fn bitand(self, rhs: Colour) -> Colour {
        Colour(self.0 & rhs.0)
    }
}

impl core::fmt::Display for Colour {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{:#04x}", self.0),
        }
    }
}

/// Renders the red, green and blue channels at full intensity.
///
/// The built-in channel has no RGB equivalent and is ignored.
impl From<Colour> for Srgb {
    fn from(colour: Colour) -> Self {
        let level = |channel| if colour.contains(channel) { 1.0 } else { 0.0 };
        Srgb::new(
            level(Channel::Red),
            level(Channel::Green),
            level(Channel::Blue),
        )
    }
}
