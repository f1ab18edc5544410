//! The flasher's pulse-code cycle.
//!
//! One cycle shows a long first pulse, up to seven short pulses separated by
//! gaps, then a fixed pause so repeated codes stay distinguishable from a plain
//! blink. Every phase lasts one tick (150ms by default):
//!
//! ```text
//! 1: 111000000       (phases 0-3, 18-22)
//! 2: 11101000000
//! 3: 1110101000000
//! 8: 11101010101010101000000
//! ```
//!
//! The cycle is a pure transition function of `(phase, pulse count)`; the
//! controller owns the cursor and applies the returned action.

use heapless::Vec;

/// Most pulses a single cycle can show.
pub const MAX_PULSES: u8 = 8;

/// Number of distinct phases (0..=22).
pub const PHASE_COUNT: usize = 23;

const FIRST_GAP: u8 = 4;
const LAST_PULSE: u8 = 17;
const TRAILING_GAP: u8 = 18;
const RESTART: u8 = 22;

/// Number of pulses shown per cycle, clamped to `1..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseCount(u8);

impl PulseCount {
    pub const MIN: PulseCount = PulseCount(1);
    pub const MAX: PulseCount = PulseCount(MAX_PULSES);

    /// Creates a pulse count, clamping into `1..=8`.
    pub const fn new(pulses: u8) -> Self {
        if pulses < 1 {
            PulseCount(1)
        } else if pulses > MAX_PULSES {
            PulseCount(MAX_PULSES)
        } else {
            PulseCount(pulses)
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Ticks in one full cycle, including the trailing pause.
    pub const fn cycle_ticks(self) -> u32 {
        2 * self.0 as u32 + 7
    }
}

impl From<u8> for PulseCount {
    fn from(pulses: u8) -> Self {
        PulseCount::new(pulses)
    }
}

/// Position within the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Phase(u8);

impl Phase {
    pub const START: Phase = Phase(0);

    /// Returns the phase with index `index`, if it exists.
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < PHASE_COUNT {
            Some(Phase(index))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }
}

/// What the controller does to the LEDs when executing a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhaseAction {
    /// Light the pattern colour.
    Light,
    /// Turn every channel off.
    Blank,
    /// Leave the outputs as they are.
    Hold,
}

/// Result of executing one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    pub action: PhaseAction,
    pub next: Phase,
}

/// Executes `phase` of a cycle showing `pulses` pulses.
pub const fn step(phase: Phase, pulses: PulseCount) -> Step {
    let p = phase.0;
    let (action, next) = match p {
        // First pulse, held through phases 1-3
        0 => (PhaseAction::Light, 1),
        1 | 2 => (PhaseAction::Hold, p + 1),
        3 => {
            if pulses.0 == 1 {
                (PhaseAction::Hold, TRAILING_GAP)
            } else {
                (PhaseAction::Hold, FIRST_GAP)
            }
        }
        // Gap before each further pulse
        FIRST_GAP..=LAST_PULSE if p % 2 == 0 => (PhaseAction::Blank, p + 1),
        // Pulse number (p - 1) / 2, then stop once enough have been shown
        FIRST_GAP..=LAST_PULSE => {
            if (p - 1) / 2 >= pulses.0 {
                (PhaseAction::Light, TRAILING_GAP)
            } else {
                (PhaseAction::Light, p + 1)
            }
        }
        TRAILING_GAP => (PhaseAction::Blank, TRAILING_GAP + 1),
        19..=21 => (PhaseAction::Hold, p + 1),
        _ => (PhaseAction::Hold, 0),
    };
    Step {
        action,
        next: Phase(next),
    }
}

/// Lists every phase visited in one cycle, starting at phase 0.
pub fn expand(pulses: PulseCount) -> Vec<(Phase, PhaseAction), PHASE_COUNT> {
    let mut visited = Vec::new();
    let mut phase = Phase::START;
    loop {
        let step = step(phase, pulses);
        // A cycle never visits more than PHASE_COUNT phases.
        if visited.push((phase, step.action)).is_err() {
            break;
        }
        if phase.0 == RESTART {
            break;
        }
        phase = step.next;
    }
    visited
}
