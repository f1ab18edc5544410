//! Status LED controller with overlay priorities and timing control.
//!
//! Provides [`SignalController`], which drives up to four LED channels through a
//! repeating pulse-code pattern, a timed blink overlay and a manual override.
//! Output is arbitrated by strict priority: override, then blink, then the
//! flasher pattern. A pre-empted flasher keeps its place in the cycle and
//! resumes from there.

use crate::channel::{ChannelMap, effective_level};
use crate::colour::Colour;
use crate::command::SignalCommand;
use crate::cycle::{self, Phase, PhaseAction, PulseCount};
use crate::output::PinDriver;
use crate::time::{Millis, TimeSource};

/// Default duration of one flasher phase.
pub const DEFAULT_TICK_MS: u32 = 150;

/// Tunables for a [`SignalController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    /// Duration of one flasher phase in milliseconds.
    pub tick_ms: u32,
    /// Log every flasher phase.
    pub verbose: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            verbose: false,
        }
    }
}

/// Which mode currently owns the LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveMode {
    /// Nothing running. LEDs hold the colour latched by the last `stop`.
    Idle,
    /// Pulse-code pattern advancing.
    Flasher,
    /// Timed blink overlay showing.
    Blink,
    /// Manual override showing.
    Override,
}

#[derive(Debug, Clone, Copy)]
struct Flasher {
    colour: Colour,
    /// `None` while stopped.
    pulses: Option<PulseCount>,
    phase: Phase,
    deadline: Millis,
}

impl Flasher {
    const fn stopped(colour: Colour) -> Self {
        Self {
            colour,
            pulses: None,
            phase: Phase::START,
            deadline: Millis::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct BlinkOverlay {
    colour: Colour,
    expires: Millis,
}

/// Drives a multi-channel status LED without blocking.
///
/// Call [`poll`](Self::poll) from the main loop more often than once per tick
/// (150ms by default). Every command returns immediately.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `D` - Pin driver implementation type
/// * `T` - Time source implementation type
pub struct SignalController<'t, D: PinDriver, T: TimeSource> {
    driver: D,
    time_source: &'t T,
    config: ControllerConfig,
    channels: ChannelMap,
    flasher: Flasher,
    blink: Option<BlinkOverlay>,
    override_colour: Option<Colour>,
    shown: Colour,
}

impl<'t, D: PinDriver, T: TimeSource> SignalController<'t, D, T> {
    /// Creates an idle controller with no channels assigned.
    pub fn new(driver: D, time_source: &'t T) -> Self {
        Self::with_config(driver, time_source, ControllerConfig::default())
    }

    /// Creates an idle controller with custom tunables.
    pub fn with_config(driver: D, time_source: &'t T, config: ControllerConfig) -> Self {
        Self {
            driver,
            time_source,
            config,
            channels: ChannelMap::new(),
            flasher: Flasher::stopped(Colour::OFF),
            blink: None,
            override_colour: None,
            shown: Colour::OFF,
        }
    }

    /// Assigns pins to channels and configures them as outputs.
    ///
    /// Replaces any previous assignment. Channels without a pin are never driven.
    pub fn configure_channels(&mut self, channels: ChannelMap) {
        self.channels = channels;
        for (_, pin, _) in self.channels.assigned() {
            self.driver.configure_output(pin);
            debug!("channel pin {} configured", pin.0);
        }
    }

    /// Enables or disables per-phase trace logging.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.config.verbose = verbose;
    }

    /// Handles a command by dispatching to the matching method.
    pub fn handle_command(&mut self, command: SignalCommand) {
        match command {
            SignalCommand::SetPattern { pulses, colour } => self.set_pattern(pulses, colour),
            SignalCommand::Blink {
                duration_ms,
                colour,
            } => self.start_blink(duration_ms, colour),
            SignalCommand::Override { active, colour } => self.set_override(active, colour),
            SignalCommand::Stop(colour) => self.stop(colour),
        }
    }

    /// Starts repeating a code of `pulses` pulses (clamped to 1..=8) in `colour`.
    ///
    /// Re-issuing the pattern that is already running does nothing, so callers
    /// can set it every loop without restarting the cycle. A new pattern starts
    /// from the first pulse on the next poll.
    pub fn set_pattern(&mut self, pulses: u8, colour: Colour) {
        let pulses = PulseCount::new(pulses);
        if self.flasher.pulses == Some(pulses) && self.flasher.colour == colour {
            return;
        }

        self.flasher = Flasher {
            colour,
            pulses: Some(pulses),
            phase: Phase::START,
            deadline: Millis::ZERO,
        };
        if self.override_colour.is_none() && self.blink.is_none() {
            self.set_output(Colour::ALL, false);
        }
        debug!("flasher: {} pulses, colour {}", pulses.get(), colour.bits());
    }

    /// Shows `colour` for `duration_ms`, then hands back to the flasher.
    ///
    /// The flasher stays frozen where it is while the blink shows. An active
    /// override keeps the LEDs; the blink timer still runs underneath it.
    pub fn start_blink(&mut self, duration_ms: u32, colour: Colour) {
        let now = self.time_source.now();
        self.blink = Some(BlinkOverlay {
            colour,
            expires: now.after(duration_ms),
        });
        if self.override_colour.is_none() {
            self.set_output(colour, true);
        }
        debug!("blink start: colour {} for {}ms", colour.bits(), duration_ms);
    }

    /// Shows `colour` above everything else, or releases the override.
    ///
    /// On release the LEDs return to the blink colour if a blink is still
    /// running, otherwise to the flasher colour.
    pub fn set_override(&mut self, active: bool, colour: Colour) {
        if active {
            self.set_output(colour, true);
            self.override_colour = Some(colour);
            debug!("override start: colour {}", colour.bits());
            return;
        }

        self.override_colour = None;
        let now = self.time_source.now();
        match self.blink {
            Some(blink) if !blink.expires.has_passed(now) => {
                self.set_output(blink.colour, true);
                debug!("override stop, back to blink colour {}", blink.colour.bits());
            }
            Some(_) => self.end_blink(),
            None => {
                self.set_output(self.flasher.colour, true);
                debug!("override stop, back to flasher colour {}", self.flasher.colour.bits());
            }
        }
    }

    /// Stops all activity and latches `colour` on the LEDs.
    ///
    /// Use `Colour::OFF` to turn everything off. The latched colour is what a
    /// later override release or blink expiry returns to.
    pub fn stop(&mut self, colour: Colour) {
        self.set_output(colour, true);
        self.flasher = Flasher::stopped(colour);
        self.blink = None;
        self.override_colour = None;
        debug!("flasher stop: colour {}", colour.bits());
    }

    /// Advances the controller. Never blocks.
    ///
    /// Ends an expired blink, then executes at most one flasher phase if its
    /// deadline has been reached and nothing pre-empts it.
    pub fn poll(&mut self) {
        let now = self.time_source.now();

        if self.override_colour.is_none() {
            if let Some(blink) = self.blink {
                if blink.expires.has_passed(now) {
                    self.end_blink();
                }
            }
        }

        if self.override_colour.is_some() || self.blink.is_some() {
            return;
        }
        let Some(pulses) = self.flasher.pulses else {
            return;
        };
        if !self.flasher.deadline.has_passed(now) {
            return;
        }

        let step = cycle::step(self.flasher.phase, pulses);
        if self.config.verbose {
            trace!("flasher phase {}", self.flasher.phase.index());
        }
        match step.action {
            PhaseAction::Light => self.set_output(self.flasher.colour, true),
            PhaseAction::Blank => self.set_output(Colour::ALL, false),
            PhaseAction::Hold => {}
        }
        self.flasher.phase = step.next;
        self.flasher.deadline = now.after(self.config.tick_ms);
    }

    /// Returns the mode that currently owns the LEDs.
    pub fn mode(&self) -> ActiveMode {
        if self.override_colour.is_some() {
            ActiveMode::Override
        } else if self.blink.is_some() {
            ActiveMode::Blink
        } else if self.flasher.pulses.is_some() {
            ActiveMode::Flasher
        } else {
            ActiveMode::Idle
        }
    }

    /// Returns the phase the flasher will execute next.
    pub fn phase(&self) -> Phase {
        self.flasher.phase
    }

    /// Returns the running pattern's pulse count.
    pub fn pulse_count(&self) -> Option<PulseCount> {
        self.flasher.pulses
    }

    /// Returns the flasher colour, or the colour latched by `stop`.
    pub fn flasher_colour(&self) -> Colour {
        self.flasher.colour
    }

    /// Returns the colour of the pending blink, if any.
    pub fn blink_colour(&self) -> Option<Colour> {
        self.blink.map(|blink| blink.colour)
    }

    /// Returns the override colour while an override is active.
    pub fn override_colour(&self) -> Option<Colour> {
        self.override_colour
    }

    /// Returns true if a flasher pattern is set.
    pub fn is_running(&self) -> bool {
        self.flasher.pulses.is_some()
    }

    /// Returns true if a blink has not yet been ended.
    pub fn is_blinking(&self) -> bool {
        self.blink.is_some()
    }

    /// Returns true if an override is active.
    pub fn is_overridden(&self) -> bool {
        self.override_colour.is_some()
    }

    /// Returns the colour currently lit, `Colour::OFF` when dark.
    pub fn shown_colour(&self) -> Colour {
        self.shown
    }

    /// Returns the current channel assignment.
    pub fn channels(&self) -> &ChannelMap {
        &self.channels
    }

    /// Returns the active tunables.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Returns a reference to the pin driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Returns a mutable reference to the pin driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Consumes the controller, returning the pin driver.
    pub fn release(self) -> D {
        self.driver
    }

    /// Hands the LEDs back to the flasher colour and drops the blink.
    fn end_blink(&mut self) {
        self.set_output(Colour::ALL, false);
        self.set_output(self.flasher.colour, true);
        self.blink = None;
        debug!("blink stop, back to flasher colour {}", self.flasher.colour.bits());
    }

    /// Single point through which every LED write passes.
    fn set_output(&mut self, colour: Colour, on: bool) {
        for (channel, pin, polarity) in self.channels.assigned() {
            let active = on && colour.contains(channel);
            self.driver.set_level(pin, effective_level(active, polarity));
        }
        self.shown = if on { colour } else { Colour::OFF };
    }
}
