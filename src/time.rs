//! Millisecond time abstraction for platform-agnostic timing.

/// A reading of a monotonic millisecond counter.
///
/// Comparisons are made on the raw counter value. Like most platform tick
/// counters it wraps after about 49.7 days; no attempt is made to handle that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u32);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    /// Returns the raw counter value.
    #[inline]
    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// Returns the instant `duration_ms` after this one, wrapping on overflow.
    #[inline]
    pub const fn after(self, duration_ms: u32) -> Millis {
        Millis(self.0.wrapping_add(duration_ms))
    }

    /// Returns true once this deadline has been reached at `now`.
    #[inline]
    pub fn has_passed(self, now: Millis) -> bool {
        now >= self
    }
}

impl From<u32> for Millis {
    fn from(millis: u32) -> Self {
        Millis(millis)
    }
}

/// Trait for abstracting time sources.
pub trait TimeSource {
    /// Returns the current time.
    fn now(&self) -> Millis;
}

/// Adapts a free function or closure returning milliseconds into a [`TimeSource`].
///
/// ```
/// use status_flasher::{FnTimeSource, Millis, TimeSource};
///
/// fn millis() -> u32 {
///     1234
/// }
///
/// let clock = FnTimeSource(millis);
/// assert_eq!(clock.now(), Millis(1234));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnTimeSource<F>(pub F);

impl<F: Fn() -> u32> TimeSource for FnTimeSource<F> {
    fn now(&self) -> Millis {
        Millis((self.0)())
    }
}

/// Time source backed by [`std::time::Instant`], counting from its creation.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdTimeSource {
    epoch: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdTimeSource {
    pub fn new() -> Self {
        Self {
            epoch: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for StdTimeSource {
    fn now(&self) -> Millis {
        // Truncation wraps the same way a 32-bit hardware counter does.
        Millis(self.epoch.elapsed().as_millis() as u32)
    }
}
