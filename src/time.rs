//! Tick-based time abstraction.
//!
//! The controller's only notion of time is a monotonic tick counter driven by
//! a periodic hardware timer (one tick = 62.5 ms in the reference design).
//! [`TickSource`] abstracts that counter together with the two edge-triggered
//! flags the driver raises each quantum; [`Stopwatch`] provides the relative
//! `reset()`/`elapsed()` view every phase uses to measure dwell time.

/// Monotonic tick count. One tick is one timer quantum.
pub type Ticks = u32;

/// Ticks per second in the reference design (62.5 ms quantum).
pub const TICKS_PER_SECOND: Ticks = 16;

/// Length of one tick in microseconds.
pub const TICK_PERIOD_MICROS: u32 = 62_500;

/// Trait for abstracting the periodic tick driver.
///
/// All methods take `&self`: the concrete implementation is shared between
/// an interrupt-context producer and the main-loop consumer, so interior
/// mutability with critical-section discipline is expected. See
/// [`TickClock`](crate::TickClock).
pub trait TickSource {
    /// Returns the free-running tick count.
    fn ticks(&self) -> Ticks;

    /// Consumes the "quantum elapsed" flag.
    ///
    /// Returns `true` at most once per tick; the flag is cleared by this
    /// call. Paces the interpolation steps during phase transitions.
    fn take_quantum(&self) -> bool;

    /// Consumes the "crosswalk check window elapsed" flag.
    ///
    /// Same contract as [`take_quantum`](TickSource::take_quantum) but
    /// consumed at a different point in the loop: it gates how often the
    /// crosswalk input is sampled. In the reference design both flags are
    /// raised by the same timer interrupt.
    fn take_crosswalk_window(&self) -> bool;
}

/// Relative stopwatch over a tick counter.
///
/// Stores the tick count captured at the last [`reset`](Stopwatch::reset);
/// [`elapsed`](Stopwatch::elapsed) is the wrapping difference from the live
/// count, so counter wraparound degrades gracefully instead of panicking.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Ticks,
}

impl Stopwatch {
    /// Creates a stopwatch with a zero baseline.
    pub const fn new() -> Self {
        Self { started: 0 }
    }

    /// Snapshots `now` as the new baseline.
    pub fn reset(&mut self, now: Ticks) {
        self.started = now;
    }

    /// Ticks accrued since the last reset.
    pub fn elapsed(&self, now: Ticks) -> Ticks {
        now.wrapping_sub(self.started)
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_zero_immediately_after_reset() {
        let mut watch = Stopwatch::new();
        watch.reset(1234);
        assert_eq!(watch.elapsed(1234), 0);
    }

    #[test]
    fn elapsed_tracks_tick_progression() {
        let mut watch = Stopwatch::new();
        watch.reset(100);
        assert_eq!(watch.elapsed(101), 1);
        assert_eq!(watch.elapsed(420), 320);
    }

    #[test]
    fn elapsed_wraps_instead_of_panicking() {
        let mut watch = Stopwatch::new();
        watch.reset(Ticks::MAX - 1);
        assert_eq!(watch.elapsed(Ticks::MAX), 1);
        assert_eq!(watch.elapsed(2), 4);
    }
}
