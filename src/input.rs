//! Crosswalk request input sampling.
//!
//! Two asynchronous sources can request a crosswalk: a button press latched
//! from interrupt context ([`RequestLatch`]) and a capacitive touch sensor
//! polled synchronously and compared against a threshold ([`TouchSensor`]).
//! [`CrosswalkSampler`] merges both behind the [`CrosswalkInput`] trait the
//! controller consumes.

use core::cell::Cell;

use critical_section::Mutex;

/// Raw touch reading above which the sensor counts as pressed.
///
/// Readings already have the sensor's idle offset subtracted, so an
/// untouched (possibly slightly negative) reading never trips this.
pub const TOUCH_PRESSED_THRESHOLD: i32 = 100;

/// Trait the controller queries for pending crosswalk requests.
pub trait CrosswalkInput {
    /// Returns `true` if a request was asserted since the last query.
    ///
    /// The query consumes any pending button latch. The controller calls
    /// this at most once per tick quantum.
    fn crosswalk_requested(&mut self) -> bool;
}

/// Trait for abstracting the capacitive touch sensor.
///
/// Implementations perform the (bounded) blocking hardware scan and return
/// the offset-corrected raw value. A malformed or idle reading is simply
/// below [`TOUCH_PRESSED_THRESHOLD`] and treated as "not pressed".
pub trait TouchSensor {
    /// Scans the sensor and returns the offset-corrected raw value.
    fn scan(&mut self) -> i32;
}

/// Interrupt-set, loop-cleared button latch.
///
/// The button ISR calls [`set`](RequestLatch::set); the sampler's query
/// consumes it with [`take`](RequestLatch::take). The read-and-clear runs in
/// one critical section so a press arriving between read and clear cannot be
/// lost.
pub struct RequestLatch {
    pressed: Mutex<Cell<bool>>,
}

impl RequestLatch {
    /// Creates a cleared latch.
    pub const fn new() -> Self {
        Self {
            pressed: Mutex::new(Cell::new(false)),
        }
    }

    /// Latches a press. Call from the button interrupt handler.
    pub fn set(&self) {
        critical_section::with(|cs| self.pressed.borrow(cs).set(true));
    }

    /// Consumes the latch, returning whether a press was pending.
    pub fn take(&self) -> bool {
        critical_section::with(|cs| self.pressed.borrow(cs).replace(false))
    }
}

impl Default for RequestLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Combines the button latch and the touch sensor into one request query.
pub struct CrosswalkSampler<'l, S: TouchSensor> {
    latch: &'l RequestLatch,
    touch: S,
}

impl<'l, S: TouchSensor> CrosswalkSampler<'l, S> {
    /// Creates a sampler over a shared latch and an owned touch sensor.
    pub fn new(latch: &'l RequestLatch, touch: S) -> Self {
        Self { latch, touch }
    }
}

impl<S: TouchSensor> CrosswalkInput for CrosswalkSampler<'_, S> {
    fn crosswalk_requested(&mut self) -> bool {
        // The latch is consumed unconditionally; short-circuiting here
        // would leave a stale press pending across polling windows.
        let button = self.latch.take();
        let touch = self.touch.scan() > TOUCH_PRESSED_THRESHOLD;
        button || touch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedTouch(i32);

    impl TouchSensor for FixedTouch {
        fn scan(&mut self) -> i32 {
            self.0
        }
    }

    #[test]
    fn latch_take_is_destructive() {
        let latch = RequestLatch::new();
        assert!(!latch.take());
        latch.set();
        assert!(latch.take());
        assert!(!latch.take());
    }

    #[test]
    fn button_press_requests_crosswalk() {
        let latch = RequestLatch::new();
        let mut sampler = CrosswalkSampler::new(&latch, FixedTouch(0));
        assert!(!sampler.crosswalk_requested());
        latch.set();
        assert!(sampler.crosswalk_requested());
        assert!(!sampler.crosswalk_requested());
    }

    #[test]
    fn touch_above_threshold_requests_crosswalk() {
        let latch = RequestLatch::new();
        let mut sampler = CrosswalkSampler::new(&latch, FixedTouch(TOUCH_PRESSED_THRESHOLD + 1));
        assert!(sampler.crosswalk_requested());
    }

    #[test]
    fn threshold_is_exclusive_and_negative_readings_are_ignored() {
        let latch = RequestLatch::new();
        let mut at_threshold = CrosswalkSampler::new(&latch, FixedTouch(TOUCH_PRESSED_THRESHOLD));
        assert!(!at_threshold.crosswalk_requested());

        let mut idle = CrosswalkSampler::new(&latch, FixedTouch(-42));
        assert!(!idle.crosswalk_requested());
    }

    #[test]
    fn latch_is_cleared_even_when_touch_also_fires() {
        let latch = RequestLatch::new();
        let mut sampler = CrosswalkSampler::new(&latch, FixedTouch(500));
        latch.set();
        assert!(sampler.crosswalk_requested());
        assert!(!latch.take());
    }
}
