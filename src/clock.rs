//! Interrupt-safe concrete tick source.
//!
//! [`TickClock`] is the bridge between a periodic timer interrupt and the
//! control loop: the ISR calls [`on_tick`](TickClock::on_tick), the loop
//! consumes the counter and flags through the [`TickSource`] trait. All
//! shared state lives behind `critical_section::Mutex`, so a flag can never
//! be lost between the loop's read and clear.

use core::cell::Cell;

use critical_section::Mutex;

use crate::time::{TickSource, Ticks};

#[derive(Debug, Clone, Copy)]
struct ClockState {
    ticks: Ticks,
    quantum: bool,
    crosswalk_window: bool,
}

impl ClockState {
    const fn new() -> Self {
        Self {
            ticks: 0,
            quantum: false,
            crosswalk_window: false,
        }
    }
}

/// Free-running tick counter plus the two per-quantum flags.
///
/// Designed to live in a `static` shared between the timer ISR and the main
/// loop:
///
/// ```rust,ignore
/// static CLOCK: TickClock = TickClock::new();
///
/// fn systick_handler() {
///     CLOCK.on_tick();
/// }
/// ```
pub struct TickClock {
    state: Mutex<Cell<ClockState>>,
}

impl TickClock {
    /// Creates a clock at tick zero with both flags lowered.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(ClockState::new())),
        }
    }

    /// Advances the counter by one tick and raises both flags.
    ///
    /// Call this from the periodic timer interrupt, once per quantum.
    pub fn on_tick(&self) {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut state = cell.get();
            state.ticks = state.ticks.wrapping_add(1);
            state.quantum = true;
            state.crosswalk_window = true;
            cell.set(state);
        });
    }
}

impl TickSource for TickClock {
    fn ticks(&self) -> Ticks {
        critical_section::with(|cs| self.state.borrow(cs).get().ticks)
    }

    fn take_quantum(&self) -> bool {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut state = cell.get();
            let was_set = state.quantum;
            state.quantum = false;
            cell.set(state);
            was_set
        })
    }

    fn take_crosswalk_window(&self) -> bool {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut state = cell.get();
            let was_set = state.crosswalk_window;
            state.crosswalk_window = false;
            cell.set(state);
            was_set
        })
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}
