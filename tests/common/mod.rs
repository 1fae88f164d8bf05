//! Shared test infrastructure for traffic-signal integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;

use traffic_signal::{Color, CrosswalkInput, SignalController, SignalLamp, TickSource, Ticks};

// ============================================================================
// Mock Tick Source
// ============================================================================

/// Mock tick source with manually driven ticks and flags.
pub struct MockClock {
    ticks: Cell<Ticks>,
    quantum: Cell<bool>,
    window: Cell<bool>,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            ticks: Cell::new(0),
            quantum: Cell::new(false),
            window: Cell::new(false),
        }
    }

    /// Simulates one timer interrupt: advance the counter, raise both flags.
    pub fn tick(&self) {
        self.ticks.set(self.ticks.get().wrapping_add(1));
        self.quantum.set(true);
        self.window.set(true);
    }

    pub fn set_ticks(&self, ticks: Ticks) {
        self.ticks.set(ticks);
    }
}

impl TickSource for MockClock {
    fn ticks(&self) -> Ticks {
        self.ticks.get()
    }

    fn take_quantum(&self) -> bool {
        self.quantum.replace(false)
    }

    fn take_crosswalk_window(&self) -> bool {
        self.window.replace(false)
    }
}

// ============================================================================
// Mock Lamp
// ============================================================================

/// Mock lamp that records every distinct color pushed to it.
pub struct MockLamp {
    current: Color,
    changes: heapless::Vec<Color, 128>,
}

impl MockLamp {
    pub fn new() -> Self {
        Self {
            current: Color::new(0, 0, 0),
            changes: heapless::Vec::new(),
        }
    }

    pub fn last_color(&self) -> Color {
        self.current
    }

    /// Distinct colors in the order they appeared.
    pub fn changes(&self) -> &[Color] {
        &self.changes
    }
}

impl SignalLamp for MockLamp {
    fn set_color(&mut self, color: Color) {
        if color != self.current {
            let _ = self.changes.push(color);
        }
        self.current = color;
    }
}

// ============================================================================
// Mock Crosswalk Input
// ============================================================================

/// Mock input sampler with a latched request and a query counter.
///
/// Implemented for `&MockInput` so tests keep access to the mock after
/// handing it to the controller.
pub struct MockInput {
    pending: Cell<bool>,
    queries: Cell<u32>,
}

impl MockInput {
    pub fn new() -> Self {
        Self {
            pending: Cell::new(false),
            queries: Cell::new(0),
        }
    }

    /// Latches a crosswalk request, as the button ISR would.
    pub fn press(&self) {
        self.pending.set(true);
    }

    /// True if a latched request has not been consumed yet.
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Number of times the controller sampled this input.
    pub fn queries(&self) -> u32 {
        self.queries.get()
    }
}

impl CrosswalkInput for &MockInput {
    fn crosswalk_requested(&mut self) -> bool {
        self.queries.set(self.queries.get() + 1);
        self.pending.replace(false)
    }
}

// ============================================================================
// Harness helpers
// ============================================================================

pub type TestController<'a> = SignalController<'a, MockClock, MockLamp, &'a MockInput>;

/// Drives `ticks` timer quanta through the controller.
///
/// Polls twice per tick: the real control loop is a tight poll that spins
/// much faster than the 62.5 ms quantum, so a pending flag raised on the
/// same tick a phase change fires is consumed on a follow-up iteration.
pub fn run_ticks(clock: &MockClock, controller: &mut TestController<'_>, ticks: Ticks) {
    for _ in 0..ticks {
        clock.tick();
        controller.poll();
        controller.poll();
    }
}
