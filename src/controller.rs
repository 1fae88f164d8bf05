//! Traffic-signal state machine with timing and crosswalk preemption.
//!
//! Provides [`SignalController`] which drives a single RGB signal head
//! through the STOP → GO → WARNING cycle, cross-fading between phases and
//! interrupting the cycle for pedestrian crosswalk requests. Also defines
//! the [`SignalLamp`] trait for the actuator hardware.

use crate::colors::{
    Blend, COLOR_OFF, CROSSWALK_COLOR, Color, GO_COLOR, STOP_COLOR, WARNING_COLOR,
};
use crate::input::CrosswalkInput;
use crate::time::{Stopwatch, TickSource, Ticks};

/// Trait for abstracting the signal-head hardware.
///
/// Implement this for your output stage (PWM duty registers, SPI LED driver,
/// etc.). Called once per control-loop iteration, fire-and-forget; handle
/// any hardware errors internally - this method cannot fail.
pub trait SignalLamp {
    /// Pushes an RGB triplet to the signal head.
    fn set_color(&mut self, color: Color);
}

/// Dwell time of the STOP and GO phases, in ticks.
#[cfg(not(feature = "fast-cycle"))]
pub const STOP_GO_TICKS: Ticks = 320;
/// Dwell time of the STOP and GO phases, in ticks (bench bring-up timing).
#[cfg(feature = "fast-cycle")]
pub const STOP_GO_TICKS: Ticks = 80;

/// Dwell time of the WARNING phase, in ticks.
#[cfg(not(feature = "fast-cycle"))]
pub const WARNING_TICKS: Ticks = 80;
/// Dwell time of the WARNING phase, in ticks (bench bring-up timing).
#[cfg(feature = "fast-cycle")]
pub const WARNING_TICKS: Ticks = 48;

/// Duration of every cross-fade transition, in ticks (one second).
pub const TRANSITION_TICKS: Ticks = 16;

/// Dwell time of the CROSSWALK phase, in ticks (ten seconds).
pub const CROSSWALK_TICKS: Ticks = 160;

/// Crosswalk blink period, in ticks.
pub const BLINK_PERIOD_TICKS: Ticks = 16;

/// Last tick offset within the blink period with the indicator lit.
pub const BLINK_ON_TICKS: Ticks = 12;

/// The current phase of the signal controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Steady STOP color.
    Stop,
    /// Cross-fading STOP → GO.
    TransitionToGo,
    /// Steady GO color.
    Go,
    /// Cross-fading GO → WARNING.
    TransitionToWarning,
    /// Steady WARNING color.
    Warning,
    /// Cross-fading WARNING → STOP.
    TransitionToStop,
    /// Cross-fading from the live color toward CROSSWALK.
    TransitionToCrosswalk,
    /// Blinking crosswalk indicator.
    Crosswalk,
    /// Cross-fading CROSSWALK → GO.
    TransitionFromCrosswalk,
}

impl Phase {
    /// Diagnostic name of the phase.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Stop => "STOP",
            Phase::TransitionToGo => "TRANSITION_TO_GO",
            Phase::Go => "GO",
            Phase::TransitionToWarning => "TRANSITION_TO_WARNING",
            Phase::Warning => "WARNING",
            Phase::TransitionToStop => "TRANSITION_TO_STOP",
            Phase::TransitionToCrosswalk => "TRANSITION_TO_CROSSWALK",
            Phase::Crosswalk => "CROSSWALK",
            Phase::TransitionFromCrosswalk => "TRANSITION_FROM_CROSSWALK",
        }
    }
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drives a single RGB signal head through the traffic-light cycle.
///
/// The controller owns the lamp and the input sampler and borrows the shared
/// tick source. [`poll`](SignalController::poll) performs one iteration of
/// the control loop; [`run`](SignalController::run) loops it forever. Phase
/// changes happen on tick boundaries or elapsed-time thresholds, but the
/// lamp is refreshed on every iteration.
///
/// # Type Parameters
/// * `'c` - Lifetime of the tick source reference
/// * `C` - Tick source implementation type
/// * `L` - Lamp implementation type
/// * `P` - Crosswalk input implementation type
pub struct SignalController<'c, C: TickSource, L: SignalLamp, P: CrosswalkInput> {
    clock: &'c C,
    lamp: L,
    input: P,
    phase: Phase,
    dwell: Stopwatch,
    blend: Blend,
    color: Color,
}

impl<'c, C: TickSource, L: SignalLamp, P: CrosswalkInput> SignalController<'c, C, L, P> {
    /// Creates a controller in the STOP phase with the STOP color latched.
    ///
    /// The tick source, lamp, and input sampler must already be initialized;
    /// the first frame is snapped directly to the STOP color since no prior
    /// color exists yet.
    pub fn new(mut lamp: L, clock: &'c C, input: P) -> Self {
        let mut dwell = Stopwatch::new();
        dwell.reset(clock.ticks());
        lamp.set_color(STOP_COLOR);

        Self {
            clock,
            lamp,
            input,
            phase: Phase::Stop,
            dwell,
            blend: Blend::new(STOP_COLOR, GO_COLOR),
            color: STOP_COLOR,
        }
    }

    /// Runs the control loop forever.
    ///
    /// The loop is a tight poll with no blocking sleep; all waiting is
    /// expressed by re-checking elapsed ticks on the next iteration.
    pub fn run(&mut self) -> ! {
        loop {
            self.poll();
        }
    }

    /// Performs one iteration of the control loop.
    ///
    /// Checks the crosswalk window, evaluates the current phase's transition
    /// rule, and pushes the current color to the lamp. Exposed separately
    /// from [`run`](SignalController::run) so tests and cooperative
    /// schedulers can drive the loop step by step.
    pub fn poll(&mut self) {
        let now = self.clock.ticks();

        if self.clock.take_crosswalk_window() {
            // The sampler is queried (and the latch consumed) once per
            // window regardless of phase; requests are only acted on
            // outside the crosswalk phases.
            let requested = self.input.crosswalk_requested();
            if requested
                && self.phase != Phase::Crosswalk
                && self.phase != Phase::TransitionToCrosswalk
            {
                // Blend from the live color so mid-transition requests
                // fade from what is actually displayed.
                self.blend = Blend::new(self.color, CROSSWALK_COLOR);
                self.enter(Phase::TransitionToCrosswalk, now);
            }
        }

        let elapsed = self.dwell.elapsed(now);
        match self.phase {
            Phase::Stop => {
                if elapsed >= STOP_GO_TICKS {
                    self.blend = Blend::new(STOP_COLOR, GO_COLOR);
                    self.enter(Phase::TransitionToGo, now);
                } else {
                    self.color = STOP_COLOR;
                }
            }
            Phase::TransitionToGo => self.step_transition(elapsed, now, Phase::Go),
            Phase::Go => {
                if elapsed >= STOP_GO_TICKS {
                    self.blend = Blend::new(GO_COLOR, WARNING_COLOR);
                    self.enter(Phase::TransitionToWarning, now);
                } else {
                    self.color = GO_COLOR;
                }
            }
            Phase::TransitionToWarning => self.step_transition(elapsed, now, Phase::Warning),
            Phase::Warning => {
                if elapsed >= WARNING_TICKS {
                    self.blend = Blend::new(WARNING_COLOR, STOP_COLOR);
                    self.enter(Phase::TransitionToStop, now);
                } else {
                    self.color = WARNING_COLOR;
                }
            }
            Phase::TransitionToStop => self.step_transition(elapsed, now, Phase::Stop),
            Phase::TransitionToCrosswalk => self.step_transition(elapsed, now, Phase::Crosswalk),
            Phase::Crosswalk => {
                if elapsed >= CROSSWALK_TICKS {
                    // The fade back out always starts from the nominal
                    // crosswalk color, not the blink sub-state.
                    self.blend = Blend::new(CROSSWALK_COLOR, GO_COLOR);
                    self.enter(Phase::TransitionFromCrosswalk, now);
                } else if elapsed % BLINK_PERIOD_TICKS <= BLINK_ON_TICKS {
                    self.color = CROSSWALK_COLOR;
                } else {
                    self.color = COLOR_OFF;
                }
            }
            Phase::TransitionFromCrosswalk => self.step_transition(elapsed, now, Phase::Go),
        }

        self.lamp.set_color(self.color);
    }

    /// Advances an in-flight cross-fade or completes it.
    ///
    /// The exit branch wins when the elapsed threshold lands on the same
    /// tick boundary as a pending interpolation step: the final partial
    /// sample is skipped and the steady phase snaps to its target instead.
    fn step_transition(&mut self, elapsed: Ticks, now: Ticks, next: Phase) {
        if elapsed >= TRANSITION_TICKS {
            self.enter(next, now);
        } else if self.clock.take_quantum() {
            self.color = self.blend.sample();
            self.blend.advance();
        }
    }

    fn enter(&mut self, next: Phase, now: Ticks) {
        #[cfg(feature = "defmt")]
        defmt::info!("phase {} -> {} at tick {}", self.phase, next, now);
        self.dwell.reset(now);
        self.phase = next;
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the color currently displayed on the lamp.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns a reference to the lamp.
    pub fn lamp(&self) -> &L {
        &self.lamp
    }
}
