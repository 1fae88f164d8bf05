//! Signal-head color catalog and the per-tick linear color interpolator.
//!
//! Colors are 8-bit RGB triplets (`palette::Srgb<u8>`), one steady-state
//! target per logical phase. During a phase transition the displayed color is
//! a [`Blend`] that advances by a fixed fraction once per tick.

use palette::Srgb;

/// RGB triplet pushed to the signal head, one byte per channel.
pub type Color = Srgb<u8>;

/// All channels off (crosswalk blink dark period).
pub const COLOR_OFF: Color = Srgb::new(0, 0, 0);

/// Steady color for the STOP phase.
pub const STOP_COLOR: Color = Srgb::new(0x61, 0x1E, 0x3C);

/// Steady color for the GO phase.
pub const GO_COLOR: Color = Srgb::new(0x22, 0x96, 0x22);

/// Steady color for the WARNING phase.
pub const WARNING_COLOR: Color = Srgb::new(0xFF, 0xB2, 0x00);

/// Steady color for the CROSSWALK phase (blink bright period).
pub const CROSSWALK_COLOR: Color = Srgb::new(0x00, 0x10, 0x30);

/// Number of interpolation steps spanning one transition.
///
/// Coupled to the one-second transition duration through the 16-ticks-per-
/// second quantum: one step per tick.
pub const TICKS_PER_TRANSITION: u16 = 16;

/// Fraction of the from→to distance covered by one step (1/16).
const STEP_FRACTION: f32 = 0.0625;

/// One channel of the linear blend, truncated toward zero.
///
/// Integer-conversion truncation is deliberate: frame-accurate parity with
/// the reference controller requires truncation, not round-to-nearest.
fn mix_channel(from: u8, to: u8, fraction: f32) -> u8 {
    ((f32::from(to) - f32::from(from)) * fraction + f32::from(from)) as u8
}

/// Transition context: a from/to color pair plus the progress step counter.
///
/// Created fresh at the instant a transition begins (step 0) and discarded
/// when the transition's phase completes. [`sample`](Blend::sample) at step 0
/// returns the from-color exactly; the blend never clamps to the to-color —
/// the state machine snaps there by changing phase, not by clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blend {
    from: Color,
    to: Color,
    step: u16,
}

impl Blend {
    /// Starts a new blend at progress step 0.
    pub const fn new(from: Color, to: Color) -> Self {
        Self { from, to, step: 0 }
    }

    /// Color at the current progress step.
    ///
    /// Each channel advances independently and monotonically toward the
    /// to-color as the step count grows.
    pub fn sample(&self) -> Color {
        let fraction = STEP_FRACTION * f32::from(self.step);
        Srgb::new(
            mix_channel(self.from.red, self.to.red, fraction),
            mix_channel(self.from.green, self.to.green, fraction),
            mix_channel(self.from.blue, self.to.blue, fraction),
        )
    }

    /// Consumes one tick of progress.
    pub fn advance(&mut self) {
        self.step = self.step.saturating_add(1);
    }

    /// Progress steps consumed since the transition began.
    pub fn step(&self) -> u16 {
        self.step
    }

    /// The color this blend started from.
    pub fn from_color(&self) -> Color {
        self.from
    }
}
