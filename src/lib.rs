#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`SignalController`**: The control-loop state machine over the signal phases
//! - **`Phase`**: The current phase (STOP/GO/WARNING, their cross-fades, CROSSWALK)
//! - **`Blend`**: Transition context performing the per-tick linear color interpolation
//! - **`SignalLamp`**: Trait to implement for your RGB output hardware
//! - **`TickSource`** / **`TickClock`**: The periodic tick abstraction and its
//!   interrupt-safe implementation
//! - **`Stopwatch`**: Relative elapsed-tick measurement used for phase dwell times
//! - **`CrosswalkInput`** / **`CrosswalkSampler`** / **`RequestLatch`** /
//!   **`TouchSensor`**: The crosswalk request path
//!
//! Colors are `palette::Srgb<u8>` triplets (0-255 per channel). When implementing
//! [`SignalLamp`] for your hardware, map these values to your device's duty-cycle
//! scale.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod clock;
pub mod colors;
pub mod controller;
pub mod input;
pub mod time;

pub use clock::TickClock;
pub use colors::{
    Blend, COLOR_OFF, CROSSWALK_COLOR, Color, GO_COLOR, STOP_COLOR, TICKS_PER_TRANSITION,
    WARNING_COLOR,
};
pub use controller::{
    BLINK_ON_TICKS, BLINK_PERIOD_TICKS, CROSSWALK_TICKS, Phase, STOP_GO_TICKS, SignalController,
    SignalLamp, TRANSITION_TICKS, WARNING_TICKS,
};
pub use input::{
    CrosswalkInput, CrosswalkSampler, RequestLatch, TOUCH_PRESSED_THRESHOLD, TouchSensor,
};
pub use time::{Stopwatch, TICK_PERIOD_MICROS, TICKS_PER_SECOND, TickSource, Ticks};
