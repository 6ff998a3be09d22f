//! Animation primitives for Spinwheel.
//!
//! Animations here are plain records advanced by the host's frame loop; no
//! timers or callbacks are registered anywhere.

mod easing;
mod settle;

pub use easing::*;
pub use settle::*;
