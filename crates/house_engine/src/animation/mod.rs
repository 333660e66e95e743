//! Time-driven animation
//!
//! Scalar tweens evaluated against the session clock. The door swing and
//! the closing fade are both [`TimedTransition`]s.

pub mod tween;

pub use tween::{Easing, TimedTransition};
