//! The player camera and its movement

pub mod movement;

pub use movement::{MoveOutcome, MovementController, Player};
