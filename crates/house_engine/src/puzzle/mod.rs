//! Puzzles gating progress

pub mod combination_lock;

pub use combination_lock::{ComboLock, ComboLockView, LockInput, LockOutcome, SLOT_COUNT};
