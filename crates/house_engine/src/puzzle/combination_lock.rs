//! Three-wheel combination lock
//!
//! While the lock overlay is open it owns directional input: left/right
//! turn the active wheel, up/down pick the wheel, confirm submits and
//! cancel backs out.

use crate::input::{Actions, InputState};

/// Number of wheels
pub const SLOT_COUNT: usize = 3;

/// A single lock input, already decoded from held actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockInput {
    /// Turn the active wheel down
    Decrement,
    /// Turn the active wheel up
    Increment,
    /// Select the previous wheel
    SlotUp,
    /// Select the next wheel
    SlotDown,
    /// Try the current code
    Submit,
    /// Close without trying
    Cancel,
}

impl LockInput {
    /// Decode and consume at most one lock input from `input`
    ///
    /// Cancel and submit take precedence over wheel movement.
    pub fn poll(input: &mut InputState) -> Option<Self> {
        const ORDER: [(Actions, LockInput); 6] = [
            (Actions::CANCEL, LockInput::Cancel),
            (Actions::CONFIRM, LockInput::Submit),
            (Actions::STRAFE_LEFT, LockInput::Decrement),
            (Actions::STRAFE_RIGHT, LockInput::Increment),
            (Actions::FORWARD, LockInput::SlotUp),
            (Actions::BACKWARD, LockInput::SlotDown),
        ];
        ORDER
            .iter()
            .find(|(action, _)| input.is_held(*action))
            .map(|(action, lock_input)| {
                input.consume(*action);
                *lock_input
            })
    }
}

/// Result of feeding one input to the lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOutcome {
    /// Digits or selection changed; the overlay stays open
    Updated,
    /// The code matched; the overlay closes
    Unlocked,
    /// The code did not match; the overlay stays open
    Rejected,
    /// The player backed out
    Cancelled,
}

/// Snapshot handed to the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboLockView {
    /// Wheel values
    pub digits: [u8; SLOT_COUNT],
    /// Highlighted wheel
    pub active_slot: usize,
}

/// Lock state, created fresh each time the overlay opens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComboLock {
    active_slot: usize,
    digits: [u8; SLOT_COUNT],
}

impl ComboLock {
    /// All wheels at zero, first wheel selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn the active wheel up, wrapping 9 to 0
    pub fn increment(&mut self) {
        let digit = &mut self.digits[self.active_slot];
        *digit = (*digit + 1) % 10;
    }

    /// Turn the active wheel down, wrapping 0 to 9
    pub fn decrement(&mut self) {
        let digit = &mut self.digits[self.active_slot];
        *digit = (*digit + 9) % 10;
    }

    /// Select the previous wheel, wrapping to the last
    pub fn slot_up(&mut self) {
        self.active_slot = (self.active_slot + SLOT_COUNT - 1) % SLOT_COUNT;
    }

    /// Select the next wheel, wrapping to the first
    pub fn slot_down(&mut self) {
        self.active_slot = (self.active_slot + 1) % SLOT_COUNT;
    }

    /// Current code as a string of digits
    pub fn code(&self) -> String {
        self.digits.iter().map(|d| char::from(b'0' + d)).collect()
    }

    /// Whether the current code equals `secret`
    pub fn matches(&self, secret: &str) -> bool {
        self.code() == secret
    }

    /// Apply one input
    pub fn handle(&mut self, input: LockInput, secret: &str) -> LockOutcome {
        match input {
            LockInput::Decrement => self.decrement(),
            LockInput::Increment => self.increment(),
            LockInput::SlotUp => self.slot_up(),
            LockInput::SlotDown => self.slot_down(),
            LockInput::Submit => {
                return if self.matches(secret) {
                    LockOutcome::Unlocked
                } else {
                    LockOutcome::Rejected
                };
            }
            LockInput::Cancel => return LockOutcome::Cancelled,
        }
        LockOutcome::Updated
    }

    /// Snapshot for display
    pub fn view(&self) -> ComboLockView {
        ComboLockView { digits: self.digits, active_slot: self.active_slot }
    }

    /// Wheel values
    pub fn digits(&self) -> [u8; SLOT_COUNT] {
        self.digits
    }

    /// Highlighted wheel
    pub fn active_slot(&self) -> usize {
        self.active_slot
    }
}
