//! Input state
//!
//! Semantic actions rather than raw keys. The host maps its key events
//! through [`InputState::handle_key`] (or sets actions directly); the core
//! reads held flags each tick and consumes one-shot actions such as
//! confirm so a held key fires once.

use bitflags::bitflags;

bitflags! {
    /// Set of held semantic actions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Actions: u16 {
        /// Move along the camera's forward vector
        const FORWARD = 1 << 0;
        /// Move against the camera's forward vector
        const BACKWARD = 1 << 1;
        /// Move along the camera's left vector
        const STRAFE_LEFT = 1 << 2;
        /// Move against the camera's left vector
        const STRAFE_RIGHT = 1 << 3;
        /// Rotate the camera left
        const TURN_LEFT = 1 << 4;
        /// Rotate the camera right
        const TURN_RIGHT = 1 << 5;
        /// Interact / submit
        const CONFIRM = 1 << 6;
        /// Back out of a modal overlay
        const CANCEL = 1 << 7;

        /// Any translation
        const MOVEMENT = Self::FORWARD.bits()
            | Self::BACKWARD.bits()
            | Self::STRAFE_LEFT.bits()
            | Self::STRAFE_RIGHT.bits();
    }
}

/// Key codes the default binding understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// Q key
    Q,
    /// E key
    E,
    /// Space bar
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

impl KeyCode {
    /// Action a key maps to under the default binding
    pub fn action(self) -> Actions {
        match self {
            Self::W | Self::Up => Actions::FORWARD,
            Self::S | Self::Down => Actions::BACKWARD,
            Self::A | Self::Left => Actions::STRAFE_LEFT,
            Self::D | Self::Right => Actions::STRAFE_RIGHT,
            Self::Q => Actions::TURN_LEFT,
            Self::E => Actions::TURN_RIGHT,
            Self::Space | Self::Enter => Actions::CONFIRM,
            Self::Escape => Actions::CANCEL,
        }
    }
}

/// Held-action flags shared between the host and the core
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    held: Actions,
}

impl InputState {
    /// Create an input state with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark actions as held
    pub fn press(&mut self, actions: Actions) {
        self.held.insert(actions);
    }

    /// Mark actions as released
    pub fn release(&mut self, actions: Actions) {
        self.held.remove(actions);
    }

    /// Set actions held or released
    pub fn set(&mut self, actions: Actions, held: bool) {
        self.held.set(actions, held);
    }

    /// Feed a raw key event through the default binding
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        self.set(key.action(), pressed);
    }

    /// Whether every action in `actions` is held
    pub fn is_held(&self, actions: Actions) -> bool {
        self.held.contains(actions)
    }

    /// Whether any action in `actions` is held
    pub fn any_held(&self, actions: Actions) -> bool {
        self.held.intersects(actions)
    }

    /// Read and clear a one-shot action
    ///
    /// Returns true if the action was held; it then counts as released
    /// until the host presses it again.
    pub fn consume(&mut self, action: Actions) -> bool {
        let held = self.held.contains(action);
        self.held.remove(action);
        held
    }

    /// Everything currently held
    pub fn held(&self) -> Actions {
        self.held
    }

    /// Release everything
    pub fn clear(&mut self) {
        self.held = Actions::empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_fires_once() {
        let mut input = InputState::new();
        input.handle_key(KeyCode::Space, true);
        assert!(input.consume(Actions::CONFIRM));
        assert!(!input.consume(Actions::CONFIRM));
    }

    #[test]
    fn test_movement_composite() {
        let mut input = InputState::new();
        assert!(!input.any_held(Actions::MOVEMENT));
        input.handle_key(KeyCode::A, true);
        assert!(input.any_held(Actions::MOVEMENT));
        assert!(input.is_held(Actions::STRAFE_LEFT));
        input.handle_key(KeyCode::Left, false);
        assert!(!input.any_held(Actions::MOVEMENT));
    }

    #[test]
    fn test_turning_is_not_movement() {
        let mut input = InputState::new();
        input.handle_key(KeyCode::Q, true);
        assert!(!input.any_held(Actions::MOVEMENT));
        assert!(input.is_held(Actions::TURN_LEFT));
    }
}
