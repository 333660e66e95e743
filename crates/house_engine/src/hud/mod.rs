//! HUD commands
//!
//! Everything the player reads on screen leaves the core as a
//! [`HudCommand`]. The host draws them; the core only decides when.

use crate::puzzle::ComboLockView;

/// Full-screen overlays shown outside normal play
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenOverlay {
    /// Start screen while assets are still loading
    Loading(String),
    /// Start screen once assets are ready
    Start(String),
    /// Control instructions shown before play
    Instructions,
}

/// Outbound HUD command
#[derive(Debug, Clone, PartialEq)]
pub enum HudCommand {
    /// Show or hide the door prompt
    DoorPrompt(Option<String>),
    /// Show or hide the item prompt
    ItemPrompt(Option<String>),
    /// Show an inspection image, or hide the overlay
    Inspection(Option<String>),
    /// Show the combination lock with its digits, or hide it
    ComboLock(Option<ComboLockView>),
    /// Show or hide the lock's control hints
    ComboInstructions(Option<String>),
    /// Transient dialogue line
    Dialogue(String),
    /// Current inventory, in pickup order
    Inventory(Vec<String>),
    /// Show a full-screen overlay, or return to the game view
    Screen(Option<ScreenOverlay>),
    /// White fade opacity in `[0, 1]`
    Fade(f32),
}

/// Last prompt text sent per prompt slot
///
/// Prompts are re-evaluated every tick; the cache turns that into a command
/// only when the visible text actually changes.
#[derive(Debug, Default)]
pub struct PromptCache {
    door: Option<String>,
    item: Option<String>,
}

impl PromptCache {
    /// Create a cache with both prompts hidden
    pub fn new() -> Self {
        Self::default()
    }

    /// Desired door prompt this tick
    pub fn door(&mut self, text: Option<&str>) -> Option<HudCommand> {
        Self::update(&mut self.door, text).map(HudCommand::DoorPrompt)
    }

    /// Desired item prompt this tick
    pub fn item(&mut self, text: Option<&str>) -> Option<HudCommand> {
        Self::update(&mut self.item, text).map(HudCommand::ItemPrompt)
    }

    /// Door prompt currently visible
    pub fn door_text(&self) -> Option<&str> {
        self.door.as_deref()
    }

    /// Item prompt currently visible
    pub fn item_text(&self) -> Option<&str> {
        self.item.as_deref()
    }

    fn update(slot: &mut Option<String>, text: Option<&str>) -> Option<Option<String>> {
        if slot.as_deref() == text {
            return None;
        }
        *slot = text.map(str::to_string);
        Some(slot.clone())
    }
}
