//! Event bus
//!
//! - Handler returns bool (true = consumed, stops forwarding)
//! - Registration per event kind (only interested handlers are notified)
//! - Queuing support (immediate + deferred delivery, deferred cancellation)
//!
//! Every dispatched event is also returned to the caller, so a host can
//! either register handlers or simply drain the tick's output.

use std::collections::HashMap;

use crate::audio::AudioCue;
use crate::hud::HudCommand;
use crate::world::Region;

/// Event category used for handler registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// HUD commands
    Hud,
    /// Audio intents
    Audio,
    /// Gameplay milestones
    Gameplay,
}

/// Outbound event
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Something to draw
    Hud(HudCommand),
    /// Something to hear
    Audio(AudioCue),
    /// The combination lock accepted the code
    DoorUnlocked,
    /// A region finished loading and the player stands in it
    RegionEntered(Region),
    /// Start a named animation clip on a scene node
    PlayAnimation {
        /// Node name
        target: String,
        /// Clip name
        clip: String,
    },
    /// The session is over and the host should restart it
    SessionEnded,
}

impl GameEvent {
    /// Category used for handler lookup
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Hud(_) => EventKind::Hud,
            Self::Audio(_) => EventKind::Audio,
            Self::DoorUnlocked
            | Self::RegionEntered(_)
            | Self::PlayAnimation { .. }
            | Self::SessionEnded => EventKind::Gameplay,
        }
    }
}

impl From<HudCommand> for GameEvent {
    fn from(command: HudCommand) -> Self {
        Self::Hud(command)
    }
}

impl From<AudioCue> for GameEvent {
    fn from(cue: AudioCue) -> Self {
        Self::Audio(cue)
    }
}

/// Event handler trait
/// Returns true if event was consumed (stops forwarding)
pub trait EventHandler {
    /// Handle an event, return true if consumed
    fn on_event(&mut self, event: &GameEvent) -> bool;
}

/// Event bus with registration and queuing
pub struct EventBus {
    immediate_queue: Vec<GameEvent>,
    deferred_queue: Vec<(f64, GameEvent)>,
    handlers: HashMap<EventKind, Vec<Box<dyn EventHandler>>>,
    current_time: f64,
}

impl EventBus {
    /// Create a new empty event bus
    pub fn new() -> Self {
        Self {
            immediate_queue: Vec::new(),
            deferred_queue: Vec::new(),
            handlers: HashMap::new(),
            current_time: 0.0,
        }
    }

    /// Update current time (seconds since session start)
    pub fn update_time(&mut self, time: f64) {
        self.current_time = time;
    }

    /// Register a handler for a specific event kind
    pub fn register_handler(&mut self, kind: EventKind, handler: Box<dyn EventHandler>) {
        self.handlers.entry(kind).or_default().push(handler);
    }

    /// Send event for delivery at the next dispatch
    pub fn send(&mut self, event: impl Into<GameEvent>) {
        self.immediate_queue.push(event.into());
    }

    /// Post event for deferred delivery at the given session time
    pub fn post(&mut self, delivery_time: f64, event: impl Into<GameEvent>) {
        self.deferred_queue.push((delivery_time, event.into()));
    }

    /// Drop deferred events matching `predicate`, returning how many were dropped
    pub fn cancel_deferred(&mut self, predicate: impl Fn(&GameEvent) -> bool) -> usize {
        let before = self.deferred_queue.len();
        self.deferred_queue.retain(|(_, event)| !predicate(event));
        before - self.deferred_queue.len()
    }

    /// Number of deferred events not yet due
    pub fn pending_deferred(&self) -> usize {
        self.deferred_queue.len()
    }

    /// Dispatch all pending events
    ///
    /// Processes the immediate queue first, then due deferred events in the
    /// order they were posted. Returns everything dispatched.
    pub fn dispatch(&mut self) -> Vec<GameEvent> {
        let mut delivered = std::mem::take(&mut self.immediate_queue);

        let mut i = 0;
        while i < self.deferred_queue.len() {
            if self.deferred_queue[i].0 <= self.current_time {
                let (_, event) = self.deferred_queue.remove(i);
                delivered.push(event);
            } else {
                i += 1;
            }
        }

        for event in &delivered {
            self.dispatch_event(event);
        }
        delivered
    }

    /// Stops on first handler that returns true (consumed)
    fn dispatch_event(&mut self, event: &GameEvent) {
        if let Some(handlers) = self.handlers.get_mut(&event.kind()) {
            for handler in handlers.iter_mut() {
                if handler.on_event(event) {
                    break;
                }
            }
        }
    }

    /// Clear all queued events (handlers stay registered)
    pub fn clear(&mut self) {
        self.immediate_queue.clear();
        self.deferred_queue.clear();
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
