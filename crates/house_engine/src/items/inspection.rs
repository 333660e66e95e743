//! Inspectable objects

use super::resolve;
use crate::audio::SoundEffect;
use crate::config::InspectorConfig;
use crate::foundation::math::Vec3;
use crate::input::{Actions, InputState};
use crate::scene::{NodeId, SceneGraph};
use crate::world::ProximityTrigger;

/// Result of evaluating an inspector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectOutcome {
    /// Target absent or out of range
    Idle,
    /// Show this prompt
    Prompt(String),
    /// Inspection began; show the image
    Started {
        /// Overlay image
        image: String,
        /// Cue to play
        sound: Option<SoundEffect>,
        /// Prompt to show while inspecting
        prompt: String,
    },
    /// Inspection ended; hide the overlay
    Exited,
}

/// Shows an overlay image for a nearby object
#[derive(Debug, Clone)]
pub struct ItemInspector {
    config: InspectorConfig,
    trigger: ProximityTrigger,
    node: Option<NodeId>,
    inspecting: bool,
}

impl ItemInspector {
    /// Create an inspector from config
    pub fn new(config: InspectorConfig) -> Self {
        let trigger = ProximityTrigger::new(config.radius);
        Self { config, trigger, node: None, inspecting: false }
    }

    /// Whether the overlay is showing
    pub fn is_inspecting(&self) -> bool {
        self.inspecting
    }

    /// Target node name
    pub fn target(&self) -> &str {
        &self.config.target
    }

    /// Evaluate for this tick
    ///
    /// While inspecting only confirm matters: it closes the overlay.
    pub fn evaluate(&mut self, player: Vec3, input: &mut InputState, scene: &SceneGraph) -> InspectOutcome {
        if self.inspecting {
            if input.consume(Actions::CONFIRM) {
                self.inspecting = false;
                return InspectOutcome::Exited;
            }
            return InspectOutcome::Prompt(self.config.prompt_exit.clone());
        }

        let Some(node) = resolve(&mut self.node, &self.config.target, scene) else {
            return InspectOutcome::Idle;
        };
        let Some(position) = scene.world_position(node) else {
            return InspectOutcome::Idle;
        };
        if !self.trigger.contains(&player, &position) {
            return InspectOutcome::Idle;
        }

        if input.consume(Actions::CONFIRM) {
            self.inspecting = true;
            log::debug!("Inspecting {}", self.config.target);
            return InspectOutcome::Started {
                image: self.config.image.clone(),
                sound: self.config.sound,
                prompt: self.config.prompt_exit.clone(),
            };
        }
        InspectOutcome::Prompt(self.config.prompt_inspect.clone())
    }

    /// Close the overlay without input (region change)
    pub fn reset(&mut self) {
        self.inspecting = false;
        self.node = None;
    }
}
