//! Pickup, give and one-shot triggers

use super::{resolve, Inventory};
use crate::audio::SoundEffect;
use crate::config::{TriggerConfig, TriggerKind};
use crate::foundation::math::Vec3;
use crate::input::{Actions, InputState};
use crate::scene::{NodeId, SceneGraph};
use crate::world::{ProximityTrigger, Region};

/// Result of evaluating an interaction trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Target absent, out of range, ineligible or spent
    Idle,
    /// Show this prompt
    Prompt(String),
    /// The item went into the inventory and its node was despawned
    PickedUp(String),
    /// One instance of the item left the inventory
    Given {
        /// Item handed over
        item: String,
        /// Receiver node and clip to animate, if any
        animation: Option<(String, String)>,
    },
    /// A one-shot prop fired
    Fired {
        /// Cue to play
        effect: SoundEffect,
        /// Target node and clip to animate, if any
        animation: Option<(String, String)>,
    },
}

/// Proximity-gated interaction with a named node
#[derive(Debug, Clone)]
pub struct InteractionTrigger {
    config: TriggerConfig,
    trigger: ProximityTrigger,
    node: Option<NodeId>,
    spent: bool,
}

impl InteractionTrigger {
    /// Create a trigger from config
    pub fn new(config: TriggerConfig) -> Self {
        let trigger = ProximityTrigger::new(config.radius);
        Self { config, trigger, node: None, spent: false }
    }

    /// Whether the trigger can never fire again
    pub fn is_spent(&self) -> bool {
        self.spent
    }

    /// Re-arm after `region` was built
    ///
    /// One-shot props fire again on every visit. A pickup that was already
    /// collected has its respawned node removed; returns true when that
    /// happened so the caller can drop stale volumes.
    pub fn rearm(&mut self, region: Region, scene: &mut SceneGraph) -> bool {
        self.node = None;
        match &self.config.kind {
            TriggerKind::OneShot { .. } => {
                self.spent = false;
                false
            }
            TriggerKind::Pickup { item } if self.spent => {
                let mut removed = false;
                while let Some(node) = scene.find_in_region(region, &self.config.target) {
                    scene.despawn_subtree(node);
                    removed = true;
                }
                if removed {
                    log::debug!("{item} already collected; removed from {region}");
                }
                removed
            }
            TriggerKind::Pickup { .. } | TriggerKind::Give { .. } => false,
        }
    }

    fn eligible(&self, inventory: &Inventory) -> bool {
        match &self.config.kind {
            TriggerKind::Give { item, .. } => inventory.contains(item),
            TriggerKind::Pickup { .. } | TriggerKind::OneShot { .. } => true,
        }
    }

    /// Evaluate for this tick
    pub fn evaluate(
        &mut self,
        player: Vec3,
        input: &mut InputState,
        scene: &mut SceneGraph,
        inventory: &mut Inventory,
    ) -> TriggerOutcome {
        if self.spent || !self.eligible(inventory) {
            return TriggerOutcome::Idle;
        }
        let Some(node) = resolve(&mut self.node, &self.config.target, scene) else {
            return TriggerOutcome::Idle;
        };
        let Some(position) = scene.world_position(node) else {
            return TriggerOutcome::Idle;
        };
        if !self.trigger.contains(&player, &position) {
            return TriggerOutcome::Idle;
        }
        if !input.consume(Actions::CONFIRM) {
            return TriggerOutcome::Prompt(self.config.prompt.clone());
        }

        match &self.config.kind {
            TriggerKind::Pickup { item } => {
                inventory.add(item.clone());
                scene.despawn_subtree(node);
                self.node = None;
                self.spent = true;
                log::info!("Picked up {item}");
                TriggerOutcome::PickedUp(item.clone())
            }
            TriggerKind::Give { item, animation } => {
                inventory.remove(item);
                log::info!("Gave {item} to {}", self.config.target);
                TriggerOutcome::Given {
                    item: item.clone(),
                    animation: animation.as_ref().map(|clip| (self.config.target.clone(), clip.clone())),
                }
            }
            TriggerKind::OneShot { effect, animation } => {
                self.spent = true;
                log::debug!("{} fired", self.config.target);
                TriggerOutcome::Fired {
                    effect: *effect,
                    animation: animation.as_ref().map(|clip| (self.config.target.clone(), clip.clone())),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger(target: &str, kind: TriggerKind) -> InteractionTrigger {
        InteractionTrigger::new(TriggerConfig {
            target: target.to_string(),
            radius: 2.0,
            prompt: format!("Use {target}"),
            kind,
        })
    }

    #[test]
    fn test_pickup_then_give() {
        let mut scene = SceneGraph::new();
        let ball = scene.spawn_root("ball", Region::Interior, Vec3::new(1.0, 0.0, 0.0));
        scene.spawn_root("torus", Region::Interior, Vec3::new(-1.0, 0.0, 0.0));
        let mut inventory = Inventory::new();
        let mut input = InputState::new();

        let mut pickup = trigger("ball", TriggerKind::Pickup { item: "ball".to_string() });
        let mut give = trigger(
            "torus",
            TriggerKind::Give { item: "ball".to_string(), animation: Some("receiveBall".to_string()) },
        );

        // Nothing to give yet
        input.press(Actions::CONFIRM);
        assert_eq!(give.evaluate(Vec3::zeros(), &mut input, &mut scene, &mut inventory), TriggerOutcome::Idle);
        assert!(input.is_held(Actions::CONFIRM));

        assert_eq!(
            pickup.evaluate(Vec3::zeros(), &mut input, &mut scene, &mut inventory),
            TriggerOutcome::PickedUp("ball".to_string())
        );
        assert!(!scene.contains(ball));
        assert!(pickup.is_spent());
        assert_eq!(inventory.items(), ["ball"]);

        assert_eq!(
            give.evaluate(Vec3::zeros(), &mut input, &mut scene, &mut inventory),
            TriggerOutcome::Prompt("Use torus".to_string())
        );
        input.press(Actions::CONFIRM);
        assert_eq!(
            give.evaluate(Vec3::zeros(), &mut input, &mut scene, &mut inventory),
            TriggerOutcome::Given {
                item: "ball".to_string(),
                animation: Some(("torus".to_string(), "receiveBall".to_string())),
            }
        );
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_give_without_item_does_nothing() {
        let mut scene = SceneGraph::new();
        scene.spawn_root("torus", Region::Interior, Vec3::zeros());
        let mut inventory = Inventory::new();
        inventory.add("key");
        let mut input = InputState::new();
        input.press(Actions::CONFIRM);

        let mut give = trigger("torus", TriggerKind::Give { item: "ball".to_string(), animation: None });
        assert_eq!(give.evaluate(Vec3::zeros(), &mut input, &mut scene, &mut inventory), TriggerOutcome::Idle);
        assert_eq!(inventory.items(), ["key"]);
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut scene = SceneGraph::new();
        scene.spawn_root("sink-water", Region::Interior, Vec3::zeros());
        let mut inventory = Inventory::new();
        let mut input = InputState::new();
        let mut sink = trigger(
            "sink-water",
            TriggerKind::OneShot { effect: SoundEffect::SinkOff, animation: Some("water-drain".to_string()) },
        );

        input.press(Actions::CONFIRM);
        assert_eq!(
            sink.evaluate(Vec3::zeros(), &mut input, &mut scene, &mut inventory),
            TriggerOutcome::Fired {
                effect: SoundEffect::SinkOff,
                animation: Some(("sink-water".to_string(), "water-drain".to_string())),
            }
        );
        input.press(Actions::CONFIRM);
        assert_eq!(sink.evaluate(Vec3::zeros(), &mut input, &mut scene, &mut inventory), TriggerOutcome::Idle);
    }

    #[test]
    fn test_one_shot_rearms_on_region_rebuild() {
        let mut scene = SceneGraph::new();
        scene.spawn_root("sink-water", Region::Interior, Vec3::zeros());
        let mut inventory = Inventory::new();
        let mut input = InputState::new();
        let mut sink =
            trigger("sink-water", TriggerKind::OneShot { effect: SoundEffect::SinkOff, animation: None });

        input.press(Actions::CONFIRM);
        assert!(matches!(sink.evaluate(Vec3::zeros(), &mut input, &mut scene, &mut inventory), TriggerOutcome::Fired { .. }));
        assert!(sink.is_spent());

        scene.despawn_region(Region::Interior);
        scene.spawn_root("sink-water", Region::Interior, Vec3::zeros());
        assert!(!sink.rearm(Region::Interior, &mut scene));
        assert!(!sink.is_spent());

        assert_eq!(
            sink.evaluate(Vec3::zeros(), &mut input, &mut scene, &mut inventory),
            TriggerOutcome::Prompt("Use sink-water".to_string())
        );
        input.press(Actions::CONFIRM);
        assert!(matches!(sink.evaluate(Vec3::zeros(), &mut input, &mut scene, &mut inventory), TriggerOutcome::Fired { .. }));
    }

    #[test]
    fn test_collected_pickup_removed_on_rebuild() {
        let mut scene = SceneGraph::new();
        scene.spawn_root("ball", Region::Interior, Vec3::zeros());
        let mut inventory = Inventory::new();
        let mut input = InputState::new();
        let mut pickup = trigger("ball", TriggerKind::Pickup { item: "ball".to_string() });

        input.press(Actions::CONFIRM);
        pickup.evaluate(Vec3::zeros(), &mut input, &mut scene, &mut inventory);
        assert_eq!(inventory.len(), 1);

        scene.despawn_region(Region::Interior);
        scene.spawn_root("ball", Region::Interior, Vec3::zeros());
        assert!(pickup.rearm(Region::Interior, &mut scene));
        assert!(scene.find_by_name("ball").is_none());

        input.press(Actions::CONFIRM);
        assert_eq!(pickup.evaluate(Vec3::zeros(), &mut input, &mut scene, &mut inventory), TriggerOutcome::Idle);
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_uncollected_pickup_survives_rebuild() {
        let mut scene = SceneGraph::new();
        scene.spawn_root("ball", Region::Interior, Vec3::zeros());
        let mut pickup = trigger("ball", TriggerKind::Pickup { item: "ball".to_string() });

        assert!(!pickup.rearm(Region::Interior, &mut scene));
        assert!(scene.find_by_name("ball").is_some());
    }
}
