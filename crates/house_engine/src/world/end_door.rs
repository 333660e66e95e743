//! The corridor's end door and the closing sequence
//!
//! Turning around in the corridor makes a door appear a few steps behind
//! the player. Turning back before using it makes it vanish again.

use crate::animation::{Easing, TimedTransition};
use crate::assets::{AssetError, AssetSource, LoadCompletion, LoadTicket};
use crate::config::{CollidableNaming, CorridorConfig};
use crate::foundation::math::{corridor_forward, Vec3};
use crate::player::Player;
use crate::scene::{NodeId, SceneGraph};
use crate::world::{CorridorRecycler, Region};

/// Lifecycle of the end door
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EndDoorState {
    /// Not spawned
    Absent,
    /// Requested, to be spawned at the stored position
    Loading {
        /// Pending request
        ticket: LoadTicket,
        /// Where it will appear
        position: Vec3,
    },
    /// Spawned and usable
    Present(NodeId),
}

/// Watches the player's facing in the corridor
#[derive(Debug)]
pub struct EndDoor {
    state: EndDoorState,
}

impl Default for EndDoor {
    fn default() -> Self {
        Self::new()
    }
}

impl EndDoor {
    /// No door yet
    pub fn new() -> Self {
        Self { state: EndDoorState::Absent }
    }

    /// Current state
    pub fn state(&self) -> EndDoorState {
        self.state
    }

    /// Spawned door node, if any
    pub fn node(&self) -> Option<NodeId> {
        match self.state {
            EndDoorState::Present(node) => Some(node),
            _ => None,
        }
    }

    /// Whether `ticket` is this door's pending load
    pub fn owns(&self, ticket: LoadTicket) -> bool {
        matches!(self.state, EndDoorState::Loading { ticket: pending, .. } if pending == ticket)
    }

    /// Whether the player is looking back along the corridor
    pub fn facing_back(player: &Player) -> bool {
        player.forward().dot(&corridor_forward()) < 0.0
    }

    /// Spawn or remove the door according to the player's facing
    pub fn update(
        &mut self,
        player: &Player,
        corridor: &CorridorRecycler,
        assets: &mut dyn AssetSource,
        config: &CorridorConfig,
        scene: &mut SceneGraph,
    ) {
        let facing_back = Self::facing_back(player);
        match self.state {
            EndDoorState::Absent if facing_back => {
                let z = (player.position.z + config.door_distance).min(corridor.front().z);
                let position = Vec3::new(config.door_x, config.door_y, z);
                let ticket = assets.request(&config.door_asset);
                log::debug!("Requesting end door at z={z:.3}");
                self.state = EndDoorState::Loading { ticket, position };
            }
            EndDoorState::Loading { .. } if !facing_back => {
                // The completion will arrive with a ticket nobody owns
                self.state = EndDoorState::Absent;
            }
            EndDoorState::Present(node) if !facing_back => {
                scene.despawn_subtree(node);
                self.state = EndDoorState::Absent;
                log::debug!("End door removed");
            }
            _ => {}
        }
    }

    /// Spawn the door from a finished load
    ///
    /// Returns Ok(true) when the door is now present.
    pub fn complete(
        &mut self,
        completion: LoadCompletion,
        scene: &mut SceneGraph,
        naming: &CollidableNaming,
    ) -> Result<bool, AssetError> {
        let EndDoorState::Loading { ticket, position } = self.state else {
            return Ok(false);
        };
        if ticket != completion.ticket {
            return Ok(false);
        }

        self.state = EndDoorState::Absent;
        let asset = completion.result?;
        let instance = asset.instantiate(scene, Region::Corridor, position, naming)?;
        self.state = EndDoorState::Present(instance.root);
        log::info!("End door appeared at z={:.3}", position.z);
        Ok(true)
    }

    /// Forget the door without touching the scene (region teardown)
    pub fn reset(&mut self) {
        self.state = EndDoorState::Absent;
    }
}

/// Door swing followed by a white fade
#[derive(Debug, Clone)]
pub struct EndSequence {
    door: NodeId,
    swing: TimedTransition,
    fade: TimedTransition,
    ends_at: f64,
}

impl EndSequence {
    /// Start the sequence at `now`
    pub fn start(now: f64, door: NodeId, scene: &SceneGraph, config: &CorridorConfig) -> Self {
        let closed = scene.get(door).map_or(0.0, |node| node.yaw);
        let swing = TimedTransition::new(
            now,
            config.swing_secs,
            closed,
            closed + config.swing_angle,
            Easing::Linear,
        );
        let fade = TimedTransition::new(
            now + f64::from(config.swing_secs),
            config.fade_secs,
            0.0,
            1.0,
            Easing::EaseInOut,
        );
        Self {
            door,
            swing,
            fade,
            ends_at: now + f64::from(config.end_after_secs),
        }
    }

    /// Advance the swing on the door node and return the fade opacity
    pub fn update(&self, now: f64, scene: &mut SceneGraph) -> f32 {
        if let Some(node) = scene.get_mut(self.door) {
            node.yaw = self.swing.value_at(now);
        }
        self.fade.value_at(now)
    }

    /// Whether the session should end
    pub fn is_finished(&self, now: f64) -> bool {
        now >= self.ends_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{MemoryAssetSource, RegionAsset};
    use crate::foundation::math::constants::{HALF_PI, PI};
    use crate::physics::CollisionRegistry;
    use approx::assert_relative_eq;

    fn corridor(scene: &mut SceneGraph) -> CorridorRecycler {
        let segment = RegionAsset { name: "hallway".to_string(), nodes: Vec::new(), anchors: Vec::new() };
        CorridorRecycler::build(
            scene,
            &mut CollisionRegistry::new(),
            &segment,
            Vec3::new(0.0, -1.0, 0.0),
            &CorridorConfig::default(),
            &CollidableNaming::default(),
        )
        .expect("empty segment")
    }

    fn source() -> MemoryAssetSource {
        MemoryAssetSource::new().with(
            "end_door.ron",
            RegionAsset { name: "end-door".to_string(), nodes: Vec::new(), anchors: Vec::new() },
        )
    }

    #[test]
    fn test_door_appears_behind_player_when_turning_around() {
        let mut scene = SceneGraph::new();
        let corridor = corridor(&mut scene);
        let mut assets = source();
        let config = CorridorConfig::default();
        let mut door = EndDoor::new();

        let mut player = Player::new(Vec3::new(47.0, 3.5, -40.0), 0.0);
        door.update(&player, &corridor, &mut assets, &config, &mut scene);
        assert_eq!(door.state(), EndDoorState::Absent);

        player.yaw = PI;
        door.update(&player, &corridor, &mut assets, &config, &mut scene);
        assert!(matches!(door.state(), EndDoorState::Loading { .. }));
        let completion = assets.poll().remove(0);
        assert!(door.complete(completion, &mut scene, &CollidableNaming::default()).expect("loads"));

        let node = door.node().expect("present");
        let position = scene.world_position(node).expect("live");
        assert_relative_eq!(position, Vec3::new(45.21, -1.0, -36.0), epsilon = 1e-4);
    }

    #[test]
    fn test_door_clamped_to_front_segment() {
        let mut scene = SceneGraph::new();
        let corridor = corridor(&mut scene);
        let mut assets = source();
        let mut door = EndDoor::new();

        let config = CorridorConfig::default();
        let player = Player::new(Vec3::new(47.0, 3.5, -31.0), PI);
        door.update(&player, &corridor, &mut assets, &config, &mut scene);
        assert!(matches!(door.state(), EndDoorState::Loading { position, .. } if (position.z + 32.518).abs() < 1e-4));

        let EndDoorState::Loading { ticket, .. } = door.state() else {
            panic!("door should be loading");
        };
        let expected = Vec3::new(config.door_x, config.door_y, corridor.front().z);
        assert_eq!(door.state(), EndDoorState::Loading { ticket, position: expected });
        assert_ne!(door.state(), EndDoorState::Absent);
    }

    #[test]
    fn test_facing_forward_removes_door() {
        let mut scene = SceneGraph::new();
        let corridor = corridor(&mut scene);
        let mut assets = source();
        let config = CorridorConfig::default();
        let mut door = EndDoor::new();

        let mut player = Player::new(Vec3::new(47.0, 3.5, -40.0), PI);
        door.update(&player, &corridor, &mut assets, &config, &mut scene);
        let completion = assets.poll().remove(0);
        door.complete(completion, &mut scene, &CollidableNaming::default()).expect("loads");
        let node = door.node().expect("present");

        player.yaw = 0.0;
        door.update(&player, &corridor, &mut assets, &config, &mut scene);
        assert!(!scene.contains(node));
        assert_eq!(door.state(), EndDoorState::Absent);
    }

    #[test]
    fn test_late_completion_after_turning_back_is_dropped() {
        let mut scene = SceneGraph::new();
        let corridor = corridor(&mut scene);
        let mut assets = source();
        let config = CorridorConfig::default();
        let mut door = EndDoor::new();

        let mut player = Player::new(Vec3::new(47.0, 3.5, -40.0), PI);
        door.update(&player, &corridor, &mut assets, &config, &mut scene);
        player.yaw = 0.0;
        door.update(&player, &corridor, &mut assets, &config, &mut scene);

        let completion = assets.poll().remove(0);
        assert!(!door.complete(completion, &mut scene, &CollidableNaming::default()).expect("ignored"));
        assert_eq!(door.state(), EndDoorState::Absent);
    }

    #[test]
    fn test_end_sequence_swings_then_fades() {
        let mut scene = SceneGraph::new();
        let door = scene.spawn_root("end-door", Region::Corridor, Vec3::zeros());
        let sequence = EndSequence::start(100.0, door, &scene, &CorridorConfig::default());

        assert_relative_eq!(sequence.update(101.0, &mut scene), 0.0);
        assert_relative_eq!(scene.get(door).expect("live").yaw, HALF_PI * 0.5, epsilon = 1e-5);

        assert_relative_eq!(sequence.update(102.75, &mut scene), 0.5, epsilon = 1e-5);
        assert_relative_eq!(scene.get(door).expect("live").yaw, HALF_PI, epsilon = 1e-5);

        assert!(!sequence.is_finished(103.9));
        assert!(sequence.is_finished(104.0));
    }
}
