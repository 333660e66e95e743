//! First-person movement against the collision registry
//!
//! Movement is block-or-commit: the whole per-tick displacement is
//! discarded if the player's box would overlap any registered volume.

use crate::config::MovementConfig;
use crate::foundation::math::{forward_from_yaw, left_from_yaw, Vec3};
use crate::input::{Actions, InputState};
use crate::physics::CollisionRegistry;

/// Camera pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Eye position
    pub position: Vec3,
    /// Rotation about +Y in radians; zero looks down -Z
    pub yaw: f32,
}

impl Player {
    /// Create a player at `position` facing `yaw`
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }

    /// Horizontal forward vector
    pub fn forward(&self) -> Vec3 {
        forward_from_yaw(self.yaw)
    }

    /// Horizontal left vector
    pub fn left(&self) -> Vec3 {
        left_from_yaw(self.yaw)
    }
}

/// What happened to the player this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Movement is suspended by a modal overlay or a transition
    Suspended,
    /// No translation was requested (turning may still have happened)
    Idle,
    /// The candidate position overlapped a volume; nothing moved
    Blocked,
    /// The displacement was committed
    Moved,
}

/// Applies held movement actions to the player
#[derive(Debug, Clone)]
pub struct MovementController {
    speed: f32,
    turn_speed: f32,
    half_extents: Vec3,
}

impl MovementController {
    /// Create a controller from config
    pub fn new(config: &MovementConfig) -> Self {
        Self {
            speed: config.move_speed,
            turn_speed: config.turn_speed,
            half_extents: config.player_half_extents,
        }
    }

    /// Half size of the player's collision box
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Run one tick of movement
    pub fn update(
        &self,
        player: &mut Player,
        input: &InputState,
        registry: &CollisionRegistry,
        suspended: bool,
    ) -> MoveOutcome {
        if suspended {
            return MoveOutcome::Suspended;
        }

        if input.is_held(Actions::TURN_LEFT) {
            player.yaw += self.turn_speed;
        }
        if input.is_held(Actions::TURN_RIGHT) {
            player.yaw -= self.turn_speed;
        }

        let displacement = self.displacement(player, input);
        if displacement == Vec3::zeros() {
            return MoveOutcome::Idle;
        }

        let candidate = player.position + displacement;
        if registry.query(candidate, self.half_extents) {
            return MoveOutcome::Blocked;
        }
        player.position = candidate;
        MoveOutcome::Moved
    }

    fn displacement(&self, player: &Player, input: &InputState) -> Vec3 {
        let forward = player.forward();
        let left = player.left();
        let mut displacement = Vec3::zeros();
        if input.is_held(Actions::FORWARD) {
            displacement += forward * self.speed;
        }
        if input.is_held(Actions::BACKWARD) {
            displacement -= forward * self.speed;
        }
        if input.is_held(Actions::STRAFE_LEFT) {
            displacement += left * self.speed;
        }
        if input.is_held(Actions::STRAFE_RIGHT) {
            displacement -= left * self.speed;
        }
        displacement
    }
}
