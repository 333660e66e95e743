//! # Game Configuration
//!
//! Content parameters grouped by the subsystem that reads them. All
//! sections default to the values of the shipped house level, so a config
//! file only needs to name what it changes.

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::audio::SoundEffect;
use crate::foundation::math::{constants, Vec3};
use crate::puzzle::SLOT_COUNT;

/// Top-level game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    /// Player movement tuning
    pub movement: MovementConfig,
    /// Door radii, prompts and re-arm cooldown
    pub doors: DoorConfig,
    /// Combination lock content
    pub lock: LockConfig,
    /// Endless corridor parameters
    pub corridor: CorridorConfig,
    /// Per-region assets and spawn anchors
    pub regions: RegionsConfig,
    /// Start screen and asset gate
    pub session: SessionConfig,
    /// Inspectable items and interaction triggers
    pub items: ItemsConfig,
}

impl Config for GameConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("movement.move_speed", self.movement.move_speed)?;
        positive("movement.turn_speed", self.movement.turn_speed)?;
        let extents = self.movement.player_half_extents;
        if extents.iter().any(|e| *e <= 0.0) {
            return Err(ConfigError::Invalid {
                field: "movement.player_half_extents",
                reason: format!("all components must be positive, got {extents:?}"),
            });
        }

        positive("doors.exterior_radius", self.doors.exterior_radius)?;
        positive("doors.interior_radius", self.doors.interior_radius)?;
        positive("doors.living_radius", self.doors.living_radius)?;
        non_negative("doors.rearm_secs", self.doors.rearm_secs)?;

        let secret = &self.lock.secret;
        if secret.len() != SLOT_COUNT || !secret.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::Invalid {
                field: "lock.secret",
                reason: format!("expected {SLOT_COUNT} digits, got '{secret}'"),
            });
        }

        positive("corridor.segment_length", self.corridor.segment_length)?;
        non_negative("corridor.door_distance", self.corridor.door_distance)?;
        non_negative("corridor.knock_after_secs", self.corridor.knock_after_secs)?;
        if let Some(lead) = self.corridor.recycle_lead {
            non_negative("corridor.recycle_lead", lead)?;
        }
        if self.corridor.door_asset.is_empty() {
            return Err(empty("corridor.door_asset"));
        }

        for (field, entry) in [
            ("regions.exterior.asset", &self.regions.exterior),
            ("regions.interior.asset", &self.regions.interior),
            ("regions.corridor.asset", &self.regions.corridor),
        ] {
            if entry.asset.is_empty() {
                return Err(empty(field));
            }
        }

        for inspector in &self.items.inspectors {
            positive("items.inspectors.radius", inspector.radius)?;
        }
        for trigger in &self.items.triggers {
            positive("items.triggers.radius", trigger.radius)?;
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: format!("must be positive, got {value}") })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: format!("must not be negative, got {value}") })
    }
}

fn empty(field: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason: "must not be empty".to_string() }
}

/// Player movement tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Distance travelled per tick while a direction is held
    pub move_speed: f32,
    /// Yaw change per tick while a turn action is held (radians)
    pub turn_speed: f32,
    /// Half size of the player's collision box
    pub player_half_extents: Vec3,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 0.1,
            turn_speed: 0.05,
            player_half_extents: Vec3::new(0.1, 0.1, 0.1),
        }
    }
}

/// Door radii and prompts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    /// Activation radius of the front door seen from the yard
    pub exterior_radius: f32,
    /// Activation radius of the front door seen from inside
    pub interior_radius: f32,
    /// Activation radius of the locked living-room door
    pub living_radius: f32,
    /// Seconds after entering a region before doors re-arm
    pub rearm_secs: f32,
    /// Prompt near the exterior door
    pub enter_prompt: String,
    /// Prompt near the interior door
    pub exit_prompt: String,
    /// Prompt near the locked door
    pub unlock_prompt: String,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            exterior_radius: 2.0,
            interior_radius: 1.5,
            living_radius: 2.0,
            rearm_secs: 0.5,
            enter_prompt: "Press SPACE to Enter".to_string(),
            exit_prompt: "Press SPACE to Exit".to_string(),
            unlock_prompt: "Press SPACE to Unlock".to_string(),
        }
    }
}

/// Combination lock content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// Digits that open the lock, in slot order
    pub secret: String,
    /// Dialogue line on a correct code
    pub success_message: String,
    /// Dialogue line on a wrong code
    pub failure_message: String,
    /// Control hints shown next to the lock
    pub instructions: String,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            secret: "403".to_string(),
            success_message: "Code correct! Entering...".to_string(),
            failure_message: "Incorrect code. Try again.".to_string(),
            instructions: "LEFT/RIGHT change digit, UP/DOWN change wheel, SPACE submit, ESC cancel"
                .to_string(),
        }
    }
}

/// Endless corridor parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorConfig {
    /// Length of one segment along Z
    pub segment_length: f32,
    /// How far past the front segment's origin the player walks before the
    /// back segment is moved ahead; one segment length when unset
    pub recycle_lead: Option<f32>,
    /// Asset loaded for the end door
    pub door_asset: String,
    /// Distance ahead of the camera the end door appears
    pub door_distance: f32,
    /// Fixed X of the end door (corridor centre line)
    pub door_x: f32,
    /// Fixed Y of the end door
    pub door_y: f32,
    /// Prompt while the end door is present
    pub open_prompt: String,
    /// Seconds in the corridor before the knock plays
    pub knock_after_secs: f32,
    /// Duration of the end-door swing
    pub swing_secs: f32,
    /// Swing angle in radians
    pub swing_angle: f32,
    /// Duration of the white fade
    pub fade_secs: f32,
    /// Seconds from opening the end door until the session ends
    pub end_after_secs: f32,
}

impl CorridorConfig {
    /// Effective recycle lead
    pub fn recycle_lead(&self) -> f32 {
        self.recycle_lead.unwrap_or(self.segment_length)
    }
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            segment_length: 32.518,
            recycle_lead: None,
            door_asset: "end_door.ron".to_string(),
            door_distance: 4.0,
            door_x: 47.1 - 1.89,
            door_y: -1.0,
            open_prompt: "Press SPACE to Open".to_string(),
            knock_after_secs: 30.0,
            swing_secs: 2.0,
            swing_angle: constants::HALF_PI,
            fade_secs: 1.5,
            end_after_secs: 4.0,
        }
    }
}

/// Where a region's geometry comes from and where the player lands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionEntry {
    /// Asset path handed to the asset source
    pub asset: String,
    /// World offset of the region root
    pub origin: Vec3,
    /// Player position after entering
    pub spawn: Vec3,
    /// Player facing after entering; kept from the previous region if unset
    #[serde(default)]
    pub yaw: Option<f32>,
}

/// Naming convention marking nodes whose boxes block movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollidableNaming {
    /// Node names starting with any of these are collidable
    pub prefixes: Vec<String>,
    /// Node names containing any of these (case-insensitive) are collidable
    pub contains: Vec<String>,
}

impl CollidableNaming {
    /// Whether a node with this name should register a collision volume
    pub fn matches(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.prefixes.iter().any(|prefix| name.starts_with(prefix.as_str()))
            || self.contains.iter().any(|needle| lower.contains(&needle.to_lowercase()))
    }
}

impl Default for CollidableNaming {
    fn default() -> Self {
        Self {
            prefixes: vec!["collision_".to_string()],
            contains: vec!["wall".to_string()],
        }
    }
}

/// Per-region assets and spawn anchors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionsConfig {
    /// The yard in front of the house
    pub exterior: RegionEntry,
    /// The house interior
    pub interior: RegionEntry,
    /// The endless corridor (one segment; instantiated twice)
    pub corridor: RegionEntry,
    /// Collidable naming convention shared by all regions
    pub collidable: CollidableNaming,
}

impl Default for RegionsConfig {
    fn default() -> Self {
        Self {
            exterior: RegionEntry {
                asset: "exterior.ron".to_string(),
                origin: Vec3::new(0.0, -1.0, 0.0),
                spawn: Vec3::new(28.0, 3.0, 0.0),
                yaw: None,
            },
            interior: RegionEntry {
                asset: "interior.ron".to_string(),
                origin: Vec3::zeros(),
                spawn: Vec3::new(35.0, 3.5, 0.0),
                yaw: None,
            },
            corridor: RegionEntry {
                asset: "corridor.ron".to_string(),
                origin: Vec3::new(0.0, -1.0, 0.0),
                spawn: Vec3::new(47.0, 3.5, -31.0),
                yaw: Some(0.0),
            },
            collidable: CollidableNaming::default(),
        }
    }
}

/// Start screen and asset gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Show the start screen and instructions before play
    pub show_start_screen: bool,
    /// Seconds to wait for the first region before showing the start screen anyway
    pub asset_fallback_secs: f32,
    /// Where the camera starts
    pub initial_position: Vec3,
    /// Initial camera yaw
    pub initial_yaw: f32,
    /// Start screen text while loading
    pub loading_message: String,
    /// Start screen text once loaded
    pub start_message: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            show_start_screen: true,
            asset_fallback_secs: 15.0,
            initial_position: Vec3::new(0.0, 0.0, 3.0),
            initial_yaw: 0.0,
            loading_message: "Loading, please wait...".to_string(),
            start_message: "Press SPACE to start".to_string(),
        }
    }
}

/// An inspectable object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectorConfig {
    /// Scene node name of the object
    pub target: String,
    /// Overlay image shown while inspecting
    pub image: String,
    /// Activation radius
    #[serde(default = "default_inspect_radius")]
    pub radius: f32,
    /// Prompt within range
    #[serde(default = "default_inspect_prompt")]
    pub prompt_inspect: String,
    /// Prompt while inspecting
    #[serde(default = "default_exit_prompt")]
    pub prompt_exit: String,
    /// Cue played when inspection starts
    #[serde(default)]
    pub sound: Option<SoundEffect>,
}

fn default_inspect_radius() -> f32 {
    4.0
}

fn default_inspect_prompt() -> String {
    "Press Space to Inspect".to_string()
}

fn default_exit_prompt() -> String {
    "Press Space to Exit".to_string()
}

/// What an interaction trigger does when confirmed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Take the object into the inventory and remove it from the scene
    Pickup {
        /// Item identifier added to the inventory
        item: String,
    },
    /// Hand an item over; only offered while the inventory holds it
    Give {
        /// Item identifier removed from the inventory
        item: String,
        /// Clip the receiver plays on accepting it
        #[serde(default)]
        animation: Option<String>,
    },
    /// Fire once per visit to its region (turning off the sink)
    OneShot {
        /// Cue to play
        effect: SoundEffect,
        /// Animation clip to start on the target, if any
        #[serde(default)]
        animation: Option<String>,
    },
}

/// A proximity-gated interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// Scene node name of the object
    pub target: String,
    /// Activation radius
    pub radius: f32,
    /// Prompt within range
    pub prompt: String,
    /// Behaviour on confirm
    pub kind: TriggerKind,
}

/// Inspectable items and interaction triggers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemsConfig {
    /// Inspectable objects
    pub inspectors: Vec<InspectorConfig>,
    /// Pickup, give and one-shot triggers
    pub triggers: Vec<TriggerConfig>,
}

impl Default for ItemsConfig {
    fn default() -> Self {
        let note = |target: &str, image: &str, sound| InspectorConfig {
            target: target.to_string(),
            image: image.to_string(),
            radius: default_inspect_radius(),
            prompt_inspect: default_inspect_prompt(),
            prompt_exit: default_exit_prompt(),
            sound: Some(sound),
        };

        Self {
            inspectors: vec![
                note("note-01001", "char/playgrnd-note-pixel.png", SoundEffect::Paper),
                note("note-02", "char/kitchen-note-pixel.png", SoundEffect::Paper),
                note("med-bottle", "char/pillbottle-pixel.png", SoundEffect::Pills),
            ],
            triggers: vec![TriggerConfig {
                target: "sink-water".to_string(),
                radius: 3.5,
                prompt: "SPACE to turn off".to_string(),
                kind: TriggerKind::OneShot {
                    effect: SoundEffect::SinkOff,
                    animation: Some("water-drain".to_string()),
                },
            }],
        }
    }
}
