//! Region/door state machine
//!
//! ```text
//! Exterior --(front door)--> Transitioning --> Interior
//! Interior --(front door)--> Transitioning --> Exterior
//! Interior --(lock opened)--> Transitioning --> Corridor
//! ```
//!
//! A transition requests the incoming region's asset and waits. Only when
//! the asset is in hand is the outgoing region torn down, so a failed load
//! leaves the player where they were.

use crate::assets::{AssetError, AssetSource, LoadCompletion, LoadTicket, RegionAsset, RegionInstance};
use crate::config::GameConfig;
use crate::foundation::math::Vec3;
use crate::foundation::time::Cooldown;
use crate::input::{Actions, InputState};
use crate::player::Player;
use crate::scene::SceneGraph;
use crate::world::{Portal, PortalAction, Region, World};

/// Current region phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionPhase {
    /// Standing in a loaded region
    Active(Region),
    /// Waiting for `to` to load; `from` is `None` for the first load
    Transitioning {
        /// Region being left
        from: Option<Region>,
        /// Region being loaded
        to: Region,
    },
}

impl RegionPhase {
    /// The active region, if not transitioning
    pub fn active(self) -> Option<Region> {
        match self {
            Self::Active(region) => Some(region),
            Self::Transitioning { .. } => None,
        }
    }

    /// Whether a load is in flight
    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::Transitioning { .. })
    }
}

/// How a finished load was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionResult {
    /// The player now stands in `to`
    Entered {
        /// Region left behind
        from: Option<Region>,
        /// Region entered
        to: Region,
    },
    /// The load failed and `restored` is active again
    Failed {
        /// Region that could not be loaded
        to: Region,
        /// Region active after the failure
        restored: Region,
    },
}

/// Result of checking the player against the active portals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalOutcome {
    /// No portal in range, or portals disarmed
    Idle,
    /// In range of a portal; show its prompt
    Prompt(String),
    /// Confirm was pressed in range
    Fire(PortalAction),
}

/// Owns the region phase and the active region's portals
#[derive(Debug)]
pub struct RegionController {
    phase: RegionPhase,
    ticket: Option<LoadTicket>,
    portals: Vec<Portal>,
    cooldown: Cooldown,
}

impl RegionController {
    /// Start by loading `initial`
    pub fn begin(initial: Region, assets: &mut dyn AssetSource, config: &GameConfig) -> Self {
        let path = &initial.entry(&config.regions).asset;
        let ticket = assets.request(path);
        log::info!("Loading initial region {initial} from {path}");
        Self {
            phase: RegionPhase::Transitioning { from: None, to: initial },
            ticket: Some(ticket),
            portals: Vec::new(),
            cooldown: Cooldown::default(),
        }
    }

    /// Current phase
    pub fn phase(&self) -> RegionPhase {
        self.phase
    }

    /// Active portals
    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    /// Whether `ticket` is the pending region load
    pub fn owns(&self, ticket: LoadTicket) -> bool {
        self.ticket == Some(ticket)
    }

    /// Leave the active region for `to`
    ///
    /// Ignored while another transition is in flight. Returns whether a
    /// load was requested.
    pub fn request_transition(&mut self, to: Region, assets: &mut dyn AssetSource, config: &GameConfig) -> bool {
        let RegionPhase::Active(from) = self.phase else {
            log::debug!("Ignoring transition to {to}: already transitioning");
            return false;
        };

        let path = &to.entry(&config.regions).asset;
        self.ticket = Some(assets.request(path));
        self.phase = RegionPhase::Transitioning { from: Some(from), to };
        log::info!("Transition {from} -> {to} requested ({path})");
        true
    }

    /// Apply a finished load
    ///
    /// Completions for anything but the pending ticket are dropped and
    /// return `None`.
    pub fn complete(
        &mut self,
        completion: LoadCompletion,
        world: &mut World,
        player: &mut Player,
        config: &GameConfig,
        now: f64,
    ) -> Option<TransitionResult> {
        if !self.owns(completion.ticket) {
            log::debug!("Dropping stale completion for {}", completion.path);
            return None;
        }
        let RegionPhase::Transitioning { from, to } = self.phase else {
            return None;
        };
        self.ticket = None;

        let asset = match completion
            .result
            .and_then(|asset| asset.validate_hierarchy().map(|()| asset).map_err(AssetError::from))
        {
            Ok(asset) => asset,
            Err(e) => {
                log::error!("Failed to load {to} from {}: {e}", completion.path);
                let restored = from.unwrap_or(to);
                self.phase = RegionPhase::Active(restored);
                self.cooldown.start(now, config.doors.rearm_secs);
                return Some(TransitionResult::Failed { to, restored });
            }
        };

        if let Some(from) = from {
            world.teardown(from);
        }
        self.portals.clear();
        match world.build_region(to, &asset, config) {
            Ok(instance) => self.discover_portals(to, &asset, &instance, &world.scene, config),
            Err(e) => log::error!("Failed to spawn {to}: {e}"),
        }

        let entry = to.entry(&config.regions);
        player.position = entry.spawn;
        if let Some(yaw) = entry.yaw {
            player.yaw = yaw;
        }
        self.phase = RegionPhase::Active(to);
        self.cooldown.start(now, config.doors.rearm_secs);

        log::info!(
            "Entered {to}: {} portals, {} collision volumes",
            self.portals.len(),
            world.registry.len()
        );
        Some(TransitionResult::Entered { from, to })
    }

    fn discover_portals(
        &mut self,
        region: Region,
        asset: &RegionAsset,
        instance: &RegionInstance,
        scene: &SceneGraph,
        config: &GameConfig,
    ) {
        for problem in asset.manifest_problems(region) {
            log::error!("Region manifest defect: {problem}");
        }

        for role in region.required_anchors() {
            let Some(node) = asset.anchor_node(*role).and_then(|name| instance.node(name)) else {
                continue;
            };
            let Some(position) = scene.world_position(node) else { continue };
            self.portals.push(Portal::for_role(*role, node, position, &config.doors));
        }
    }

    /// Check the player against the active portals
    ///
    /// The nearest portal in range wins. Confirm is consumed only when a
    /// portal fires.
    pub fn evaluate(&self, player_position: Vec3, input: &mut InputState, now: f64) -> PortalOutcome {
        if self.phase.is_transitioning() || !self.cooldown.is_ready(now) {
            return PortalOutcome::Idle;
        }

        let nearest = self
            .portals
            .iter()
            .filter_map(|portal| portal.distance_if_in_range(&player_position).map(|d| (portal, d)))
            .min_by(|a, b| a.1.total_cmp(&b.1));

        match nearest {
            None => PortalOutcome::Idle,
            Some((portal, _)) if input.consume(Actions::CONFIRM) => PortalOutcome::Fire(portal.action),
            Some((portal, _)) => PortalOutcome::Prompt(portal.prompt.clone()),
        }
    }
}
