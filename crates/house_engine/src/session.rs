//! Game session
//!
//! Owns every subsystem and drives them in a fixed order once per tick:
//!
//! 1. apply finished asset loads
//! 2. session phase gate (start screen, instructions, ending)
//! 3. combination lock input, otherwise movement
//! 4. corridor recycling
//! 5. portals (at most one transition per tick)
//! 6. end door
//! 7. items and interaction triggers
//! 8. footsteps
//! 9. event dispatch
//!
//! Writes to the collision registry in steps 1 and 4 are visible to
//! movement in the next tick's step 3.

use thiserror::Error;

use crate::assets::{AssetError, AssetSource, ManifestError};
use crate::audio::{AudioCue, FootstepTracker, SoundEffect, Theme};
use crate::config::{Config, ConfigError, GameConfig};
use crate::events::{EventBus, GameEvent};
use crate::foundation::time::SimClock;
use crate::hud::{HudCommand, PromptCache, ScreenOverlay};
use crate::input::{Actions, InputState};
use crate::items::{InspectOutcome, Inventory, InteractionTrigger, ItemInspector, TriggerOutcome};
use crate::player::{MovementController, Player};
use crate::puzzle::{ComboLock, ComboLockView, LockInput, LockOutcome};
use crate::scene::NodeId;
use crate::world::{
    CorridorRecycler, EndDoor, EndSequence, PortalAction, PortalOutcome, Region, RegionController,
    RegionPhase, TransitionResult, World,
};

/// Session-level errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// Configuration rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An asset could not be used
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// A region asset is malformed
    #[error("Region manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

/// Outer lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the first region
    Loading,
    /// Start screen shown
    StartScreen,
    /// Instructions shown
    Instructions,
    /// Normal play
    Playing,
    /// End door swinging, screen fading
    Ending,
    /// Over; the host should start a new session
    Ended,
}

/// Flags several subsystems read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionContext {
    /// A modal overlay (lock or inspection) owns input
    pub modal_active: bool,
    /// The first region finished loading
    pub assets_ready: bool,
    /// The end door was opened
    pub end_triggered: bool,
}

/// A running game
pub struct Session {
    config: GameConfig,
    assets: Box<dyn AssetSource>,
    clock: SimClock,
    phase: SessionPhase,
    context: SessionContext,
    world: World,
    player: Player,
    movement: MovementController,
    regions: RegionController,
    lock: Option<ComboLock>,
    end_door: EndDoor,
    ending: Option<EndSequence>,
    inspectors: Vec<ItemInspector>,
    triggers: Vec<InteractionTrigger>,
    inventory: Inventory,
    prompts: PromptCache,
    footsteps: FootstepTracker,
    events: EventBus,
    /// Held actions; written by the host, read and consumed by the session
    pub input: InputState,
}

impl Session {
    /// Validate `config` and start loading the exterior
    pub fn new(config: GameConfig, mut assets: Box<dyn AssetSource>) -> Result<Self, SessionError> {
        config.validate()?;

        let regions = RegionController::begin(Region::Exterior, assets.as_mut(), &config);
        let mut events = EventBus::new();
        if config.session.show_start_screen {
            events.send(HudCommand::Screen(Some(ScreenOverlay::Loading(
                config.session.loading_message.clone(),
            ))));
        }

        let player = Player::new(config.session.initial_position, config.session.initial_yaw);
        let movement = MovementController::new(&config.movement);
        let inspectors = config.items.inspectors.iter().cloned().map(ItemInspector::new).collect();
        let triggers = config.items.triggers.iter().cloned().map(InteractionTrigger::new).collect();

        log::info!("Session created");
        Ok(Self {
            config,
            assets,
            clock: SimClock::new(),
            phase: SessionPhase::Loading,
            context: SessionContext::default(),
            world: World::new(),
            player,
            movement,
            regions,
            lock: None,
            end_door: EndDoor::new(),
            ending: None,
            inspectors,
            triggers,
            inventory: Inventory::new(),
            prompts: PromptCache::new(),
            footsteps: FootstepTracker::new(),
            events,
            input: InputState::new(),
        })
    }

    /// Advance the session by `delta` seconds and return the events it produced
    ///
    /// Errors inside the tick are logged and do not stop the session.
    pub fn tick(&mut self, delta: f32) -> Vec<GameEvent> {
        self.clock.advance(delta);
        let now = self.clock.now();
        self.events.update_time(now);

        if let Err(e) = self.try_tick(now) {
            log::error!("Tick {} failed: {e}", self.clock.ticks());
        }
        self.events.dispatch()
    }

    fn try_tick(&mut self, now: f64) -> Result<(), SessionError> {
        let load_result = self.apply_loads(now);
        if self.advance_phase(now) {
            let suspended = self.update_controls();
            self.update_corridor();

            let door_prompt = match self.update_portals(now) {
                Some(prompt) => Some(prompt),
                None => self.update_end_door(now),
            };
            if let Some(command) = self.prompts.door(door_prompt.as_deref()) {
                self.events.send(command);
            }

            let item_prompt = self.update_items();
            if let Some(command) = self.prompts.item(item_prompt.as_deref()) {
                self.events.send(command);
            }

            self.update_footsteps(suspended);
        }
        load_result
    }

    fn apply_loads(&mut self, now: f64) -> Result<(), SessionError> {
        let mut failure = None;
        for completion in self.assets.poll() {
            if self.end_door.owns(completion.ticket) {
                match self.end_door.complete(completion, &mut self.world.scene, &self.config.regions.collidable) {
                    Ok(true) => {
                        let knock = GameEvent::Audio(AudioCue::Effect(SoundEffect::Knock));
                        if self.events.cancel_deferred(|event| *event == knock) > 0 {
                            log::debug!("Knock cancelled by end door");
                        }
                    }
                    Ok(false) => {}
                    Err(e) => {
                        failure.get_or_insert(SessionError::from(e));
                    }
                }
                continue;
            }

            match self.regions.complete(completion, &mut self.world, &mut self.player, &self.config, now) {
                Some(TransitionResult::Entered { from, to }) => self.on_region_entered(from, to, now),
                Some(TransitionResult::Failed { to, restored }) => {
                    log::warn!("Could not enter {to}; staying in {restored}");
                }
                None => {}
            }
        }
        failure.map_or(Ok(()), Err)
    }

    fn on_region_entered(&mut self, from: Option<Region>, to: Region, now: f64) {
        self.context.assets_ready = true;
        self.events.send(GameEvent::RegionEntered(to));

        for inspector in &mut self.inspectors {
            inspector.reset();
        }
        let mut collected = false;
        for trigger in &mut self.triggers {
            collected |= trigger.rearm(to, &mut self.world.scene);
        }
        if collected {
            self.world.registry.purge_missing(&self.world.scene);
        }
        self.refresh_modal();

        if to == Region::Corridor {
            self.events.send(AudioCue::ThemeStop(Theme::Main));
            self.events.send(AudioCue::ThemeStart(Theme::Hallway));
            self.events.post(
                now + f64::from(self.config.corridor.knock_after_secs),
                AudioCue::Effect(SoundEffect::Knock),
            );
            self.end_door.reset();
            self.ending = None;
        }
        if let Some(from) = from {
            log::info!("{from} -> {to}");
        }
    }

    /// Returns true when normal play should run this tick
    fn advance_phase(&mut self, now: f64) -> bool {
        match self.phase {
            SessionPhase::Loading => {
                let timed_out = now >= f64::from(self.config.session.asset_fallback_secs);
                if !self.context.assets_ready && !timed_out {
                    return false;
                }
                if !self.context.assets_ready {
                    log::warn!(
                        "Assets not ready after {}s; continuing anyway",
                        self.config.session.asset_fallback_secs
                    );
                }

                if self.config.session.show_start_screen {
                    self.phase = SessionPhase::StartScreen;
                    self.events.send(HudCommand::Screen(Some(ScreenOverlay::Start(
                        self.config.session.start_message.clone(),
                    ))));
                    return false;
                }
                self.events.send(AudioCue::ThemeStart(Theme::Main));
                self.phase = SessionPhase::Playing;
                log::info!("Play started");
                true
            }
            SessionPhase::StartScreen => {
                if self.input.consume(Actions::CONFIRM) {
                    self.events.send(AudioCue::ThemeStart(Theme::Main));
                    self.events.send(HudCommand::Screen(Some(ScreenOverlay::Instructions)));
                    self.phase = SessionPhase::Instructions;
                }
                false
            }
            SessionPhase::Instructions => {
                if self.input.consume(Actions::CONFIRM) {
                    self.events.send(HudCommand::Screen(None));
                    self.phase = SessionPhase::Playing;
                    log::info!("Play started");
                }
                false
            }
            SessionPhase::Playing => true,
            SessionPhase::Ending => {
                self.update_ending(now);
                false
            }
            SessionPhase::Ended => false,
        }
    }

    /// Returns whether movement was suspended
    fn update_controls(&mut self) -> bool {
        if let Some(lock) = self.lock.as_mut() {
            if let Some(input) = LockInput::poll(&mut self.input) {
                let outcome = lock.handle(input, &self.config.lock.secret);
                let view = lock.view();
                self.on_lock_outcome(outcome, view);
            }
            return true;
        }

        let suspended = self.context.modal_active || self.regions.phase().is_transitioning();
        self.movement.update(&mut self.player, &self.input, &self.world.registry, suspended);
        suspended
    }

    fn on_lock_outcome(&mut self, outcome: LockOutcome, view: ComboLockView) {
        match outcome {
            LockOutcome::Updated => self.events.send(HudCommand::ComboLock(Some(view))),
            LockOutcome::Rejected => {
                self.events.send(AudioCue::Effect(SoundEffect::UnlockFailure));
                self.events.send(HudCommand::Dialogue(self.config.lock.failure_message.clone()));
            }
            LockOutcome::Cancelled => self.close_lock(),
            LockOutcome::Unlocked => {
                log::info!("Combination accepted");
                self.close_lock();
                self.events.send(GameEvent::DoorUnlocked);
                self.events.send(AudioCue::Effect(SoundEffect::UnlockSuccess));
                self.events.send(HudCommand::Dialogue(self.config.lock.success_message.clone()));
                self.begin_transition(Region::Corridor);
            }
        }
    }

    fn open_lock(&mut self) {
        let lock = ComboLock::new();
        self.events.send(HudCommand::ComboLock(Some(lock.view())));
        self.events.send(HudCommand::ComboInstructions(Some(self.config.lock.instructions.clone())));
        self.lock = Some(lock);
        self.refresh_modal();
    }

    fn close_lock(&mut self) {
        self.lock = None;
        self.events.send(HudCommand::ComboLock(None));
        self.events.send(HudCommand::ComboInstructions(None));
        self.refresh_modal();
    }

    fn refresh_modal(&mut self) {
        self.context.modal_active =
            self.lock.is_some() || self.inspectors.iter().any(ItemInspector::is_inspecting);
    }

    fn begin_transition(&mut self, to: Region) {
        if self.regions.request_transition(to, self.assets.as_mut(), &self.config) {
            self.events.send(AudioCue::Effect(SoundEffect::DoorOpen));
        }
    }

    fn update_corridor(&mut self) {
        if self.regions.phase() != RegionPhase::Active(Region::Corridor) {
            return;
        }
        if let Some(corridor) = self.world.corridor.as_mut() {
            corridor.update(self.player.position.z, &mut self.world.scene, &mut self.world.registry);
        }
    }

    fn update_portals(&mut self, now: f64) -> Option<String> {
        if self.context.modal_active {
            return None;
        }
        match self.regions.evaluate(self.player.position, &mut self.input, now) {
            PortalOutcome::Idle => None,
            PortalOutcome::Prompt(text) => Some(text),
            PortalOutcome::Fire(PortalAction::Travel(to)) => {
                self.begin_transition(to);
                None
            }
            PortalOutcome::Fire(PortalAction::OpenLock) => {
                self.open_lock();
                None
            }
        }
    }

    fn update_end_door(&mut self, now: f64) -> Option<String> {
        if self.context.modal_active || self.regions.phase() != RegionPhase::Active(Region::Corridor) {
            return None;
        }
        let corridor = self.world.corridor.as_ref()?;
        self.end_door.update(
            &self.player,
            corridor,
            self.assets.as_mut(),
            &self.config.corridor,
            &mut self.world.scene,
        );

        let door = self.end_door.node()?;
        if self.input.consume(Actions::CONFIRM) {
            self.start_ending(door, now);
            return None;
        }
        Some(self.config.corridor.open_prompt.clone())
    }

    fn start_ending(&mut self, door: NodeId, now: f64) {
        log::info!("End door opened");
        self.ending = Some(EndSequence::start(now, door, &self.world.scene, &self.config.corridor));
        self.context.end_triggered = true;
        self.phase = SessionPhase::Ending;
        self.events.send(AudioCue::Effect(SoundEffect::DoorOpen));
        if let Some(cue) = self.footsteps.update(None) {
            self.events.send(cue);
        }
    }

    fn update_ending(&mut self, now: f64) {
        let Some(sequence) = self.ending.as_ref() else { return };
        let fade = sequence.update(now, &mut self.world.scene);
        self.events.send(HudCommand::Fade(fade));
        if sequence.is_finished(now) {
            self.phase = SessionPhase::Ended;
            self.events.send(GameEvent::SessionEnded);
            log::info!("Session ended after {now:.1}s");
        }
    }

    fn update_items(&mut self) -> Option<String> {
        if self.lock.is_some() || self.regions.phase().is_transitioning() {
            return None;
        }
        let position = self.player.position;
        let mut prompt = None;

        // An open inspection owns confirm
        if let Some(inspector) = self.inspectors.iter_mut().find(|i| i.is_inspecting()) {
            match inspector.evaluate(position, &mut self.input, &self.world.scene) {
                InspectOutcome::Exited => self.events.send(HudCommand::Inspection(None)),
                InspectOutcome::Prompt(text) => prompt = Some(text),
                InspectOutcome::Idle | InspectOutcome::Started { .. } => {}
            }
            self.refresh_modal();
            return prompt;
        }

        for inspector in &mut self.inspectors {
            match inspector.evaluate(position, &mut self.input, &self.world.scene) {
                InspectOutcome::Idle | InspectOutcome::Exited => {}
                InspectOutcome::Prompt(text) => {
                    prompt.get_or_insert(text);
                }
                InspectOutcome::Started { image, sound, prompt: exit } => {
                    self.events.send(HudCommand::Inspection(Some(image)));
                    if let Some(sound) = sound {
                        self.events.send(AudioCue::Effect(sound));
                    }
                    prompt = Some(exit);
                    break;
                }
            }
        }
        self.refresh_modal();
        if self.context.modal_active {
            return prompt;
        }

        for trigger in &mut self.triggers {
            match trigger.evaluate(position, &mut self.input, &mut self.world.scene, &mut self.inventory) {
                TriggerOutcome::Idle => {}
                TriggerOutcome::Prompt(text) => {
                    prompt.get_or_insert(text);
                }
                TriggerOutcome::PickedUp(_) => {
                    self.world.registry.purge_missing(&self.world.scene);
                    self.events.send(HudCommand::Inventory(self.inventory.items().to_vec()));
                }
                TriggerOutcome::Given { animation, .. } => {
                    self.events.send(HudCommand::Inventory(self.inventory.items().to_vec()));
                    if let Some((target, clip)) = animation {
                        self.events.send(GameEvent::PlayAnimation { target, clip });
                    }
                }
                TriggerOutcome::Fired { effect, animation } => {
                    self.events.send(AudioCue::Effect(effect));
                    if let Some((target, clip)) = animation {
                        self.events.send(GameEvent::PlayAnimation { target, clip });
                    }
                }
            }
        }
        prompt
    }

    fn update_footsteps(&mut self, suspended: bool) {
        let desired = match self.regions.phase().active() {
            Some(region) if !suspended && self.input.any_held(Actions::MOVEMENT) => Some(region.footsteps()),
            _ => None,
        };
        if let Some(cue) = self.footsteps.update(desired) {
            self.events.send(cue);
        }
    }

    /// Outer lifecycle phase
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Shared flags
    pub fn context(&self) -> SessionContext {
        self.context
    }

    /// Region phase
    pub fn region_phase(&self) -> RegionPhase {
        self.regions.phase()
    }

    /// Camera pose
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Camera pose, for hosts that drive the camera directly
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Scene graph, registry and corridor
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Corridor segments while the corridor is loaded
    pub fn corridor(&self) -> Option<&CorridorRecycler> {
        self.world.corridor.as_ref()
    }

    /// End door monitor
    pub fn end_door(&self) -> &EndDoor {
        &self.end_door
    }

    /// Open combination lock, if any
    pub fn lock(&self) -> Option<&ComboLock> {
        self.lock.as_ref()
    }

    /// Player inventory
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Event bus, for registering handlers
    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Active configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Session time in seconds
    pub fn now(&self) -> f64 {
        self.clock.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AnchorBinding, AnchorRole, MemoryAssetSource, NodeSpec, RegionAsset};
    use crate::audio::FootstepCategory;
    use crate::config::{TriggerConfig, TriggerKind};
    use crate::foundation::math::{constants::PI, Vec3};
    use crate::physics::Aabb;

    const DT: f32 = 0.1;

    fn node(name: &str, position: Vec3, bounds: Option<Aabb>) -> NodeSpec {
        NodeSpec { name: name.to_string(), position, bounds, parent: None }
    }

    fn post() -> Option<Aabb> {
        Some(Aabb::new(Vec3::new(-0.5, -5.0, -0.5), Vec3::new(0.5, 5.0, 0.5)))
    }

    fn interior() -> RegionAsset {
        RegionAsset {
            name: "house".to_string(),
            nodes: vec![
                node("front-door", Vec3::new(38.0, 0.0, 0.0), None),
                node("living-door", Vec3::new(30.0, 0.0, -5.0), None),
                node("collision_table", Vec3::new(35.0, 0.0, 1.0), post()),
                node("ball", Vec3::new(34.0, 1.0, -2.0), None),
            ],
            anchors: vec![
                AnchorBinding { role: AnchorRole::InteriorDoor, node: "front-door".to_string() },
                AnchorBinding { role: AnchorRole::LivingDoor, node: "living-door".to_string() },
            ],
        }
    }

    fn assets() -> MemoryAssetSource {
        let exterior = RegionAsset {
            name: "yard".to_string(),
            nodes: vec![
                node("exterior-door", Vec3::new(28.0, 0.0, -1.0), None),
                node("collision_mailbox", Vec3::new(20.0, 0.0, 0.0), post()),
            ],
            anchors: vec![AnchorBinding { role: AnchorRole::ExteriorDoor, node: "exterior-door".to_string() }],
        };
        let interior = interior();
        let corridor = RegionAsset {
            name: "hallway".to_string(),
            nodes: vec![
                node(
                    "collision_left",
                    Vec3::new(44.5, 0.0, 0.0),
                    Some(Aabb::new(Vec3::new(-0.1, 0.0, -32.518), Vec3::new(0.1, 6.0, 0.0))),
                ),
                node(
                    "collision_right",
                    Vec3::new(49.5, 0.0, 0.0),
                    Some(Aabb::new(Vec3::new(-0.1, 0.0, -32.518), Vec3::new(0.1, 6.0, 0.0))),
                ),
            ],
            anchors: Vec::new(),
        };
        let end_door = RegionAsset {
            name: "end-door".to_string(),
            nodes: vec![node("end-door-panel", Vec3::zeros(), None)],
            anchors: Vec::new(),
        };

        MemoryAssetSource::new()
            .with("exterior.ron", exterior)
            .with("interior.ron", interior)
            .with("corridor.ron", corridor)
            .with("end_door.ron", end_door)
    }

    fn config() -> GameConfig {
        let mut config = GameConfig::default();
        config.session.show_start_screen = false;
        config.regions.exterior.origin = Vec3::zeros();
        config.items.inspectors.clear();
        config.items.triggers = vec![TriggerConfig {
            target: "ball".to_string(),
            radius: 1.5,
            prompt: "Press SPACE to pick up".to_string(),
            kind: TriggerKind::Pickup { item: "ball".to_string() },
        }];
        config
    }

    fn session_with(config: GameConfig, assets: MemoryAssetSource) -> Session {
        Session::new(config, Box::new(assets)).expect("valid config")
    }

    fn run(session: &mut Session, ticks: usize) -> Vec<GameEvent> {
        (0..ticks).flat_map(|_| session.tick(DT)).collect()
    }

    fn press(session: &mut Session, actions: Actions) -> Vec<GameEvent> {
        session.input.press(actions);
        session.tick(DT)
    }

    fn playing() -> Session {
        let mut session = session_with(config(), assets());
        let events = run(&mut session, 6);
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert!(events.contains(&GameEvent::RegionEntered(Region::Exterior)));
        session
    }

    fn enter_interior(session: &mut Session) {
        session.player_mut().position = Vec3::new(28.0, 3.0, 0.0);
        press(session, Actions::CONFIRM);
        let events = run(session, 6);
        assert!(events.contains(&GameEvent::RegionEntered(Region::Interior)));
    }

    fn enter_corridor(session: &mut Session) -> Vec<GameEvent> {
        enter_interior(session);
        session.player_mut().position = Vec3::new(30.0, 3.5, -4.0);
        press(session, Actions::CONFIRM);
        for _ in 0..4 {
            press(session, Actions::STRAFE_RIGHT);
        }
        press(session, Actions::BACKWARD);
        press(session, Actions::BACKWARD);
        for _ in 0..3 {
            press(session, Actions::STRAFE_RIGHT);
        }
        let events = press(session, Actions::CONFIRM);
        assert_eq!(events.iter().filter(|e| **e == GameEvent::DoorUnlocked).count(), 1);
        let events = run(session, 2);
        assert!(events.contains(&GameEvent::RegionEntered(Region::Corridor)));
        events
    }

    #[test]
    fn test_start_screen_then_instructions_then_play() {
        let mut config = config();
        config.session.show_start_screen = true;
        let mut session = session_with(config, assets());

        let events = session.tick(DT);
        assert!(events.contains(&GameEvent::Hud(HudCommand::Screen(Some(ScreenOverlay::Loading(
            "Loading, please wait...".to_string()
        ))))));
        assert_eq!(session.phase(), SessionPhase::StartScreen);

        let events = press(&mut session, Actions::CONFIRM);
        assert!(events.contains(&GameEvent::Audio(AudioCue::ThemeStart(Theme::Main))));
        assert_eq!(session.phase(), SessionPhase::Instructions);

        let events = press(&mut session, Actions::CONFIRM);
        assert!(events.contains(&GameEvent::Hud(HudCommand::Screen(None))));
        assert_eq!(session.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_start_screen_shown_after_fallback_timeout() {
        let mut config = config();
        config.session.show_start_screen = true;
        let mut assets = assets();
        assets.hold("exterior.ron");
        let mut session = session_with(config, assets);

        session.tick(10.0);
        assert_eq!(session.phase(), SessionPhase::Loading);
        session.tick(6.0);
        assert_eq!(session.phase(), SessionPhase::StartScreen);
        assert!(!session.context().assets_ready);
    }

    #[test]
    fn test_walk_through_front_door() {
        let mut session = playing();
        session.player_mut().position = Vec3::new(28.0, 3.0, 6.0);
        session.tick(DT);

        session.player_mut().position = Vec3::new(28.0, 3.0, 0.0);
        let events = session.tick(DT);
        assert!(events.contains(&GameEvent::Hud(HudCommand::DoorPrompt(Some("Press SPACE to Enter".to_string())))));

        let events = press(&mut session, Actions::CONFIRM);
        assert!(events.contains(&GameEvent::Audio(AudioCue::Effect(SoundEffect::DoorOpen))));
        assert!(events.contains(&GameEvent::Hud(HudCommand::DoorPrompt(None))));
        assert!(session.region_phase().is_transitioning());

        session.tick(DT);
        assert_eq!(session.region_phase(), RegionPhase::Active(Region::Interior));
        assert!(!session.world().registry.contains_region(Region::Exterior));
        assert_eq!(session.player().position, Vec3::new(35.0, 3.5, 0.0));
    }

    #[test]
    fn test_failed_load_keeps_player_outside() {
        let mut assets = assets();
        assets.fail("interior.ron");
        let mut session = session_with(config(), assets);
        run(&mut session, 6);
        session.player_mut().position = Vec3::new(28.0, 3.0, 0.0);

        press(&mut session, Actions::CONFIRM);
        session.tick(DT);
        assert_eq!(session.region_phase(), RegionPhase::Active(Region::Exterior));
        assert_eq!(session.player().position, Vec3::new(28.0, 3.0, 0.0));
        assert!(session.world().registry.contains_region(Region::Exterior));
    }

    #[test]
    fn test_movement_blocked_by_registered_volume() {
        let mut session = playing();
        // Mailbox post spans x in [19.5, 20.5]
        session.player_mut().position = Vec3::new(20.65, 3.0, 0.0);
        session.player_mut().yaw = -PI / 2.0;

        session.input.press(Actions::BACKWARD);
        let before = session.player().position;
        session.tick(DT);
        assert_eq!(session.player().position, before);

        session.input.release(Actions::BACKWARD);
        session.input.press(Actions::FORWARD);
        session.tick(DT);
        assert!(session.player().position.x > before.x);
    }

    #[test]
    fn test_wrong_code_keeps_lock_open() {
        let mut session = playing();
        enter_interior(&mut session);
        session.player_mut().position = Vec3::new(30.0, 3.5, -4.0);

        let events = press(&mut session, Actions::CONFIRM);
        assert!(session.lock().is_some());
        assert!(session.context().modal_active);
        assert!(events.iter().any(|e| matches!(e, GameEvent::Hud(HudCommand::ComboLock(Some(_))))));

        let events = press(&mut session, Actions::CONFIRM);
        assert!(events.contains(&GameEvent::Audio(AudioCue::Effect(SoundEffect::UnlockFailure))));
        assert!(events.contains(&GameEvent::Hud(HudCommand::Dialogue("Incorrect code. Try again.".to_string()))));
        assert!(!events.contains(&GameEvent::DoorUnlocked));
        assert!(session.lock().is_some());

        // Directional input belongs to the lock, not the camera
        let position = session.player().position;
        press(&mut session, Actions::STRAFE_LEFT);
        assert_eq!(session.player().position, position);
        assert_eq!(session.lock().map(ComboLock::digits), Some([9, 0, 0]));

        let events = press(&mut session, Actions::CANCEL);
        assert!(events.contains(&GameEvent::Hud(HudCommand::ComboLock(None))));
        assert!(session.lock().is_none());
        assert!(!session.context().modal_active);
        assert_eq!(session.region_phase(), RegionPhase::Active(Region::Interior));
    }

    #[test]
    fn test_correct_code_leads_to_corridor() {
        let mut session = playing();
        enter_corridor(&mut session);

        assert_eq!(session.region_phase(), RegionPhase::Active(Region::Corridor));
        assert_eq!(session.player().position, Vec3::new(47.0, 3.5, -31.0));
        assert!(!session.world().registry.contains_region(Region::Interior));
        assert_eq!(session.world().registry.len(), 4);
        assert!(session.corridor().is_some());
    }

    #[test]
    fn test_theme_switches_in_corridor() {
        let mut session = playing();
        let events = enter_corridor(&mut session);
        assert!(events.contains(&GameEvent::Audio(AudioCue::ThemeStop(Theme::Main))));
        assert!(events.contains(&GameEvent::Audio(AudioCue::ThemeStart(Theme::Hallway))));
    }

    #[test]
    fn test_knock_plays_when_no_end_door() {
        let mut session = playing();
        enter_corridor(&mut session);
        let events = run(&mut session, 310);
        let knocks = events
            .iter()
            .filter(|e| **e == GameEvent::Audio(AudioCue::Effect(SoundEffect::Knock)))
            .count();
        assert_eq!(knocks, 1);
    }

    #[test]
    fn test_end_door_cancels_knock_and_follows_facing() {
        let mut session = playing();
        enter_corridor(&mut session);

        session.player_mut().yaw = PI;
        let events = run(&mut session, 2);
        assert!(session.end_door().node().is_some());
        assert!(events.contains(&GameEvent::Hud(HudCommand::DoorPrompt(Some("Press SPACE to Open".to_string())))));

        session.player_mut().yaw = 0.0;
        let events = session.tick(DT);
        assert!(session.end_door().node().is_none());
        assert!(events.contains(&GameEvent::Hud(HudCommand::DoorPrompt(None))));

        let events = run(&mut session, 300);
        assert!(!events.contains(&GameEvent::Audio(AudioCue::Effect(SoundEffect::Knock))));
    }

    #[test]
    fn test_opening_end_door_ends_session() {
        let mut session = playing();
        enter_corridor(&mut session);
        session.player_mut().yaw = PI;
        run(&mut session, 2);

        let events = press(&mut session, Actions::CONFIRM);
        assert!(events.contains(&GameEvent::Audio(AudioCue::Effect(SoundEffect::DoorOpen))));
        assert_eq!(session.phase(), SessionPhase::Ending);
        assert!(session.context().end_triggered);

        let events = run(&mut session, 41);
        assert_eq!(events.iter().filter(|e| **e == GameEvent::SessionEnded).count(), 1);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::Hud(HudCommand::Fade(f)) if *f > 0.999)));
        assert_eq!(session.phase(), SessionPhase::Ended);
        assert!(run(&mut session, 5).is_empty());
    }

    #[test]
    fn test_corridor_recycles_under_session() {
        let mut session = playing();
        enter_corridor(&mut session);
        session.player_mut().position.z = -66.0;
        session.tick(DT);

        let corridor = session.corridor().expect("corridor loaded");
        assert_eq!(corridor.recycled(), 1);
        assert!((corridor.front().z + 65.036).abs() < 1e-3);
        assert!((corridor.back().z + 32.518).abs() < 1e-3);
        assert_eq!(session.world().registry.len(), 4);
    }

    #[test]
    fn test_pickup_updates_inventory_listing() {
        let mut session = playing();
        enter_interior(&mut session);
        session.player_mut().position = Vec3::new(34.0, 3.5, -1.0);

        let events = session.tick(DT);
        assert!(events.contains(&GameEvent::Hud(HudCommand::ItemPrompt(Some("Press SPACE to pick up".to_string())))));

        let events = press(&mut session, Actions::CONFIRM);
        assert!(events.contains(&GameEvent::Hud(HudCommand::Inventory(vec!["ball".to_string()]))));
        assert!(events.contains(&GameEvent::Hud(HudCommand::ItemPrompt(None))));
        assert_eq!(session.inventory().items(), &["ball".to_string()]);
        assert!(session.world().scene.find_by_name("ball").is_none());
    }

    #[test]
    fn test_inspection_is_modal() {
        let mut config = config();
        config.items.inspectors = GameConfig::default()
            .items
            .inspectors
            .into_iter()
            .filter(|inspector| inspector.target == "note-02")
            .collect();
        let mut assets = assets();
        let mut house = interior();
        house.nodes.push(node("note-02", Vec3::new(36.0, 1.0, 3.0), None));
        assets.insert("interior.ron", house);

        let mut session = session_with(config, assets);
        run(&mut session, 6);
        enter_interior(&mut session);

        let events = press(&mut session, Actions::CONFIRM);
        assert!(events.contains(&GameEvent::Hud(HudCommand::Inspection(Some(
            "char/kitchen-note-pixel.png".to_string()
        )))));
        assert!(events.contains(&GameEvent::Audio(AudioCue::Effect(SoundEffect::Paper))));
        assert!(events.contains(&GameEvent::Hud(HudCommand::ItemPrompt(Some("Press Space to Exit".to_string())))));
        assert!(session.context().modal_active);

        let position = session.player().position;
        session.input.press(Actions::FORWARD);
        session.tick(DT);
        session.input.release(Actions::FORWARD);
        assert_eq!(session.player().position, position);

        let events = press(&mut session, Actions::CONFIRM);
        assert!(events.contains(&GameEvent::Hud(HudCommand::Inspection(None))));
        assert!(!session.context().modal_active);
    }

    #[test]
    fn test_footsteps_follow_region() {
        let mut session = playing();
        session.input.press(Actions::FORWARD);
        let events = session.tick(DT);
        assert!(events.contains(&GameEvent::Audio(AudioCue::Footsteps(Some(FootstepCategory::Outside)))));

        session.input.release(Actions::FORWARD);
        let events = session.tick(DT);
        assert!(events.contains(&GameEvent::Audio(AudioCue::Footsteps(None))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = config();
        config.lock.secret = "12".to_string();
        let result = Session::new(config, Box::new(assets()));
        assert!(matches!(result, Err(SessionError::Config(ConfigError::Invalid { .. }))));
    }

    #[test]
    fn test_reentering_house_rearms_sink_and_keeps_ball_collected() {
        let mut config = config();
        config.items.triggers.push(TriggerConfig {
            target: "sink-water".to_string(),
            radius: 3.5,
            prompt: "SPACE to turn off".to_string(),
            kind: TriggerKind::OneShot { effect: SoundEffect::SinkOff, animation: Some("water-drain".to_string()) },
        });
        let mut house = interior();
        house.nodes.push(node("sink-water", Vec3::new(36.0, 1.0, -6.0), None));
        let mut assets = assets();
        assets.insert("interior.ron", house);

        let mut session = session_with(config, assets);
        run(&mut session, 6);
        enter_interior(&mut session);

        session.player_mut().position = Vec3::new(34.0, 3.5, -1.0);
        press(&mut session, Actions::CONFIRM);
        assert_eq!(session.inventory().items(), &["ball".to_string()]);

        session.player_mut().position = Vec3::new(36.0, 3.5, -4.0);
        let events = press(&mut session, Actions::CONFIRM);
        assert!(events.contains(&GameEvent::Audio(AudioCue::Effect(SoundEffect::SinkOff))));
        assert!(events.contains(&GameEvent::PlayAnimation {
            target: "sink-water".to_string(),
            clip: "water-drain".to_string(),
        }));

        // Out through the front door and back in
        session.player_mut().position = Vec3::new(38.0, 3.5, 0.0);
        press(&mut session, Actions::CONFIRM);
        let events = run(&mut session, 6);
        assert!(events.contains(&GameEvent::RegionEntered(Region::Exterior)));
        enter_interior(&mut session);

        assert!(session.world().scene.find_by_name("ball").is_none());
        assert_eq!(session.inventory().items(), &["ball".to_string()]);

        session.player_mut().position = Vec3::new(36.0, 3.5, -4.0);
        let events = session.tick(DT);
        assert!(events.contains(&GameEvent::Hud(HudCommand::ItemPrompt(Some("SPACE to turn off".to_string())))));
        let events = press(&mut session, Actions::CONFIRM);
        assert!(events.contains(&GameEvent::Audio(AudioCue::Effect(SoundEffect::SinkOff))));
    }

    #[test]
    fn test_give_plays_receiver_animation() {
        let mut config = config();
        config.items.triggers.push(TriggerConfig {
            target: "dog".to_string(),
            radius: 2.0,
            prompt: "Give the ball".to_string(),
            kind: TriggerKind::Give { item: "ball".to_string(), animation: Some("receiveBall".to_string()) },
        });
        let mut house = interior();
        house.nodes.push(node("dog", Vec3::new(37.0, 0.0, -6.0), None));
        let mut assets = assets();
        assets.insert("interior.ron", house);

        let mut session = session_with(config, assets);
        run(&mut session, 6);
        enter_interior(&mut session);

        session.player_mut().position = Vec3::new(34.0, 3.5, -1.0);
        press(&mut session, Actions::CONFIRM);
        session.player_mut().position = Vec3::new(37.0, 3.5, -5.0);
        let events = press(&mut session, Actions::CONFIRM);

        assert!(events.contains(&GameEvent::Hud(HudCommand::Inventory(Vec::new()))));
        assert!(events.contains(&GameEvent::PlayAnimation {
            target: "dog".to_string(),
            clip: "receiveBall".to_string(),
        }));
        assert!(session.inventory().is_empty());
    }
}
