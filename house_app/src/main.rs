//! Scripted walkthrough
//!
//! Drives a full session headlessly: yard, front door, the living-room lock,
//! the corridor and the end door. Every event the session emits is logged, so
//! the run doubles as a smoke test for config and asset files.

use std::path::{Path, PathBuf};

use house_engine::foundation::logging;
use house_engine::foundation::time::Timer;
use house_engine::prelude::*;
use thiserror::Error;

/// Fixed simulation step; movement speeds are per tick
const FIXED_DT: f32 = 1.0 / 30.0;

const DEFAULT_CONFIG: &str = "config/game.toml";

/// Safety net for scripts that never reach the end
const MAX_TICKS: u64 = 20_000;

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("walkthrough did not finish within {0} ticks")]
    Stalled(u64),
}

/// One scripted input step
#[derive(Debug, Clone, Copy)]
enum Step {
    /// Hold actions for a number of ticks
    Hold(Actions, u32),
    /// Hold for one tick then release
    Press(Actions),
    /// Tick with nothing held
    Idle(u32),
}

impl Step {
    fn ticks(self) -> u32 {
        match self {
            Self::Hold(_, ticks) | Self::Idle(ticks) => ticks,
            Self::Press(_) => 1,
        }
    }

    fn actions(self) -> Actions {
        match self {
            Self::Hold(actions, _) | Self::Press(actions) => actions,
            Self::Idle(_) => Actions::empty(),
        }
    }
}

fn script() -> Vec<Step> {
    let mut steps = vec![
        // Start screen, instructions
        Step::Idle(30),
        Step::Press(Actions::CONFIRM),
        Step::Idle(2),
        Step::Press(Actions::CONFIRM),
        Step::Idle(2),
        // The front door is a step away from the yard spawn
        Step::Press(Actions::CONFIRM),
        Step::Idle(30),
        // Face the living room and walk up to its door
        Step::Hold(Actions::TURN_LEFT, 31),
        Step::Hold(Actions::FORWARD, 40),
        Step::Press(Actions::CONFIRM),
        Step::Idle(2),
    ];

    // Dial 4-0-3
    steps.extend([Step::Press(Actions::STRAFE_RIGHT), Step::Idle(1)].repeat(4));
    steps.extend([Step::Press(Actions::BACKWARD), Step::Idle(1)].repeat(2));
    steps.extend([Step::Press(Actions::STRAFE_RIGHT), Step::Idle(1)].repeat(3));
    steps.extend([
        Step::Press(Actions::CONFIRM),
        Step::Idle(30),
        // Walk the corridor long enough to recycle a segment
        Step::Hold(Actions::FORWARD, 400),
        // Turn round until the end door appears, then open it
        Step::Hold(Actions::TURN_LEFT, 63),
        Step::Idle(10),
        Step::Press(Actions::CONFIRM),
    ]);
    steps
}

/// Logs every event it sees without consuming it
struct EventLogger {
    label: &'static str,
}

impl EventHandler for EventLogger {
    fn on_event(&mut self, event: &GameEvent) -> bool {
        match event {
            GameEvent::Audio(AudioCue::Effect(effect)) => {
                log::info!("[{}] play {}", self.label, effect.file_name());
            }
            _ => log::info!("[{}] {event:?}", self.label),
        }
        false
    }
}

struct WalkthroughApp {
    session: Session,
    timer: Timer,
}

impl WalkthroughApp {
    fn new(config_path: Option<&Path>, asset_root: PathBuf) -> Result<Self, AppError> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                GameConfig::load_from_file(path)?
            }
            None => {
                log::info!("No config given, using defaults");
                GameConfig::default()
            }
        };

        log::info!("Reading regions from {}", asset_root.display());
        let mut session = Session::new(config, Box::new(RonAssetSource::new(asset_root)))?;

        let events = session.events_mut();
        events.register_handler(EventKind::Hud, Box::new(EventLogger { label: "hud" }));
        events.register_handler(EventKind::Audio, Box::new(EventLogger { label: "audio" }));
        events.register_handler(EventKind::Gameplay, Box::new(EventLogger { label: "gameplay" }));

        Ok(Self { session, timer: Timer::new() })
    }

    fn run(&mut self) -> Result<(), AppError> {
        let mut steps = script().into_iter();
        let mut current: Option<(Step, u32)> = None;

        while self.timer.frame_count() < MAX_TICKS {
            if current.map_or(true, |(step, done)| done >= step.ticks()) {
                current = steps.next().map(|step| (step, 0));
            }

            let actions = current.map_or(Actions::empty(), |(step, _)| step.actions());
            self.session.input.clear();
            self.session.input.press(actions);
            if let Some((_, done)) = current.as_mut() {
                *done += 1;
            }

            self.timer.update();
            let events = self.session.tick(FIXED_DT);
            if events.contains(&GameEvent::SessionEnded) || self.session.phase() == SessionPhase::Ended {
                log::info!(
                    "Walkthrough finished after {} ticks ({:.1}s simulated, {:.3}s wall)",
                    self.timer.frame_count(),
                    self.session.now(),
                    self.timer.total_time()
                );
                return Ok(());
            }
        }

        log::warn!("Session stuck in {:?} at {:?}", self.session.phase(), self.session.player().position);
        Err(AppError::Stalled(MAX_TICKS))
    }
}

fn main() {
    logging::init();

    let mut args = std::env::args().skip(1);
    let config_path = args
        .next()
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from(DEFAULT_CONFIG)).filter(|path| path.exists()));
    let asset_root = args.next().map_or_else(|| PathBuf::from("assets/regions"), PathBuf::from);

    let result = WalkthroughApp::new(config_path.as_deref(), asset_root).and_then(|mut app| app.run());
    if let Err(e) = result {
        log::error!("Walkthrough failed: {e}");
        std::process::exit(1);
    }
}
