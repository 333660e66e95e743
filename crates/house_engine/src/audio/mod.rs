//! Audio intents
//!
//! The core never plays sound. It emits [`AudioCue`]s naming what should be
//! heard, and the host's audio backend decides how.

use serde::{Deserialize, Serialize};

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundEffect {
    /// A door swinging open
    DoorOpen,
    /// The lock accepting a code
    UnlockSuccess,
    /// The lock rejecting a code
    UnlockFailure,
    /// Knocking behind the corridor's end
    Knock,
    /// Paper rustle when reading a note
    Paper,
    /// Pill bottle rattle
    Pills,
    /// Tap turning off
    SinkOff,
}

impl SoundEffect {
    /// File name the shipped audio backend plays for this effect
    pub fn file_name(self) -> &'static str {
        match self {
            Self::DoorOpen => "door-open.mp3",
            Self::UnlockSuccess => "unlock-success.mp3",
            Self::UnlockFailure => "unlock-failure.mp3",
            Self::Knock => "knock.mp3",
            Self::Paper => "paper.wav",
            Self::Pills => "pills.wav",
            Self::SinkOff => "sink-off.wav",
        }
    }
}

/// Looping footstep surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FootstepCategory {
    /// Grass and gravel in the yard
    Outside,
    /// Floorboards in the house
    Inside,
    /// The corridor's carpet
    Hallway,
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    /// Played from the start screen until the corridor
    Main,
    /// Played inside the corridor
    Hallway,
}

/// Outbound audio intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// Play a one-shot effect
    Effect(SoundEffect),
    /// Switch the footstep loop; `None` stops it
    Footsteps(Option<FootstepCategory>),
    /// Start a theme
    ThemeStart(Theme),
    /// Stop a theme
    ThemeStop(Theme),
}

/// Remembers the active footstep loop so cues are only emitted on change
#[derive(Debug, Default)]
pub struct FootstepTracker {
    current: Option<FootstepCategory>,
}

impl FootstepTracker {
    /// Create a tracker with footsteps stopped
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the loop that should be playing now
    pub fn update(&mut self, desired: Option<FootstepCategory>) -> Option<AudioCue> {
        if desired == self.current {
            return None;
        }
        self.current = desired;
        Some(AudioCue::Footsteps(desired))
    }

    /// Loop currently playing
    pub fn current(&self) -> Option<FootstepCategory> {
        self.current
    }
}
