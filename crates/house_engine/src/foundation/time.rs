//! Time management utilities
//!
//! [`Timer`] measures real frame time for the host loop. [`SimClock`] is the
//! session's own notion of "now": it only advances by the deltas fed to a
//! tick, which keeps cooldowns and timelines deterministic under test.

use std::time::Instant;

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame), returning the delta
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Session clock advanced once per tick
#[derive(Debug, Clone, Copy, Default)]
pub struct SimClock {
    now: f64,
    ticks: u64,
}

impl SimClock {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `delta` seconds; negative deltas are ignored
    pub fn advance(&mut self, delta: f32) {
        if delta > 0.0 {
            self.now += f64::from(delta);
        }
        self.ticks += 1;
    }

    /// Seconds since the session started
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Number of ticks processed
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// A point in session time before which something stays disarmed
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cooldown {
    ready_at: f64,
}

impl Cooldown {
    /// Arm the cooldown so it becomes ready `duration` seconds after `now`
    pub fn start(&mut self, now: f64, duration: f32) {
        self.ready_at = now + f64::from(duration.max(0.0));
    }

    /// Whether the cooldown has elapsed
    pub fn is_ready(&self, now: f64) -> bool {
        now >= self.ready_at
    }
}
