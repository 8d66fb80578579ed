// File: crates/chart-core/src/animation.rs
// Summary: Timed eased progress driver and the clock abstraction it reads time from.

use std::cell::Cell;
use std::f64::consts::PI;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    OutSine,
    InOutSine,
}

impl Easing {
    /// Map linear progress to eased progress. Input is clamped to `[0, 1]`.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::OutSine => (PI * t / 2.0).sin(),
            Easing::InOutSine => ((PI * t - PI / 2.0).sin() + 1.0) / 2.0,
        }
    }
}

/// Source of "now" for animations.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant { Instant::now() }
}

/// Clock that only moves when told to. Used for tests and offline frame rendering.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    pub fn new() -> Self { Self { now: Cell::new(Instant::now()) } }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self { Self::new() }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant { self.now.get() }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    /// Elapsed share of the duration, `[0, 1]`.
    pub linear: f64,
    /// `linear` run through the easing.
    pub tween: f64,
    pub done: bool,
}

/// One-shot timed easer. Starting it again replaces the running timeline.
#[derive(Clone, Debug)]
pub struct Animation {
    duration: Duration,
    easing: Easing,
    started_at: Option<Instant>,
}

impl Animation {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing, started_at: None }
    }

    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
    }

    pub fn stop(&mut self) {
        self.started_at = None;
    }

    pub fn is_running(&self) -> bool { self.started_at.is_some() }

    pub fn duration(&self) -> Duration { self.duration }

    /// Progress at `now`, or `None` when not running. The animation stops
    /// itself once it reports `done`.
    pub fn progress(&mut self, now: Instant) -> Option<Progress> {
        let started = self.started_at?;
        let linear = if self.duration.is_zero() {
            1.0
        } else {
            let elapsed = now.saturating_duration_since(started);
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        let done = linear >= 1.0;
        if done {
            self.started_at = None;
        }
        let tween = if done { 1.0 } else { self.easing.apply(linear) };
        Some(Progress { linear, tween, done })
    }
}
