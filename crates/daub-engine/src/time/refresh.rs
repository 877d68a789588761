use std::thread;
use std::time::{Duration, Instant};

use crate::config::SceneConfig;
use crate::input::InputEvent;

/// Source of display-refresh opportunities for a scene loop.
///
/// The loop is cooperative and single-threaded: `next_frame` blocks until the
/// next opportunity, then the scene dispatches any input returned by
/// `drain_input` and renders one frame.
pub trait RefreshSource {
    /// Waits for the next refresh and returns its timestamp in milliseconds.
    fn next_frame(&mut self) -> f64;

    /// Input received since the previous frame, in arrival order.
    fn drain_input(&mut self) -> Vec<InputEvent> {
        Vec::new()
    }
}

/// Fixed-interval refresh used when no native refresh signal is available.
///
/// Input pushed with [`TimerRefresh::push_input`] is handed to the scene at
/// the start of the next frame.
#[derive(Debug)]
pub struct TimerRefresh {
    interval: Duration,
    origin: Instant,
    deadline: Instant,
    pending: Vec<InputEvent>,
}

impl TimerRefresh {
    /// Creates a timer targeting `fps` iterations per second (at least 1).
    pub fn new(fps: u32) -> Self {
        let interval = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
        let origin = Instant::now();
        Self { interval, origin, deadline: origin, pending: Vec::new() }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.target_fps)
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Queues an input event for delivery on the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.pending.push(event);
    }
}

impl Default for TimerRefresh {
    fn default() -> Self {
        Self::new(60)
    }
}

impl RefreshSource for TimerRefresh {
    fn next_frame(&mut self) -> f64 {
        let now = Instant::now();
        if self.deadline > now {
            thread::sleep(self.deadline - now);
        }

        // Skip missed deadlines instead of bursting to catch up.
        let now = Instant::now();
        self.deadline += self.interval;
        if self.deadline < now {
            self.deadline = now + self.interval;
        }

        now.saturating_duration_since(self.origin).as_secs_f64() * 1000.0
    }

    fn drain_input(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }
}
