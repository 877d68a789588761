use std::time::Instant;

/// Frame timing snapshot threaded through `render`/`update`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameInfo {
    /// Timestamp of this frame in milliseconds.
    pub time: f64,
    /// Milliseconds since the previous frame. `0` on the first frame.
    pub elapsed: f32,
    /// Frame counter, `0` on the first frame.
    pub frame: u64,
    /// Instantaneous frames per second, `floor(1000 / elapsed)`.
    /// Reported as `0` when `elapsed` is zero.
    pub fps: u32,
}

/// Frame clock producing `FrameInfo` snapshots.
///
/// Owned per scene so independent scenes (and tests) never share timing state.
/// Elapsed time is not clamped: a long stall shows up as one long frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Instant,
    info: Option<FrameInfo>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { origin: Instant::now(), info: None }
    }

    /// Milliseconds since the clock was created.
    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    /// Last snapshot produced, if any frame has been ticked.
    pub fn info(&self) -> Option<FrameInfo> {
        self.info
    }

    /// Advances the clock using the monotonic wall clock.
    pub fn tick(&mut self) -> FrameInfo {
        let now = self.now();
        self.tick_at(now)
    }

    /// Advances the clock to the caller-supplied timestamp (milliseconds).
    ///
    /// The first call initializes `{time: now, elapsed: 0, frame: 0, fps: 0}`.
    pub fn tick_at(&mut self, now: f64) -> FrameInfo {
        let next = match self.info {
            None => FrameInfo { time: now, elapsed: 0.0, frame: 0, fps: 0 },
            Some(prev) => {
                let elapsed = (now - prev.time) as f32;
                FrameInfo {
                    time: now,
                    elapsed,
                    frame: prev.frame.wrapping_add(1),
                    fps: fps_for(elapsed),
                }
            }
        };

        self.info = Some(next);
        next
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

fn fps_for(elapsed: f32) -> u32 {
    if elapsed > 0.0 && elapsed.is_finite() {
        (1000.0 / elapsed).floor() as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successive_ticks_count_frames_and_measure_elapsed() {
        let mut clock = FrameClock::new();

        let a = clock.tick_at(1000.0);
        let b = clock.tick_at(1016.0);
        let c = clock.tick_at(1033.0);

        assert_eq!((a.frame, b.frame, c.frame), (0, 1, 2));
        assert_eq!((a.elapsed, b.elapsed, c.elapsed), (0.0, 16.0, 17.0));
        assert_eq!((b.fps, c.fps), (62, 58));
        assert_eq!(c.time, 1033.0);
    }

    #[test]
    fn first_tick_reports_zero_fps() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.info(), None);
        let first = clock.tick_at(5.0);
        assert_eq!(first.fps, 0);
        assert_eq!(clock.info(), Some(first));
    }

    #[test]
    fn zero_elapsed_does_not_divide_by_zero() {
        let mut clock = FrameClock::new();
        clock.tick_at(100.0);
        let same = clock.tick_at(100.0);
        assert_eq!(same.elapsed, 0.0);
        assert_eq!(same.fps, 0);
        assert_eq!(same.frame, 1);
    }

    #[test]
    fn wall_clock_ticks_are_monotonic() {
        let mut clock = FrameClock::new();
        let a = clock.tick();
        let b = clock.tick();
        assert!(b.time >= a.time);
        assert!(b.elapsed >= 0.0);
    }
}
