//! Frame pacing for the game loop
//!
//! The loop runs at a fixed rate by sleeping off whatever is left of each
//! frame's budget. Pauses (the win banner) are plain blocking sleeps.

use std::time::{Duration, Instant};

use crate::ui::Clock;

/// Sleeps to hold a fixed frame rate.
pub struct FrameClock {
    frame_duration: Duration,
    frame_start: Option<Instant>,
}

impl FrameClock {
    pub fn new(target_fps: u64) -> Self {
        Self {
            frame_duration: frame_duration(target_fps),
            frame_start: None,
        }
    }
}

pub fn frame_duration(target_fps: u64) -> Duration {
    let fps = u32::try_from(target_fps.max(1)).unwrap_or(u32::MAX);
    Duration::from_secs(1) / fps
}

/// How long to sleep so a frame that already took `elapsed` lasts `frame`.
fn remaining(frame: Duration, elapsed: Duration) -> Option<Duration> {
    frame.checked_sub(elapsed).filter(|d| !d.is_zero())
}

impl Clock for FrameClock {
    /// Call at the top of each loop iteration. The first call returns
    /// immediately; later calls sleep until a full frame has passed since
    /// the previous one.
    fn tick(&mut self) {
        if let Some(start) = self.frame_start {
            if let Some(wait) = remaining(self.frame_duration, start.elapsed()) {
                std::thread::sleep(wait);
            }
        }
        self.frame_start = Some(Instant::now());
    }

    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
        // Don't count the pause against the next frame
        self.frame_start = Some(Instant::now());
    }
}
