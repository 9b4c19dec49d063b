use std::thread;
use std::time::{Duration, Instant};

/// Caps the loop at a fixed frame rate by sleeping off whatever is left of each frame.
pub struct FrameClock {
    frame_duration: Duration,
    last_tick: Instant,
    throttle: bool,
}

impl FrameClock {
    pub fn new(frame_duration: Duration, throttle: bool) -> Self {
        FrameClock {
            frame_duration,
            last_tick: Instant::now(),
            throttle,
        }
    }

    /// Blocks until a full frame has passed since the previous tick and
    /// returns how long the frame actually took.
    pub fn tick(&mut self) -> Duration {
        let busy = self.last_tick.elapsed();
        if self.throttle && busy < self.frame_duration {
            thread::sleep(self.frame_duration - busy);
        }
        let now = Instant::now();
        let elapsed = now - self.last_tick;
        self.last_tick = now;
        elapsed
    }

    /// Blocking pause on the loop thread. Skipped when unthrottled.
    pub fn pause(&mut self, duration: Duration) {
        if self.throttle {
            thread::sleep(duration);
        }
    }
}
