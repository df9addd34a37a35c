use std::time::{Duration, Instant};

/// Wall-clock gate between simulation steps
///
/// eframe repaints on input events as well as on the scheduled timer, so a
/// repaint alone does not mean a frame is due.
#[derive(Debug, Clone)]
pub struct FramePacer {
    delay: Duration,
    last: Option<Instant>,
}

impl FramePacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, last: None }
    }

    /// True (and the clock restarts) once `delay` has passed since the last
    /// frame; the first call is always due
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.delay => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Time left until the next frame is due
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last {
            Some(last) => self.delay.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }
}
