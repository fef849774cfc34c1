//! Fixed-rate frame pacing
//!
//! The viewer targets a constant frame rate without delta-time scaling. Each frame
//! start schedules the next one `interval` later; a frame that overruns its slot is
//! not caught up, the following deadline is simply measured from the late start.

use std::time::{Duration, Instant};

use log::debug;

/// How often the measured frame rate is reported
const REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// Schedules redraws at a fixed target rate
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    next_frame: Instant,
    frames_since_report: u32,
    last_report: Instant,
}

impl FramePacer {
    /// Creates a pacer whose first frame is due immediately
    ///
    /// A `target_fps` of zero is treated as one frame per second.
    pub fn new(target_fps: u32, now: Instant) -> Self {
        let interval = Duration::from_secs(1) / target_fps.max(1);
        Self {
            interval,
            next_frame: now,
            frames_since_report: 0,
            last_report: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the next frame may start at `now`
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    /// The instant the next frame becomes due
    pub fn deadline(&self) -> Instant {
        self.next_frame
    }

    /// Records a frame starting at `now` and schedules the next one
    pub fn frame_started(&mut self, now: Instant) {
        self.next_frame = now + self.interval;

        self.frames_since_report += 1;
        let elapsed = now.saturating_duration_since(self.last_report);
        if elapsed >= REPORT_INTERVAL {
            debug!(
                "{:.1} fps over the last {:.1}s",
                self.frames_since_report as f64 / elapsed.as_secs_f64(),
                elapsed.as_secs_f64()
            );
            self.frames_since_report = 0;
            self.last_report = now;
        }
    }
}
