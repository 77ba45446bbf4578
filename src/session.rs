use std::time::Instant;

/// Single-owner state machine for the solve clock.
///
/// Durations are the delta of two monotonic readings, so wall-clock
/// adjustments mid-solve cannot skew a recorded time. The live display
/// re-reads the same clock on every tick; only the reading captured at
/// [`TimerSession::stop`] gates what gets recorded.
#[derive(Debug, Default)]
pub struct TimerSession {
    started_at: Option<Instant>,
    last_ms: f64,
}

impl TimerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    /// Stop the clock and return the elapsed milliseconds, captured once.
    /// Returns `None` when no measurement was running.
    pub fn stop(&mut self) -> Option<u64> {
        let started = self.started_at.take()?;
        let elapsed = started.elapsed().as_secs_f64() * 1000.0;
        self.last_ms = elapsed;
        Some(elapsed.round() as u64)
    }

    /// Discard an in-progress measurement without recording it.
    pub fn abandon(&mut self) {
        self.started_at = None;
        self.last_ms = 0.0;
    }

    /// Milliseconds to show on the next display refresh.
    pub fn display_ms(&self) -> f64 {
        match self.started_at {
            Some(started) => started.elapsed().as_secs_f64() * 1000.0,
            None => self.last_ms,
        }
    }
}
