//! Start-of-run timestamp shared by the API client and the page footer.

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// Immutable record of when a run began.
///
/// The CLI captures one per process; the server captures one per request,
/// so elapsed times and quota windows are measured from the request start.
#[derive(Debug, Clone, Copy)]
pub struct RunContext {
    started_at: DateTime<Utc>,
    started: Instant,
}

impl RunContext {
    /// Capture the current time
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }

    /// Build a context from an explicit wall-clock start
    pub fn at(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            started: Instant::now(),
        }
    }

    /// Wall-clock time since the run started
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Time from the run start until the given Unix timestamp (seconds,
    /// fractional allowed). Timestamps in the past give zero.
    pub fn until_unix(&self, timestamp: f64) -> Option<Duration> {
        if !timestamp.is_finite() {
            return None;
        }
        let secs = timestamp.trunc() as i64;
        let nanos = (timestamp.fract() * 1e9) as u32;
        let target = DateTime::from_timestamp(secs, nanos)?;
        Some((target - self.started_at).to_std().unwrap_or(Duration::ZERO))
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::start()
    }
}
