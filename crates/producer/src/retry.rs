//! Backpressure retry policy
//!
//! A full destination is retried at a fixed interval. The default policy has
//! no attempt cap and no timeout: the producer blocks until the destination
//! drains. A cap turns a persistently full destination into an abandoned
//! record instead of an indefinite wait.

use courier_ports::Sleeper;
use std::time::Duration;

const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
const DEFAULT_PROGRESS_EVERY: u64 = 10;

/// Fixed-interval retry policy for resource-full puts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Pause before each resubmission
    pub poll_interval: Duration,
    /// Emit a progress notice every N retries (0 disables)
    pub progress_every: u64,
    /// Retries allowed per record before it is abandoned
    pub max_attempts: Option<u64>,
    /// Cumulative wait allowed per record before it is abandoned
    pub timeout: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::unbounded(Duration::from_millis(DEFAULT_POLL_INTERVAL_MS))
    }
}

impl RetryPolicy {
    /// Retry forever at `poll_interval`
    pub fn unbounded(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            progress_every: DEFAULT_PROGRESS_EVERY,
            max_attempts: None,
            timeout: None,
        }
    }

    pub fn with_progress_every(mut self, every: u64) -> Self {
        self.progress_every = every;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// True when a cap of any kind is set
    pub fn is_bounded(&self) -> bool {
        self.max_attempts.is_some() || self.timeout.is_some()
    }

    /// Whether the retry numbered `retries` gets a progress notice
    pub fn should_report(&self, retries: u64) -> bool {
        self.progress_every > 0 && retries > 0 && retries % self.progress_every == 0
    }

    /// Whether another retry is allowed after `retries` have been made
    ///
    /// Time is counted as the sum of poll intervals already waited, so the
    /// decision does not depend on how long each put takes.
    pub fn allows_retry(&self, retries: u64) -> bool {
        if self.max_attempts.is_some_and(|max| retries >= max) {
            return false;
        }
        if let Some(timeout) = self.timeout {
            let waited = self.poll_interval.saturating_mul(clamp_u32(retries));
            if waited >= timeout {
                return false;
            }
        }
        true
    }
}

fn clamp_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Real sleeper: blocks the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
