use std::time::Duration;

/// Port for blocking waits
///
/// The retry loop waits through this trait so that:
/// - production blocks the thread for real
/// - tests record the requested pauses without waiting
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}
