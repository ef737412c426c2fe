//! Duplicate-submission lockout for checkout confirmation.

use crate::error::ComandaError;
use std::time::{Duration, Instant};

/// An in-flight flag that resets itself after a fixed lockout.
#[derive(Debug, Clone)]
pub struct CheckoutGuard {
    lockout: Duration,
    until: Option<Instant>,
}

impl CheckoutGuard {
    pub fn new(lockout: Duration) -> Self {
        Self {
            lockout,
            until: None,
        }
    }

    /// Whether a submission at `now` would be refused.
    pub fn is_locked(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    /// Start a submission, or refuse with `CheckoutInFlight` while locked.
    pub fn try_acquire(&mut self, now: Instant) -> Result<(), ComandaError> {
        if self.is_locked(now) {
            tracing::warn!("Refused: checkout already in flight");
            return Err(ComandaError::CheckoutInFlight);
        }
        self.until = Some(now + self.lockout);
        Ok(())
    }

    /// End the lockout early.
    pub fn release(&mut self) {
        self.until = None;
    }
}
