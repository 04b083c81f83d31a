use std::time::Duration;

/// One-shot timer on the recognizer's virtual clock.
///
/// The recognizer never sleeps: the host reports time through event
/// timestamps or ticks, and an armed timer counts as elapsed once the clock
/// reaches its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CancellableTimer {
    deadline: Option<Duration>,
}

impl CancellableTimer {
    pub fn arm(&mut self, now: Duration, timeout: Duration) {
        self.deadline = Some(now.saturating_add(timeout));
    }

    /// Disarms the timer. Returns whether it was armed.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Disarms and returns `true` when `now` has reached the deadline.
    pub fn take_if_expired(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
