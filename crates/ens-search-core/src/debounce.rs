use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Trailing-edge debouncer. Callers pass the current time in, so it can be
/// driven by an event loop tick or by a test.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// (Re)arm; any earlier pending deadline is pushed back.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// True exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_quiet_period() {
        let t0 = Instant::now();
        let mut d = Debouncer::default();
        d.trigger(t0);
        assert!(!d.poll(t0 + Duration::from_millis(100)));
        // another keystroke pushes the deadline back
        d.trigger(t0 + Duration::from_millis(200));
        assert!(!d.poll(t0 + Duration::from_millis(300)));
        assert!(d.poll(t0 + Duration::from_millis(450)));
        assert!(!d.poll(t0 + Duration::from_millis(900)));
        assert!(!d.is_pending());
    }

    #[test]
    fn cancel_drops_pending_fire() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(Duration::from_millis(10));
        d.trigger(t0);
        d.cancel();
        assert!(!d.poll(t0 + Duration::from_secs(1)));
    }
}
