//! Millisecond rate limiter.

/// Fires at most once per period.
///
/// The first call to [`ready`](Timer::ready) always fires. Later calls fire
/// once `period_ms` has elapsed since the last firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timer {
    period_ms: u32,
    last_ms: Option<u64>,
}

impl Timer {
    #[must_use]
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_ms: None,
        }
    }

    /// Build a timer from a rate in hertz. Zero yields a timer that always fires.
    #[must_use]
    pub const fn from_hz(hz: u32) -> Self {
        if hz == 0 {
            Self::new(0)
        } else {
            Self::new(1000 / hz)
        }
    }

    #[inline]
    #[must_use]
    pub const fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Returns `true` and restarts the period if it has elapsed at `now_ms`.
    pub fn ready(&mut self, now_ms: u64) -> bool {
        let due = match self.last_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= u64::from(self.period_ms),
        };
        if due {
            self.last_ms = Some(now_ms);
        }
        due
    }

    /// Make the next call to [`ready`](Self::ready) fire.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_fires() {
        let mut timer = Timer::new(100);
        assert!(timer.ready(5));
        assert!(!timer.ready(50));
        assert!(!timer.ready(104));
        assert!(timer.ready(105));
    }

    #[test]
    fn test_from_hz() {
        assert_eq!(Timer::from_hz(50).period_ms(), 20);
        assert_eq!(Timer::from_hz(20).period_ms(), 50);
        assert_eq!(Timer::from_hz(0).period_ms(), 0);
    }

    #[test]
    fn test_reset_fires_immediately() {
        let mut timer = Timer::new(2000);
        assert!(timer.ready(0));
        assert!(!timer.ready(10));
        timer.reset();
        assert!(timer.ready(10));
    }
}
