//! Clock abstraction so timestamp checks can run against a fixed "now".

use chrono::{DateTime, Utc};

/// Source of the current UTC time.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a single instant.
///
/// Useful in tests and when re-verifying archived deliveries against the
/// moment they were received.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Parse an RFC 3339 instant, returning `None` if it is not valid.
    pub fn from_rfc3339(s: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| Self::new(dt.with_timezone(&Utc)))
    }

    pub fn advance(&mut self, by: chrono::Duration) {
        self.now = self.now + by;
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn system_clock_is_current() {
        assert!(SystemClock.now_utc().year() >= 2024);
    }

    #[test]
    fn fixed_clock_does_not_move() {
        let clock = FixedClock::from_rfc3339("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(clock.now_utc(), clock.now_utc());
        assert_eq!(clock.now_utc().to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn fixed_clock_advances() {
        let mut clock = FixedClock::from_rfc3339("2024-01-01T00:00:00Z").unwrap();
        clock.advance(chrono::Duration::minutes(2));
        assert_eq!(clock.now_utc().to_rfc3339(), "2024-01-01T00:02:00+00:00");
    }

    #[test]
    fn fixed_clock_rejects_garbage() {
        assert!(FixedClock::from_rfc3339("yesterday").is_none());
    }
}
