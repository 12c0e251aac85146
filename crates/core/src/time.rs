use chrono::{DateTime, Duration, Utc};

/// Where attempt timestamps come from.
///
/// `System` reads the wall clock. `Pinned` hands out the same instant until it
/// is stepped, so recorded attempts compare equal across test runs.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Pinned(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Pinned(at)
    }

    /// Timestamp to stamp on the next attempt.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Pinned(at) => *at,
        }
    }

    /// Step a pinned clock, e.g. to space out attempts in a test. The system
    /// clock moves on its own and ignores this.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Pinned(at) = self {
            *at += delta;
        }
    }
}

/// Unix seconds behind [`fixed_now`]: 2023-11-14T22:13:20Z.
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Attempt timestamp used throughout the test suites.
///
/// # Panics
///
/// Never in practice; the constant is well inside chrono's range.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("test timestamp is in range")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
