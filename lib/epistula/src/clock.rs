//!
//! Millisecond wall clock with a mockable variant
//!

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::{Duration, SystemTime},
};

/// Direction the mocked time should be moved in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeltaDirection {
    /// Move forward
    Add,

    /// Move backward
    Sub,
}

/// Handle to move the time of a mocked clock
#[derive(Clone, Debug)]
pub struct MockHandle {
    now: Arc<AtomicU64>,
}

impl MockHandle {
    /// Move the clock by the duration in the direction specified
    ///
    /// Saturates at the epoch and at `u64::MAX`
    #[allow(clippy::cast_possible_truncation)]
    pub fn adjust(&self, direction: DeltaDirection, delta: Duration) {
        let delta = delta.as_millis().min(u128::from(u64::MAX)) as u64;
        let _ = self
            .now
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |now| {
                Some(match direction {
                    DeltaDirection::Add => now.saturating_add(delta),
                    DeltaDirection::Sub => now.saturating_sub(delta),
                })
            });
    }

    /// Set the clock to an absolute timestamp
    pub fn set(&self, timestamp_ms: u64) {
        self.now.store(timestamp_ms, Ordering::Release);
    }
}

/// Clock reading milliseconds since the Unix epoch
///
/// The system clock is the default. A mocked clock is frozen until moved through its [`MockHandle`].
#[derive(Clone, Debug, Default)]
pub struct Clock {
    mocked: Option<Arc<AtomicU64>>,
}

impl Clock {
    /// Clock reading the system time
    #[must_use]
    pub fn system() -> Self {
        Self::default()
    }

    /// Construct a mocked clock, frozen at the current system time
    #[must_use]
    pub fn mockable() -> (Self, MockHandle) {
        let now = Arc::new(AtomicU64::new(system_now_ms()));

        let mock_handle = MockHandle {
            now: Arc::clone(&now),
        };
        let clock = Self { mocked: Some(now) };

        (clock, mock_handle)
    }

    /// Current time in milliseconds since the Unix epoch
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        match self.mocked {
            Some(ref now) => now.load(Ordering::Acquire),
            None => system_now_ms(),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn system_now_ms() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_or(0, |duration| duration.as_millis() as u64)
}
