//!
//! Canonical message construction and time window derivation
//!

use std::fmt::Write;

/// Size of one time window bucket
pub const TIME_WINDOW_MS: u64 = 10_000;

/// Build the exact string that gets signed for a request
///
/// `{content_hash}.{request_id}.{timestamp}.{receiver}`
#[must_use]
pub fn canonical_message(
    content_hash: &str,
    request_id: &str,
    timestamp_ms: u64,
    receiver_address: &str,
) -> String {
    let mut message = String::with_capacity(
        content_hash.len() + request_id.len() + receiver_address.len() + 24,
    );
    let _ = write!(
        message,
        "{content_hash}.{request_id}.{timestamp_ms}.{receiver_address}"
    );

    message
}

/// Coarse quantisation of a timestamp into 10 second buckets
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeWindow(pub u64);

impl TimeWindow {
    /// `ceil(timestamp / 10_000)`
    #[must_use]
    pub fn from_timestamp(timestamp_ms: u64) -> Self {
        Self(timestamp_ms.div_ceil(TIME_WINDOW_MS))
    }

    /// The previous, current and next window
    ///
    /// The previous window saturates at zero
    #[must_use]
    pub fn adjacent(self) -> [Self; 3] {
        [
            Self(self.0.saturating_sub(1)),
            self,
            Self(self.0.saturating_add(1)),
        ]
    }

    /// Message signed for the secret signature of this window
    #[must_use]
    pub fn secret_message(self, sender_address: &str) -> String {
        format!("{}.{sender_address}", self.0)
    }
}
