//!
//! Content commitment over request bodies
//!

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of the body
#[inline]
#[must_use]
pub fn content_hash(body: impl AsRef<[u8]>) -> String {
    hex::encode(Sha256::digest(body))
}
