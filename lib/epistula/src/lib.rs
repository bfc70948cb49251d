//!
//! Epistula request signing
//!
//! Proves that a request body was produced by the holder of an sr25519 key, addressed to a specific
//! recipient, within a bounded recent time window. No handshake, no session.
//!

#![deny(rust_2018_idioms)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

use std::error::Error as StdError;

pub use self::{
    clock::{Clock, DeltaDirection, MockHandle},
    config::Configuration,
    crypto::{Keypair, SigningKey},
    error::Error,
    header::{AuthHeaders, VerifyRequest},
    sign::Signer,
    verify::Verifier,
};

pub mod clock;
pub mod config;
pub mod crypto;
pub mod digest;
#[cfg(feature = "easy")]
pub mod easy;
pub mod header;
pub mod message;

mod error;
mod sign;
mod verify;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Result type used throughout the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Protocol version emitted in the `Epistula-Version` header
pub const PROTOCOL_VERSION: &str = "2";

/// Generate the authentication headers for a request using the default configuration
#[inline]
pub fn generate_headers<K>(key: &K, receiver_address: &str, body: &[u8]) -> Result<AuthHeaders>
where
    K: SigningKey + ?Sized,
{
    Signer::default().generate(key, receiver_address, body)
}

/// Verify a request using the default configuration and the system clock
///
/// `self_address` is the address of the party running the verification. It, not `signed_for`,
/// is what gets embedded into the reconstructed message.
#[inline]
pub fn verify_headers(
    self_address: &str,
    signature: &str,
    body: &[u8],
    timestamp: &str,
    uuid: &str,
    signed_for: &str,
    signed_by: &str,
) -> Result<()> {
    let request = VerifyRequest {
        signature,
        body,
        timestamp,
        uuid,
        signed_for,
        signed_by,
    };

    Verifier::default().verify(self_address, &request)
}
