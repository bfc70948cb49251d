//!
//! sr25519 signing, verification and SS58 addresses
//!

mod key;
mod signature;

pub mod address;

pub use self::{
    address::AddressError,
    key::{KeyError, Keypair, SigningKey},
    signature::{decode_signature, encode_signature, verify, SignatureDecodeError, VerifyError},
};
pub use schnorrkel::{PublicKey, Signature};

/// Signing context used by Substrate-based chains
pub const DEFAULT_SIGNING_CONTEXT: &str = "substrate";
