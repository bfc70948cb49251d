use super::address::{self, AddressError};
use crate::BoxError;
use miette::Diagnostic;
use schnorrkel::{ExpansionMode, MiniSecretKey, PublicKey};
use std::fmt;
use thiserror::Error;

/// Key construction error
#[derive(Debug, Diagnostic, Error)]
pub enum KeyError {
    /// Address couldn't be derived for the requested prefix
    #[error(transparent)]
    Address(#[from] AddressError),

    /// Seed wasn't valid hex
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),

    /// Seed has the wrong length
    #[error("Invalid seed")]
    InvalidSeed,
}

/// Trait representing a signing key
pub trait SigningKey {
    /// Address identifying the holder of this key
    fn address(&self) -> &str;

    /// Sign the message under the given signing context and return the raw signature bytes
    fn sign(&self, context: &[u8], msg: &[u8]) -> Result<Vec<u8>, BoxError>;
}

impl<K> SigningKey for &K
where
    K: SigningKey + ?Sized,
{
    fn address(&self) -> &str {
        (**self).address()
    }

    fn sign(&self, context: &[u8], msg: &[u8]) -> Result<Vec<u8>, BoxError> {
        (**self).sign(context, msg)
    }
}

/// sr25519 keypair together with its SS58 address
#[derive(Clone)]
pub struct Keypair {
    inner: schnorrkel::Keypair,
    address: String,
}

impl Keypair {
    fn from_inner(inner: schnorrkel::Keypair, prefix: u16) -> Result<Self, KeyError> {
        let address = address::encode(&inner.public, prefix)?;
        Ok(Self { inner, address })
    }

    /// Derive a keypair from a 32 byte mini secret key
    ///
    /// The expansion matches the one Substrate uses, so seeds produced by Substrate tooling resolve to the same address
    pub fn from_seed(seed: &[u8], prefix: u16) -> Result<Self, KeyError> {
        let mini_secret = MiniSecretKey::from_bytes(seed).map_err(|_| KeyError::InvalidSeed)?;
        Self::from_inner(mini_secret.expand_to_keypair(ExpansionMode::Ed25519), prefix)
    }

    /// Derive a keypair from a hex-encoded seed (with or without the `0x` prefix)
    pub fn from_seed_hex(seed: &str, prefix: u16) -> Result<Self, KeyError> {
        let seed = hex::decode(seed.strip_prefix("0x").unwrap_or(seed))?;
        Self::from_seed(&seed, prefix)
    }

    /// Generate a fresh keypair from OS randomness
    pub fn generate(prefix: u16) -> Result<Self, KeyError> {
        Self::from_inner(schnorrkel::Keypair::generate(), prefix)
    }

    /// Public half of the keypair
    #[must_use]
    pub fn public_key(&self) -> &PublicKey {
        &self.inner.public
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl SigningKey for Keypair {
    fn address(&self) -> &str {
        &self.address
    }

    fn sign(&self, context: &[u8], msg: &[u8]) -> Result<Vec<u8>, BoxError> {
        Ok(self.inner.sign_simple(context, msg).to_bytes().to_vec())
    }
}

#[cfg(test)]
mod test {
    use super::{KeyError, Keypair, SigningKey};
    use crate::crypto::address::DEFAULT_PREFIX;

    const ALICE_SEED: &str = "0xe5be9a5092b81bca64be81d212e7f2f9eba183bb7a90954f7b76361f6edb5c0a";

    #[test]
    fn seed_resolves_to_substrate_address() {
        let keypair = Keypair::from_seed_hex(ALICE_SEED, DEFAULT_PREFIX).unwrap();
        assert_eq!(
            keypair.address(),
            "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY"
        );
    }

    #[test]
    fn rejects_short_seed() {
        assert!(matches!(
            Keypair::from_seed(&[0; 16], DEFAULT_PREFIX),
            Err(KeyError::InvalidSeed)
        ));
        assert!(matches!(
            Keypair::from_seed_hex("0xnothex", DEFAULT_PREFIX),
            Err(KeyError::Hex(..))
        ));
    }

    #[test]
    fn debug_hides_secret() {
        let keypair = Keypair::generate(DEFAULT_PREFIX).unwrap();
        let debug = format!("{keypair:?}");

        assert!(debug.contains(keypair.address()));
        assert!(!debug.contains("secret"));
    }
}
