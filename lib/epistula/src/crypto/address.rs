//!
//! SS58 address encoding
//!
//! `base58(prefix ‖ public key ‖ checksum)`, where the checksum is the first two bytes of
//! `blake2b-512("SS58PRE" ‖ prefix ‖ public key)`
//!

use blake2::{Blake2b512, Digest};
use miette::Diagnostic;
use schnorrkel::{PublicKey, PUBLIC_KEY_LENGTH};
use thiserror::Error;

const CHECKSUM_DOMAIN: &[u8] = b"SS58PRE";
const CHECKSUM_LENGTH: usize = 2;

/// Generic Substrate prefix
pub const DEFAULT_PREFIX: u16 = 42;

/// Address error
#[derive(Debug, Diagnostic, Error)]
pub enum AddressError {
    /// Not valid base58
    #[error(transparent)]
    Base58(#[from] bs58::decode::Error),

    /// Checksum doesn't match the payload
    #[error("Checksum mismatch")]
    ChecksumMismatch,

    /// Decoded payload has the wrong size
    #[error("Invalid address length")]
    InvalidLength,

    /// Prefix is reserved or out of range
    #[error("Invalid address prefix")]
    InvalidPrefix,

    /// Payload isn't a valid sr25519 public key
    #[error("Invalid public key")]
    InvalidPublicKey,
}

#[inline]
fn checksum(payload: &[u8]) -> impl AsRef<[u8]> {
    let mut hasher = Blake2b512::new();
    hasher.update(CHECKSUM_DOMAIN);
    hasher.update(payload);
    hasher.finalize()
}

#[allow(clippy::cast_possible_truncation)]
fn encode_prefix(prefix: u16) -> Result<Vec<u8>, AddressError> {
    match prefix {
        46 | 47 => Err(AddressError::InvalidPrefix),
        0..=63 => Ok(vec![prefix as u8]),
        64..=16_383 => {
            let first = (((prefix & 0b1111_1100) >> 2) as u8) | 0b0100_0000;
            let second = ((prefix >> 8) as u8) | (((prefix & 0b11) as u8) << 6);

            Ok(vec![first, second])
        }
        _ => Err(AddressError::InvalidPrefix),
    }
}

fn decode_prefix(data: &[u8]) -> Result<(u16, usize), AddressError> {
    let (prefix, length) = match data {
        [first @ 0..=63, ..] => (u16::from(*first), 1),
        [first @ 64..=127, second, ..] => {
            let lower = (first << 2) | (second >> 6);
            let upper = second & 0b0011_1111;

            (u16::from(lower) | (u16::from(upper) << 8), 2)
        }
        [] | [_] => return Err(AddressError::InvalidLength),
        _ => return Err(AddressError::InvalidPrefix),
    };

    if matches!(prefix, 46 | 47) {
        return Err(AddressError::InvalidPrefix);
    }

    Ok((prefix, length))
}

/// Encode a public key into its SS58 address under the given network prefix
pub fn encode(public_key: &PublicKey, prefix: u16) -> Result<String, AddressError> {
    let mut payload = encode_prefix(prefix)?;
    payload.extend_from_slice(&public_key.to_bytes());

    let digest = checksum(&payload);
    payload.extend_from_slice(&digest.as_ref()[..CHECKSUM_LENGTH]);

    Ok(bs58::encode(payload).into_string())
}

/// Decode an SS58 address into its public key and network prefix
pub fn decode(address: &str) -> Result<(PublicKey, u16), AddressError> {
    let data = bs58::decode(address).into_vec()?;
    let (prefix, prefix_length) = decode_prefix(&data)?;

    if data.len() != prefix_length + PUBLIC_KEY_LENGTH + CHECKSUM_LENGTH {
        return Err(AddressError::InvalidLength);
    }

    let (payload, expected_checksum) = data.split_at(data.len() - CHECKSUM_LENGTH);
    if checksum(payload).as_ref()[..CHECKSUM_LENGTH] != *expected_checksum {
        return Err(AddressError::ChecksumMismatch);
    }

    let public_key = PublicKey::from_bytes(&payload[prefix_length..])
        .map_err(|_| AddressError::InvalidPublicKey)?;

    Ok((public_key, prefix))
}

#[cfg(test)]
mod test {
    use super::{decode, encode, AddressError, DEFAULT_PREFIX};
    use schnorrkel::PublicKey;

    const ALICE_PUBLIC_KEY: &str =
        "d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";
    const ALICE_ADDRESS: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

    fn alice() -> PublicKey {
        PublicKey::from_bytes(&hex::decode(ALICE_PUBLIC_KEY).unwrap()).unwrap()
    }

    #[test]
    fn encode_known_address() {
        assert_eq!(encode(&alice(), DEFAULT_PREFIX).unwrap(), ALICE_ADDRESS);
    }

    #[test]
    fn decode_known_address() {
        let (public_key, prefix) = decode(ALICE_ADDRESS).unwrap();

        assert_eq!(prefix, DEFAULT_PREFIX);
        assert_eq!(hex::encode(public_key.to_bytes()), ALICE_PUBLIC_KEY);
    }

    #[test]
    fn two_byte_prefix() {
        for prefix in [64, 255, 1337, 16_383] {
            let address = encode(&alice(), prefix).unwrap();
            let (public_key, decoded_prefix) = decode(&address).unwrap();

            assert_eq!(decoded_prefix, prefix);
            assert_eq!(public_key, alice());
        }
    }

    #[test]
    fn reserved_prefix() {
        assert!(matches!(
            encode(&alice(), 46),
            Err(AddressError::InvalidPrefix)
        ));
        assert!(matches!(
            encode(&alice(), 16_384),
            Err(AddressError::InvalidPrefix)
        ));
    }

    #[test]
    fn checksum_mismatch() {
        // Swap the last character for a different base58 digit
        let mut tampered = ALICE_ADDRESS.to_string();
        tampered.pop();
        tampered.push('Z');

        assert!(matches!(
            decode(&tampered),
            Err(AddressError::ChecksumMismatch)
        ));
    }

    #[test]
    fn not_base58() {
        assert!(matches!(decode("0OIl"), Err(AddressError::Base58(..))));
        assert!(matches!(decode(""), Err(AddressError::InvalidLength)));
    }
}
