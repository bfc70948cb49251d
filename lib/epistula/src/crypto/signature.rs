use miette::Diagnostic;
use schnorrkel::{PublicKey, Signature};
use thiserror::Error;

const HEX_PREFIX: &str = "0x";

/// Signature decoding error
#[derive(Debug, Diagnostic, Error)]
pub enum SignatureDecodeError {
    /// Not valid hex
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),

    /// Wrong length or not an sr25519 signature
    #[error("Invalid signature")]
    InvalidSignature,

    /// The `0x` prefix is missing
    #[error("Missing \"0x\" prefix")]
    MissingPrefix,
}

/// Verification error
#[derive(Debug, Diagnostic, Error)]
pub enum VerifyError {
    /// Verification failed
    #[error("Verification failed")]
    Verification,
}

/// Encode a signature as lowercase hex with a `0x` prefix
#[inline]
pub fn encode_signature(signature: impl AsRef<[u8]>) -> String {
    let mut encoded = String::from(HEX_PREFIX);
    encoded.push_str(&hex::encode(signature));
    encoded
}

/// Decode a hex-encoded signature
///
/// If `require_prefix` is false, the `0x` prefix is stripped when present and tolerated when not
pub fn decode_signature(
    encoded: &str,
    require_prefix: bool,
) -> Result<Signature, SignatureDecodeError> {
    let hex_encoded = match encoded.strip_prefix(HEX_PREFIX) {
        Some(stripped) => stripped,
        None if require_prefix => return Err(SignatureDecodeError::MissingPrefix),
        None => encoded,
    };

    let raw = hex::decode(hex_encoded)?;
    Signature::from_bytes(&raw).map_err(|_| SignatureDecodeError::InvalidSignature)
}

/// Verify that the message corresponds with the signature under the given signing context
#[inline]
pub fn verify(
    context: &[u8],
    msg: &[u8],
    signature: &Signature,
    key: &PublicKey,
) -> Result<(), VerifyError> {
    key.verify_simple(context, msg, signature)
        .map_err(|_| VerifyError::Verification)
}
