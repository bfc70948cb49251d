#![allow(missing_docs)]

use crate::{
    crypto::{AddressError, SignatureDecodeError},
    BoxError,
};
use http::header::{InvalidHeaderValue, ToStrError};
use miette::Diagnostic;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    #[error("Worker pool dropped the task")]
    #[diagnostic(code(epistula::blocking))]
    Blocking,

    #[error("Request timestamp lies {ahead_ms}ms in the future (allowed: {max_skew_ms}ms)")]
    #[diagnostic(code(epistula::future_request))]
    FutureRequest { ahead_ms: u64, max_skew_ms: u64 },

    #[error(transparent)]
    HeaderToStr(#[from] ToStrError),

    #[error(transparent)]
    InvalidHeaderValue(#[from] InvalidHeaderValue),

    #[error("Invalid timestamp")]
    #[diagnostic(code(epistula::invalid_timestamp))]
    InvalidTimestamp(#[source] ParseIntError),

    #[error("Malformed signature")]
    #[diagnostic(code(epistula::malformed_signature))]
    MalformedSignature(#[from] SignatureDecodeError),

    #[error("Timestamp isn't in canonical decimal form: {0}")]
    #[diagnostic(
        code(epistula::non_canonical_timestamp),
        help("signed timestamps have no sign, no leading zeros and no padding")
    )]
    NonCanonicalTimestamp(String),

    #[error("Missing header: {0}")]
    #[diagnostic(code(epistula::missing_header))]
    MissingHeader(&'static str),

    #[error("Signature doesn't match the request")]
    #[diagnostic(
        code(epistula::signature_mismatch),
        help("the body, timestamp, uuid or recipient differ from what the sender signed")
    )]
    SignatureMismatch,

    #[error("Failed to sign message")]
    #[diagnostic(code(epistula::signing))]
    Signing(#[source] BoxError),

    #[error("Request is {age_ms}ms old (allowed: {max_age_ms}ms)")]
    #[diagnostic(code(epistula::stale_request))]
    StaleRequest { age_ms: u64, max_age_ms: u64 },

    #[error("Unknown address")]
    #[diagnostic(code(epistula::unknown_address))]
    UnknownAddress(#[from] AddressError),

    #[error("Unsupported protocol version: {0}")]
    #[diagnostic(code(epistula::unsupported_version))]
    UnsupportedVersion(String),
}
