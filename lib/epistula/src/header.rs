//!
//! Wire representation of the authentication headers
//!

use crate::{Error, Result, PROTOCOL_VERSION};
use http::{
    header::{CONNECTION, CONTENT_TYPE},
    HeaderMap, HeaderName, HeaderValue,
};

/// `Epistula-Version`
pub const VERSION: &str = "Epistula-Version";
/// `Epistula-Timestamp`
pub const TIMESTAMP: &str = "Epistula-Timestamp";
/// `Epistula-Uuid`
pub const UUID: &str = "Epistula-Uuid";
/// `Epistula-Signed-By`
pub const SIGNED_BY: &str = "Epistula-Signed-By";
/// `Epistula-Signed-For`
pub const SIGNED_FOR: &str = "Epistula-Signed-For";
/// `Epistula-Request-Signature`
pub const REQUEST_SIGNATURE: &str = "Epistula-Request-Signature";
/// `Epistula-Secret-Signature-{0,1,2}`
pub const SECRET_SIGNATURES: [&str; 3] = [
    "Epistula-Secret-Signature-0",
    "Epistula-Secret-Signature-1",
    "Epistula-Secret-Signature-2",
];

const CONTENT_TYPE_VALUE: &str = "application/json";
const CONNECTION_VALUE: &str = "keep-alive";

static VERSION_HEADER: HeaderName = HeaderName::from_static("epistula-version");
static TIMESTAMP_HEADER: HeaderName = HeaderName::from_static("epistula-timestamp");
static UUID_HEADER: HeaderName = HeaderName::from_static("epistula-uuid");
static SIGNED_BY_HEADER: HeaderName = HeaderName::from_static("epistula-signed-by");
static SIGNED_FOR_HEADER: HeaderName = HeaderName::from_static("epistula-signed-for");
static REQUEST_SIGNATURE_HEADER: HeaderName =
    HeaderName::from_static("epistula-request-signature");
static SECRET_SIGNATURE_HEADERS: [HeaderName; 3] = [
    HeaderName::from_static("epistula-secret-signature-0"),
    HeaderName::from_static("epistula-secret-signature-1"),
    HeaderName::from_static("epistula-secret-signature-2"),
];

/// Authentication headers produced for a single request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthHeaders {
    /// Request creation time in milliseconds since the Unix epoch
    pub timestamp: u64,

    /// Per-request nonce
    pub uuid: String,

    /// Address of the sender
    pub signed_by: String,

    /// Address of the intended recipient
    pub signed_for: String,

    /// `0x`-prefixed signature over the canonical message
    pub request_signature: String,

    /// `0x`-prefixed signatures over the previous, current and next time window
    pub secret_signatures: [String; 3],
}

impl AuthHeaders {
    /// Iterate over the header names and values in wire order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, String)> + '_ {
        let fixed = [
            (VERSION, PROTOCOL_VERSION.to_string()),
            (TIMESTAMP, self.timestamp.to_string()),
            (UUID, self.uuid.clone()),
            (SIGNED_BY, self.signed_by.clone()),
            (SIGNED_FOR, self.signed_for.clone()),
            (REQUEST_SIGNATURE, self.request_signature.clone()),
        ];
        let secrets = SECRET_SIGNATURES
            .into_iter()
            .zip(self.secret_signatures.iter().cloned());
        let transport = [
            ("Content-Type", CONTENT_TYPE_VALUE.to_string()),
            ("Connection", CONNECTION_VALUE.to_string()),
        ];

        fixed.into_iter().chain(secrets).chain(transport)
    }

    /// Convert into a header map
    ///
    /// Fails if one of the addresses contains characters that aren't allowed in header values
    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(11);
        map.insert(
            VERSION_HEADER.clone(),
            HeaderValue::from_static(PROTOCOL_VERSION),
        );
        map.insert(TIMESTAMP_HEADER.clone(), HeaderValue::from(self.timestamp));
        map.insert(UUID_HEADER.clone(), HeaderValue::from_str(&self.uuid)?);
        map.insert(
            SIGNED_BY_HEADER.clone(),
            HeaderValue::from_str(&self.signed_by)?,
        );
        map.insert(
            SIGNED_FOR_HEADER.clone(),
            HeaderValue::from_str(&self.signed_for)?,
        );
        map.insert(
            REQUEST_SIGNATURE_HEADER.clone(),
            HeaderValue::from_str(&self.request_signature)?,
        );

        for (name, value) in SECRET_SIGNATURE_HEADERS.iter().zip(&self.secret_signatures) {
            map.insert(name.clone(), HeaderValue::from_str(value)?);
        }

        map.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_VALUE));
        map.insert(CONNECTION, HeaderValue::from_static(CONNECTION_VALUE));

        Ok(map)
    }

    /// Stamp the headers onto an outgoing request, overwriting existing values
    pub fn apply_to<B>(&self, request: &mut http::Request<B>) -> Result<()> {
        request.headers_mut().extend(self.to_header_map()?);
        Ok(())
    }
}

/// Claimed authentication data of a received request
#[derive(Clone, Copy, Debug)]
pub struct VerifyRequest<'a> {
    /// `0x`-prefixed primary signature
    pub signature: &'a str,

    /// Raw request body
    pub body: &'a [u8],

    /// Timestamp as received on the wire
    pub timestamp: &'a str,

    /// Per-request nonce
    pub uuid: &'a str,

    /// Claimed recipient
    pub signed_for: &'a str,

    /// Claimed sender
    pub signed_by: &'a str,
}

fn required<'a>(
    headers: &'a HeaderMap,
    name: &HeaderName,
    display: &'static str,
) -> Result<&'a str> {
    headers
        .get(name)
        .ok_or(Error::MissingHeader(display))?
        .to_str()
        .map_err(Error::from)
}

impl<'a> VerifyRequest<'a> {
    /// Extract the claimed authentication data from received headers
    pub fn from_headers(headers: &'a HeaderMap, body: &'a [u8]) -> Result<Self> {
        let version = required(headers, &VERSION_HEADER, VERSION)?;
        if version != PROTOCOL_VERSION {
            return Err(Error::UnsupportedVersion(version.to_string()));
        }

        Ok(Self {
            signature: required(headers, &REQUEST_SIGNATURE_HEADER, REQUEST_SIGNATURE)?,
            body,
            timestamp: required(headers, &TIMESTAMP_HEADER, TIMESTAMP)?,
            uuid: required(headers, &UUID_HEADER, UUID)?,
            signed_for: required(headers, &SIGNED_FOR_HEADER, SIGNED_FOR)?,
            signed_by: required(headers, &SIGNED_BY_HEADER, SIGNED_BY)?,
        })
    }
}

/// Read one of the secret signatures from received headers
pub fn secret_signature(headers: &HeaderMap, index: usize) -> Result<Option<&str>> {
    let Some(name) = SECRET_SIGNATURE_HEADERS.get(index) else {
        return Ok(None);
    };

    headers
        .get(name)
        .map(|value| value.to_str().map_err(Error::from))
        .transpose()
}
