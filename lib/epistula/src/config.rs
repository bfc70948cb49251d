//!
//! Protocol configuration
//!

use crate::crypto::{address::DEFAULT_PREFIX, DEFAULT_SIGNING_CONTEXT};
use serde::Deserialize;

/// Maximum age of a request before it's considered stale
pub const DEFAULT_MAX_REQUEST_AGE_MS: u64 = 8000;

fn default_signing_context() -> String {
    DEFAULT_SIGNING_CONTEXT.into()
}

fn default_ss58_prefix() -> u16 {
    DEFAULT_PREFIX
}

fn default_max_request_age_ms() -> u64 {
    DEFAULT_MAX_REQUEST_AGE_MS
}

fn default_require_signature_prefix() -> bool {
    true
}

/// Configuration shared by the signer and the verifier
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    /// Domain separation tag mixed into every signature
    #[serde(default = "default_signing_context")]
    pub signing_context: String,

    /// SS58 prefix used when encoding addresses of generated keypairs
    #[serde(default = "default_ss58_prefix")]
    pub ss58_prefix: u16,

    /// Requests older than this are rejected
    #[serde(default = "default_max_request_age_ms")]
    pub max_request_age_ms: u64,

    /// Requests dated further than this into the future are rejected
    ///
    /// Unset means future timestamps are accepted
    #[serde(default)]
    pub max_future_skew_ms: Option<u64>,

    /// Reject signatures that aren't prefixed with `0x`
    #[serde(default = "default_require_signature_prefix")]
    pub require_signature_prefix: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            signing_context: default_signing_context(),
            ss58_prefix: default_ss58_prefix(),
            max_request_age_ms: default_max_request_age_ms(),
            max_future_skew_ms: None,
            require_signature_prefix: default_require_signature_prefix(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Configuration;

    #[test]
    fn empty_document_is_default() {
        let config: Configuration = toml::from_str("").unwrap();
        assert_eq!(config, Configuration::default());
        assert_eq!(config.signing_context, "substrate");
        assert_eq!(config.max_request_age_ms, 8000);
    }

    #[test]
    fn kebab_case_keys() {
        let config: Configuration = toml::from_str(
            r#"
            signing-context = "epistula-test"
            max-request-age-ms = 2000
            max-future-skew-ms = 500
            require-signature-prefix = false
            "#,
        )
        .unwrap();

        assert_eq!(config.signing_context, "epistula-test");
        assert_eq!(config.ss58_prefix, 42);
        assert_eq!(config.max_request_age_ms, 2000);
        assert_eq!(config.max_future_skew_ms, Some(500));
        assert!(!config.require_signature_prefix);
    }
}
