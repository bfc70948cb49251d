use crate::{
    clock::Clock,
    config::Configuration,
    crypto::{self, SigningKey},
    digest,
    header::AuthHeaders,
    message::{self, TimeWindow},
    Error, Result,
};
use tracing::{debug, instrument};
use typed_builder::TypedBuilder;
use uuid::Uuid;

/// Request signer
#[derive(Clone, Debug, Default, TypedBuilder)]
pub struct Signer {
    /// Protocol configuration
    #[builder(default)]
    config: Configuration,

    /// Clock the request timestamp is read from
    #[builder(default)]
    clock: Clock,
}

impl Signer {
    #[inline]
    fn sign<K>(&self, key: &K, msg: &str) -> Result<String>
    where
        K: SigningKey + ?Sized,
    {
        let signature = key
            .sign(self.config.signing_context.as_bytes(), msg.as_bytes())
            .map_err(Error::Signing)?;

        Ok(crypto::encode_signature(signature))
    }

    /// Generate the authentication headers for a request body addressed to `receiver_address`
    #[instrument(skip_all, fields(signed_by = key.address(), signed_for = receiver_address))]
    pub fn generate<K>(&self, key: &K, receiver_address: &str, body: &[u8]) -> Result<AuthHeaders>
    where
        K: SigningKey + ?Sized,
    {
        let timestamp = self.clock.now_ms();
        let uuid = Uuid::new_v4().to_string();

        let content_hash = digest::content_hash(body);
        let canonical_message =
            message::canonical_message(&content_hash, &uuid, timestamp, receiver_address);
        let request_signature = self.sign(key, &canonical_message)?;

        let window = TimeWindow::from_timestamp(timestamp);
        let [previous, current, next] = window.adjacent().map(|window| {
            self.sign(key, &window.secret_message(key.address()))
                .inspect_err(|error| {
                    debug!(?error, window = window.0, "failed to sign time window");
                })
        });

        debug!(%uuid, timestamp, "generated request signature");

        Ok(AuthHeaders {
            timestamp,
            uuid,
            signed_by: key.address().to_string(),
            signed_for: receiver_address.to_string(),
            request_signature,
            secret_signatures: [previous?, current?, next?],
        })
    }
}

#[cfg(test)]
mod test {
    use super::Signer;
    use crate::{
        clock::Clock,
        crypto::{address::DEFAULT_PREFIX, Keypair, SigningKey},
        BoxError, Error,
    };

    struct BrokenKey;

    impl SigningKey for BrokenKey {
        fn address(&self) -> &str {
            "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY"
        }

        fn sign(&self, _context: &[u8], _msg: &[u8]) -> Result<Vec<u8>, BoxError> {
            Err("hardware token unplugged".into())
        }
    }

    /// Signs request messages but refuses `{window}.{address}` messages
    struct NoWindowKey(Keypair);

    impl SigningKey for NoWindowKey {
        fn address(&self) -> &str {
            self.0.address()
        }

        fn sign(&self, context: &[u8], msg: &[u8]) -> Result<Vec<u8>, BoxError> {
            if msg.ends_with(self.address().as_bytes()) {
                return Err("window signing disabled".into());
            }

            self.0.sign(context, msg)
        }
    }

    #[test]
    fn uses_clock_timestamp() {
        let (clock, mock) = Clock::mockable();
        mock.set(1_700_000_000_123);

        let keypair = Keypair::generate(DEFAULT_PREFIX).unwrap();
        let signer = Signer::builder().clock(clock).build();
        let headers = signer.generate(&keypair, "receiver", b"").unwrap();

        assert_eq!(headers.timestamp, 1_700_000_000_123);
        assert_eq!(headers.signed_by, keypair.address());
        assert_eq!(headers.signed_for, "receiver");
        assert!(headers.request_signature.starts_with("0x"));
        assert_eq!(headers.request_signature.len(), 2 + 128);
        assert!(headers
            .secret_signatures
            .iter()
            .all(|signature| signature.starts_with("0x") && signature.len() == 130));
    }

    #[test]
    fn fresh_uuid_per_request() {
        let keypair = Keypair::generate(DEFAULT_PREFIX).unwrap();
        let signer = Signer::default();

        let first = signer.generate(&keypair, "receiver", b"body").unwrap();
        let second = signer.generate(&keypair, "receiver", b"body").unwrap();

        assert_ne!(first.uuid, second.uuid);
        assert_ne!(first.request_signature, second.request_signature);
    }

    #[test]
    fn propagates_signing_failure() {
        let result = Signer::default().generate(&BrokenKey, "receiver", b"body");
        assert!(matches!(result, Err(Error::Signing(..))));
    }

    #[test]
    fn propagates_window_signing_failure() {
        let key = NoWindowKey(Keypair::generate(DEFAULT_PREFIX).unwrap());
        let result = Signer::default().generate(&key, "receiver", b"body");

        assert!(matches!(
            result,
            Err(Error::Signing(ref error)) if error.to_string() == "window signing disabled"
        ));
    }
}
