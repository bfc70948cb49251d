use crate::{
    clock::Clock,
    config::Configuration,
    crypto::{self, address},
    digest,
    header::VerifyRequest,
    message::{self, TimeWindow},
    Error, Result,
};
use tracing::{debug, instrument};
use typed_builder::TypedBuilder;

/// Request verifier
#[derive(Clone, Debug, Default, TypedBuilder)]
pub struct Verifier {
    /// Protocol configuration
    #[builder(default)]
    config: Configuration,

    /// Clock the request age is measured against
    #[builder(default)]
    clock: Clock,
}

impl Verifier {
    fn check_freshness(&self, timestamp: u64) -> Result<()> {
        let now = self.clock.now_ms();

        if let Some(age_ms) = now.checked_sub(timestamp) {
            if age_ms > self.config.max_request_age_ms {
                return Err(Error::StaleRequest {
                    age_ms,
                    max_age_ms: self.config.max_request_age_ms,
                });
            }
        } else if let Some(max_skew_ms) = self.config.max_future_skew_ms {
            let ahead_ms = timestamp - now;
            if ahead_ms > max_skew_ms {
                return Err(Error::FutureRequest {
                    ahead_ms,
                    max_skew_ms,
                });
            }
        }

        Ok(())
    }

    fn check_signature(&self, sender_address: &str, signature: &str, msg: &str) -> Result<()> {
        let signature =
            crypto::decode_signature(signature, self.config.require_signature_prefix)?;
        let (public_key, _prefix) = address::decode(sender_address)?;

        crypto::verify(
            self.config.signing_context.as_bytes(),
            msg.as_bytes(),
            &signature,
            &public_key,
        )
        .map_err(|_| Error::SignatureMismatch)
    }

    /// Verify the primary signature of a received request
    ///
    /// `self_address` is the address of the verifying party. The checks run in order and the first failing one is returned:
    ///
    /// 1. Timestamp parses as milliseconds since the Unix epoch and is written exactly the way the signer prints it
    /// 2. Request isn't older than the configured maximum age (a request exactly at the limit is accepted)
    /// 3. Signature decodes
    /// 4. Sender address decodes
    /// 5. Signature matches the message rebuilt from the body, uuid, timestamp and `self_address`
    #[instrument(skip_all, fields(signed_by = request.signed_by, uuid = request.uuid))]
    pub fn verify(&self, self_address: &str, request: &VerifyRequest<'_>) -> Result<()> {
        let timestamp: u64 = request.timestamp.parse().map_err(|error| {
            debug!(timestamp = request.timestamp, "unparseable timestamp");
            Error::InvalidTimestamp(error)
        })?;

        if timestamp.to_string() != request.timestamp {
            debug!(timestamp = request.timestamp, "non-canonical timestamp");
            return Err(Error::NonCanonicalTimestamp(request.timestamp.to_string()));
        }

        self.check_freshness(timestamp)
            .inspect_err(|error| debug!(%error, "rejected request timestamp"))?;

        if request.signed_for != self_address {
            debug!(
                signed_for = request.signed_for,
                self_address, "request claims a different recipient"
            );
        }

        let content_hash = digest::content_hash(request.body);
        let canonical_message =
            message::canonical_message(&content_hash, request.uuid, timestamp, self_address);

        self.check_signature(request.signed_by, request.signature, &canonical_message)
            .inspect_err(|error| debug!(%error, "rejected request signature"))
    }

    /// Check a secret signature against the verifier's current time window and its neighbours
    ///
    /// Succeeds if the signature is valid for `{window}.{sender_address}` for any of the three windows
    #[instrument(skip_all, fields(signed_by = sender_address))]
    pub fn verify_secret_signature(&self, sender_address: &str, signature: &str) -> Result<()> {
        let window = TimeWindow::from_timestamp(self.clock.now_ms());

        for candidate in window.adjacent() {
            match self.check_signature(
                sender_address,
                signature,
                &candidate.secret_message(sender_address),
            ) {
                Ok(()) => return Ok(()),
                Err(Error::SignatureMismatch) => {}
                Err(error) => return Err(error),
            }
        }

        debug!(window = window.0, "secret signature matches none of the windows");
        Err(Error::SignatureMismatch)
    }
}

#[cfg(test)]
mod test {
    use super::Verifier;
    use crate::{
        clock::{Clock, DeltaDirection},
        config::Configuration,
        header::VerifyRequest,
        Error,
    };
    use std::time::Duration;

    fn request(timestamp: &str) -> VerifyRequest<'_> {
        VerifyRequest {
            signature: "0x00",
            body: b"",
            timestamp,
            uuid: "uuid",
            signed_for: "receiver",
            signed_by: "sender",
        }
    }

    #[test]
    fn invalid_timestamp() {
        let result = Verifier::default().verify("receiver", &request("yesterday"));
        assert!(matches!(result, Err(Error::InvalidTimestamp(..))));
    }

    #[test]
    fn non_canonical_timestamp() {
        for timestamp in ["+100000", "0100000", "000100000"] {
            let result = Verifier::default().verify("receiver", &request(timestamp));
            assert!(matches!(
                result,
                Err(Error::NonCanonicalTimestamp(ref raw)) if raw == timestamp
            ));
        }
    }

    #[test]
    fn staleness_comes_first() {
        let (clock, mock) = Clock::mockable();
        mock.set(100_000);

        let verifier = Verifier::builder().clock(clock).build();
        let result = verifier.verify("receiver", &request("91999"));

        assert!(matches!(
            result,
            Err(Error::StaleRequest {
                age_ms: 8001,
                max_age_ms: 8000
            })
        ));
    }

    #[test]
    fn future_accepted_by_default() {
        let (clock, mock) = Clock::mockable();
        mock.set(100_000);
        mock.adjust(DeltaDirection::Sub, Duration::from_secs(60));

        // Freshness passes, so the garbage signature is what gets reported
        let verifier = Verifier::builder().clock(clock).build();
        let result = verifier.verify("receiver", &request("100000"));

        assert!(matches!(result, Err(Error::MalformedSignature(..))));
    }

    #[test]
    fn future_bounded_when_configured() {
        let (clock, mock) = Clock::mockable();
        mock.set(100_000);

        let config = Configuration {
            max_future_skew_ms: Some(1000),
            ..Configuration::default()
        };
        let verifier = Verifier::builder().config(config).clock(clock).build();
        let result = verifier.verify("receiver", &request("101001"));

        assert!(matches!(
            result,
            Err(Error::FutureRequest {
                ahead_ms: 1001,
                max_skew_ms: 1000
            })
        ));
    }
}
