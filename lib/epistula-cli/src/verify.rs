use crate::{
    args::VerifyArgs,
    util::{self, error_kaomoji, success_kaomoji},
};
use epistula::{
    header::{self, SECRET_SIGNATURES},
    Configuration, Error, VerifyRequest, Verifier,
};
use http::{HeaderMap, HeaderName, HeaderValue};
use miette::{miette, IntoDiagnostic};
use tokio::fs;

fn parse_headers(raw: &str) -> miette::Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    for (number, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((name, value)) = line.split_once(':') else {
            return Err(miette!("Line {} isn't a `Name: value` pair", number + 1));
        };

        headers.insert(
            HeaderName::from_bytes(name.trim().as_bytes()).into_diagnostic()?,
            HeaderValue::from_str(value.trim()).into_diagnostic()?,
        );
    }

    Ok(headers)
}

/// Accepts if any of the attached secret signatures matches one of the verifier's windows
fn check_secret_signatures(
    verifier: &Verifier,
    headers: &HeaderMap,
    sender_address: &str,
) -> epistula::Result<()> {
    let mut outcome = Err(Error::MissingHeader(SECRET_SIGNATURES[0]));

    for index in 0..SECRET_SIGNATURES.len() {
        let Some(signature) = header::secret_signature(headers, index)? else {
            continue;
        };

        outcome = verifier.verify_secret_signature(sender_address, signature);
        if outcome.is_ok() {
            break;
        }
    }

    outcome
}

pub async fn do_it(args: VerifyArgs, config: Configuration) -> miette::Result<()> {
    let raw_headers = fs::read_to_string(&args.headers).await.into_diagnostic()?;
    let headers = parse_headers(&raw_headers)?;
    let body = util::read_body(args.body).await?;

    let request = VerifyRequest::from_headers(&headers, &body)?;
    let verifier = Verifier::builder().config(config).build();

    let mut result = verifier.verify(&args.receiver, &request);
    if args.secret && result.is_ok() {
        result = check_secret_signatures(&verifier, &headers, request.signed_by);
    }

    if let Err(err) = result {
        return Err(miette::Report::new(err).wrap_err(format!("Rejected {}", error_kaomoji())));
    }

    println!("✅ Request is authentic! {}", success_kaomoji());

    Ok(())
}
