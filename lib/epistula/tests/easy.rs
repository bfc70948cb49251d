#![cfg(feature = "easy")]

use self::data::{pair, sender, OTHER_ADDRESS, RECEIVER_ADDRESS};
use bytes::Bytes;
use epistula::Error;
use std::sync::Arc;


#[tokio::test]
async fn offloaded_round_trip() {
    let (signer, verifier, _mock) = pair();
    let body = Bytes::from_static(b"Hello World");

    let headers = epistula::easy::generate(
        signer,
        Arc::new(sender()),
        RECEIVER_ADDRESS.to_string(),
        body.clone(),
    )
    .await
    .unwrap();
    let map = headers.to_header_map().unwrap();

    epistula::easy::verify(
        verifier.clone(),
        RECEIVER_ADDRESS.to_string(),
        map.clone(),
        body,
    )
    .await
    .unwrap();

    let result = epistula::easy::verify(
        verifier,
        OTHER_ADDRESS.to_string(),
        map,
        Bytes::from_static(b"Hello World"),
    )
    .await;
    assert!(matches!(result, Err(Error::SignatureMismatch)));
}

#[tokio::test]
async fn missing_headers() {
    let (_signer, verifier, _mock) = pair();

    let result = epistula::easy::verify(
        verifier,
        RECEIVER_ADDRESS.to_string(),
        http::HeaderMap::new(),
        Bytes::new(),
    )
    .await;
    assert!(matches!(result, Err(Error::MissingHeader("Epistula-Version"))));
}
