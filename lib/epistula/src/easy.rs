//!
//! Async-friendly signing and verification
//!
//! Moves the CPU-bound signature work onto a dedicated rayon pool so callers inside an async runtime don't stall their executor
//!

use crate::{
    crypto::SigningKey, header::VerifyRequest, AuthHeaders, Error, Result, Signer, Verifier,
};
use bytes::Bytes;
use rayon::ThreadPool;
use std::sync::{Arc, LazyLock};
use tokio::sync::oneshot;
use tracing::{debug, info_span, instrument};

static CRYPTO_POOL: LazyLock<ThreadPool> = LazyLock::new(|| {
    rayon::ThreadPoolBuilder::new()
        .thread_name(|index| format!("epistula-crypto-{index}"))
        .build()
        .expect("Failed to build rayon threadpool")
});

#[inline]
async fn run_blocking<F, O>(func: F) -> Result<O>
where
    F: FnOnce() -> O + Send + 'static,
    O: Send + 'static,
{
    let (sender, receiver) = oneshot::channel();

    CRYPTO_POOL.spawn(move || {
        let _span = info_span!("crypto-worker", id = rayon::current_thread_index()).entered();

        if sender.send(func()).is_err() {
            debug!("Failed to send back value from rayon threadpool");
        }
    });

    receiver.await.map_err(|_| Error::Blocking)
}

/// Generate the authentication headers on the crypto pool
#[instrument(skip_all)]
pub async fn generate<K>(
    signer: Signer,
    key: Arc<K>,
    receiver_address: String,
    body: Bytes,
) -> Result<AuthHeaders>
where
    K: SigningKey + Send + Sync + ?Sized + 'static,
{
    run_blocking(move || signer.generate(&*key, &receiver_address, &body)).await?
}

/// Verify a request on the crypto pool
#[instrument(skip_all)]
pub async fn verify(
    verifier: Verifier,
    self_address: String,
    headers: http::HeaderMap,
    body: Bytes,
) -> Result<()> {
    run_blocking(move || {
        let request = VerifyRequest::from_headers(&headers, &body)?;
        verifier.verify(&self_address, &request)
    })
    .await?
}
