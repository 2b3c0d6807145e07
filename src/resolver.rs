use crate::{
    chain::ChainId,
    message::MessageId,
    metrics,
    wormscan::{TxHashSource, WormscanClient},
};
use std::time::Duration;
use tokio::time::sleep;

/// Looks up the source transaction hash of a VAA, retrying while the indexer
/// lags behind the chain.
#[derive(Debug)]
pub struct HashResolver<S = WormscanClient> {
    source: S,
    backoff_step: Duration,
}

impl<S: TxHashSource> HashResolver<S> {
    pub fn new(source: S, backoff_step: Duration) -> Self {
        Self {
            source,
            backoff_step,
        }
    }

    /// Delay after the failed attempt with 0-based index `attempt`:
    /// one backoff step per attempt made so far.
    pub fn backoff_delay(&self, attempt: usize) -> Duration {
        let multiplier = u32::try_from(attempt + 1).unwrap_or(u32::MAX);
        self.backoff_step.saturating_mul(multiplier)
    }

    /// Makes at most `attempts` requests (and always at least one), stopping at
    /// the first non-empty hash. Failures are logged and absorbed: `None` means
    /// the hash could not be resolved this time.
    pub async fn resolve(&self, id: &MessageId, attempts: usize) -> Option<String> {
        let attempts = attempts.max(1);
        let mut tx_hash = None;

        for attempt in 0..attempts {
            match self.source.fetch_tx_hash(id).await {
                Ok(Some(hash)) => {
                    metrics::FETCH_ATTEMPTS.with_label_values(&["found"]).inc();
                    tx_hash = Some(hash);
                    break;
                }
                Ok(None) => {
                    metrics::FETCH_ATTEMPTS
                        .with_label_values(&["missing_hash"])
                        .inc();
                    tracing::error!(
                        attempt,
                        attempts,
                        "indexer response does not contain a tx hash"
                    );
                }
                Err(err) => {
                    metrics::FETCH_ATTEMPTS
                        .with_label_values(&[err.kind()])
                        .inc();
                    tracing::error!(
                        attempt,
                        attempts,
                        err = %err,
                        "failed to fetch source tx hash"
                    );
                }
            }

            if attempt + 1 < attempts {
                sleep(self.backoff_delay(attempt)).await;
            }
        }

        let tx_hash = tx_hash.map(|hash| normalize_tx_hash(id.emitter_chain, hash));
        match &tx_hash {
            Some(hash) => tracing::debug!(tx_hash = %hash, "fetched source tx hash"),
            None => tracing::debug!("source tx hash not found"),
        }
        tx_hash
    }
}

/// EVM hashes are reported with a `0x` prefix; other chains are returned as is.
pub fn normalize_tx_hash(chain: ChainId, hash: String) -> String {
    if chain.is_evm() && !hash.starts_with("0x") {
        format!("0x{hash}")
    } else {
        hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_utils::ScriptedSource, wormscan::FetchError};
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use std::sync::Arc;

    const STEP: Duration = Duration::from_millis(200);

    fn resolver(source: &Arc<ScriptedSource>) -> HashResolver<Arc<ScriptedSource>> {
        HashResolver::new(source.clone(), STEP)
    }

    #[rstest::rstest]
    #[case(ChainId::ETHEREUM, "abc123", "0xabc123")]
    #[case(ChainId::ETHEREUM, "0xabc123", "0xabc123")]
    #[case(ChainId::BASE, "ff", "0xff")]
    #[case(ChainId::ROOTSTOCK, "abc123", "0xabc123")]
    #[case(ChainId(40), "abc123", "0xabc123")]
    #[case(ChainId(43), "abc123", "0xabc123")]
    #[case(ChainId(44), "abc123", "0xabc123")]
    #[case(ChainId(45), "abc123", "0xabc123")]
    #[case(ChainId(46), "abc123", "0xabc123")]
    #[case(ChainId(47), "abc123", "0xabc123")]
    #[case(ChainId(48), "abc123", "0xabc123")]
    #[case(ChainId(50), "abc123", "0xabc123")]
    #[case(ChainId::SOLANA, "5VERv8NMvzbJMEkV8xnrLkEaWR", "5VERv8NMvzbJMEkV8xnrLkEaWR")]
    #[case(ChainId::SUI, "0xabc", "0xabc")]
    #[case(ChainId::APTOS, "abc", "abc")]
    fn normalization(#[case] chain: ChainId, #[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_tx_hash(chain, raw.to_string()), expected);
    }

    #[test]
    fn backoff_is_linear() {
        let resolver = HashResolver::new(Arc::new(ScriptedSource::default()), STEP);
        let delays: Vec<_> = (0..4).map(|attempt| resolver.backoff_delay(attempt)).collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(200),
                Duration::from_millis(400),
                Duration::from_millis(600),
                Duration::from_millis(800),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn first_success_stops_the_loop() {
        let source = Arc::new(ScriptedSource::new([Ok(Some("abc123".to_string()))]));
        let hash = resolver(&source)
            .resolve(&ScriptedSource::evm_message(), 5)
            .await;
        assert_eq!(hash.as_deref(), Some("0xabc123"));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retries_after_server_error_with_one_backoff() {
        let source = Arc::new(ScriptedSource::new([
            Err(FetchError::Server(StatusCode::BAD_GATEWAY)),
            Ok(Some("abc123".to_string())),
        ]));
        let hash = resolver(&source)
            .resolve(&ScriptedSource::evm_message(), 3)
            .await;
        assert_eq!(hash.as_deref(), Some("0xabc123"));
        assert_eq!(source.calls(), 2);
        assert_eq!(source.gaps(), vec![Duration::from_millis(200)]);
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_returns_none_after_configured_attempts() {
        let source = Arc::new(ScriptedSource::new([
            Err(FetchError::NotIndexed),
            Ok(None),
            Err(FetchError::NotIndexed),
            Ok(Some("late".to_string())),
        ]));
        let hash = resolver(&source)
            .resolve(&ScriptedSource::evm_message(), 3)
            .await;
        assert_eq!(hash, None);
        assert_eq!(source.calls(), 3);
        assert_eq!(
            source.gaps(),
            vec![Duration::from_millis(200), Duration::from_millis(400)]
        );
    }

    #[rstest::rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(4, 4)]
    #[tokio::test(start_paused = true)]
    async fn attempt_count_is_bounded(#[case] attempts: usize, #[case] expected_calls: usize) {
        let source = Arc::new(ScriptedSource::default());
        let hash = resolver(&source)
            .resolve(&ScriptedSource::evm_message(), attempts)
            .await;
        assert_eq!(hash, None);
        assert_eq!(source.calls(), expected_calls);
    }

    #[tokio::test(start_paused = true)]
    async fn no_sleep_after_the_last_attempt() {
        let source = Arc::new(ScriptedSource::default());
        let started = tokio::time::Instant::now();
        resolver(&source)
            .resolve(&ScriptedSource::evm_message(), 3)
            .await;
        assert_eq!(started.elapsed(), Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn disabled_endpoint_degrades_to_exhaustion() {
        let source = Arc::new(ScriptedSource::new([
            Err(FetchError::EndpointNotConfigured),
            Err(FetchError::EndpointNotConfigured),
        ]));
        let hash = resolver(&source)
            .resolve(&ScriptedSource::evm_message(), 2)
            .await;
        assert_eq!(hash, None);
        assert_eq!(source.calls(), 2);
    }
}
