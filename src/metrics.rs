use lazy_static::lazy_static;
use prometheus::{IntCounterVec, register_int_counter_vec};

lazy_static! {
    /// Deduplication cache lookups with result label {hit, miss}.
    pub static ref CACHE_LOOKUPS: IntCounterVec = register_int_counter_vec!(
        "source_tx_cache_lookups_total",
        "source tx hash cache lookups",
        &["result"],
    )
    .unwrap();

    /// Requests made to the indexer, labeled by their outcome.
    pub static ref FETCH_ATTEMPTS: IntCounterVec = register_int_counter_vec!(
        "source_tx_fetch_attempts_total",
        "requests made to the wormscan api",
        &["outcome"],
    )
    .unwrap();

    /// Finished resolutions with result label {found, not_found}.
    pub static ref RESOLUTIONS: IntCounterVec = register_int_counter_vec!(
        "source_tx_resolutions_total",
        "source tx hash resolutions after all attempts",
        &["result"],
    )
    .unwrap();
}
