use crate::{
    message::MessageId,
    wormscan::{FetchError, TxHashSource},
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::{collections::VecDeque, time::Duration};
use tokio::time::Instant;

type Response = Result<Option<String>, FetchError>;

/// Replays canned indexer responses in order; answers `NotIndexed` once they run out.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Response>>,
    requests: Mutex<Vec<Instant>>,
}

impl ScriptedSource {
    pub fn new(responses: impl IntoIterator<Item = Response>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Default::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    /// Time elapsed between consecutive requests.
    pub fn gaps(&self) -> Vec<Duration> {
        self.requests
            .lock()
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .collect()
    }

    pub fn evm_message() -> MessageId {
        let mut emitter_address = [0u8; 32];
        emitter_address[12..].copy_from_slice(&[0x3e; 20]);
        MessageId::new(crate::ChainId::ETHEREUM, emitter_address, 7)
    }
}

#[async_trait]
impl TxHashSource for ScriptedSource {
    async fn fetch_tx_hash(&self, _id: &MessageId) -> Result<Option<String>, FetchError> {
        self.requests.lock().push(Instant::now());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or(Err(FetchError::NotIndexed))
    }
}
