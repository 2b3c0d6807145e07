mod cache;
mod chain;
mod consts;
mod message;
mod resolver;
mod settings;
mod stage;
mod wormscan;

pub mod cli;
pub mod metrics;

#[cfg(test)]
mod test_utils;

pub use cache::DedupCache;
pub use chain::ChainId;
pub use message::{EMITTER_ADDRESS_LEN, MessageId, ParseMessageIdError};
pub use resolver::{HashResolver, normalize_tx_hash};
pub use settings::{Environment, ResolverConfig, ResolverSettings, Settings, UnknownEnvironment};
pub use stage::{Middleware, Next, ProcessingContext, SourceTxContext, SourceTxStage};
pub use wormscan::{FetchError, TxHashSource, WormscanClient};
