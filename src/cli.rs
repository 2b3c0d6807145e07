use crate::{Environment, MessageId};
use clap::Parser;
use url::Url;

/// Resolves the source transaction hash of a VAA through the Wormscan API.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// VAA id in the `chain/emitter_address/sequence` form
    pub message_id: MessageId,
    /// Overrides the environment from settings
    #[arg(short, long)]
    pub environment: Option<Environment>,
    /// Overrides the environment's default Wormscan endpoint
    #[arg(long)]
    pub endpoint: Option<Url>,
    /// Overrides the environment's default number of attempts
    #[arg(short, long, allow_negative_numbers = true)]
    pub retries: Option<i64>,
}
