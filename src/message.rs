use crate::chain::ChainId;
use std::{fmt, str::FromStr};
use thiserror::Error;

pub const EMITTER_ADDRESS_LEN: usize = 32;

/// Identifies a single VAA: `(emitter_chain, emitter_address, sequence)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId {
    pub emitter_chain: ChainId,
    pub emitter_address: [u8; EMITTER_ADDRESS_LEN],
    pub sequence: u64,
}

#[derive(Error, Debug, PartialEq)]
pub enum ParseMessageIdError {
    #[error("expected `chain/emitter_address/sequence`, got {0:?}")]
    Format(String),
    #[error("invalid emitter chain: {0}")]
    Chain(std::num::ParseIntError),
    #[error("invalid emitter address: {0}")]
    Address(#[from] hex::FromHexError),
    #[error("expected {EMITTER_ADDRESS_LEN}-byte emitter address, got {0} bytes")]
    AddressLength(usize),
    #[error("invalid sequence: {0}")]
    Sequence(std::num::ParseIntError),
}

impl MessageId {
    pub fn new(
        emitter_chain: impl Into<ChainId>,
        emitter_address: [u8; EMITTER_ADDRESS_LEN],
        sequence: u64,
    ) -> Self {
        Self {
            emitter_chain: emitter_chain.into(),
            emitter_address,
            sequence,
        }
    }

    /// Lowercase hex of the emitter address, without `0x`.
    pub fn emitter_address_hex(&self) -> String {
        hex::encode(self.emitter_address)
    }

    /// Stable string encoding used as the deduplication cache key.
    pub fn cache_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.emitter_chain,
            self.emitter_address_hex(),
            self.sequence
        )
    }
}

impl FromStr for MessageId {
    type Err = ParseMessageIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        let &[chain, address, sequence] = parts.as_slice() else {
            return Err(ParseMessageIdError::Format(s.to_string()));
        };

        let emitter_chain = chain.parse().map_err(ParseMessageIdError::Chain)?;
        let address = address.strip_prefix("0x").unwrap_or(address);
        let bytes = hex::decode(address)?;
        let len = bytes.len();
        let emitter_address = bytes
            .try_into()
            .map_err(|_| ParseMessageIdError::AddressLength(len))?;
        let sequence = sequence.parse().map_err(ParseMessageIdError::Sequence)?;

        Ok(Self {
            emitter_chain,
            emitter_address,
            sequence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ADDRESS: &str = "0000000000000000000000003ee18b2214aff97000d974cf647e7c347e8fa585";

    #[test]
    fn cache_key_is_stable() {
        let mut emitter_address = [0u8; 32];
        emitter_address[31] = 0xab;
        let id = MessageId::new(ChainId::ETHEREUM, emitter_address, 12345);
        assert_eq!(
            id.cache_key(),
            "2/00000000000000000000000000000000000000000000000000000000000000ab/12345"
        );
        assert_eq!(
            id.cache_key(),
            MessageId::new(ChainId::ETHEREUM, emitter_address, 12345).cache_key()
        );
    }

    #[test]
    fn parses_display_format() {
        let raw = format!("2/{ADDRESS}/98765");
        let id: MessageId = raw.parse().unwrap();
        assert_eq!(id.emitter_chain, ChainId::ETHEREUM);
        assert_eq!(id.sequence, 98765);
        assert_eq!(id.to_string(), raw);

        let prefixed: MessageId = format!("2/0x{ADDRESS}/98765").parse().unwrap();
        assert_eq!(prefixed, id);
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(matches!(
            "2/abc".parse::<MessageId>(),
            Err(ParseMessageIdError::Format(_))
        ));
        assert!(matches!(
            format!("x/{ADDRESS}/1").parse::<MessageId>(),
            Err(ParseMessageIdError::Chain(_))
        ));
        assert!(matches!(
            "2/zz/1".parse::<MessageId>(),
            Err(ParseMessageIdError::Address(_))
        ));
        assert_eq!(
            "2/abcd/1".parse::<MessageId>(),
            Err(ParseMessageIdError::AddressLength(2))
        );
        assert!(matches!(
            format!("2/{ADDRESS}/-1").parse::<MessageId>(),
            Err(ParseMessageIdError::Sequence(_))
        ));
    }
}
