use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Wormhole chain identifier, as found in the `emitter_chain` field of a VAA.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u16);

impl ChainId {
    pub const SOLANA: Self = Self(1);
    pub const ETHEREUM: Self = Self(2);
    pub const TERRA: Self = Self(3);
    pub const BSC: Self = Self(4);
    pub const POLYGON: Self = Self(5);
    pub const AVALANCHE: Self = Self(6);
    pub const OASIS: Self = Self(7);
    pub const ALGORAND: Self = Self(8);
    pub const AURORA: Self = Self(9);
    pub const FANTOM: Self = Self(10);
    pub const KARURA: Self = Self(11);
    pub const ACALA: Self = Self(12);
    pub const KLAYTN: Self = Self(13);
    pub const CELO: Self = Self(14);
    pub const NEAR: Self = Self(15);
    pub const MOONBEAM: Self = Self(16);
    pub const NEON: Self = Self(17);
    pub const TERRA2: Self = Self(18);
    pub const INJECTIVE: Self = Self(19);
    pub const OSMOSIS: Self = Self(20);
    pub const SUI: Self = Self(21);
    pub const APTOS: Self = Self(22);
    pub const ARBITRUM: Self = Self(23);
    pub const OPTIMISM: Self = Self(24);
    pub const GNOSIS: Self = Self(25);
    pub const PYTHNET: Self = Self(26);
    pub const BASE: Self = Self(30);
    pub const SEI: Self = Self(32);
    pub const ROOTSTOCK: Self = Self(33);
    pub const SCROLL: Self = Self(34);
    pub const MANTLE: Self = Self(35);
    pub const BLAST: Self = Self(36);
    pub const XLAYER: Self = Self(37);
    pub const LINEA: Self = Self(38);
    pub const BERACHAIN: Self = Self(39);
    pub const SEIEVM: Self = Self(40);
    pub const SNAXCHAIN: Self = Self(43);
    pub const UNICHAIN: Self = Self(44);
    pub const WORLDCHAIN: Self = Self(45);
    pub const INK: Self = Self(46);
    pub const HYPEREVM: Self = Self(47);
    pub const MONAD: Self = Self(48);
    pub const MEZO: Self = Self(50);
    pub const WORMCHAIN: Self = Self(3104);
    pub const SEPOLIA: Self = Self(10002);
    pub const ARBITRUM_SEPOLIA: Self = Self(10003);
    pub const BASE_SEPOLIA: Self = Self(10004);
    pub const OPTIMISM_SEPOLIA: Self = Self(10005);
    pub const HOLESKY: Self = Self(10006);
    pub const POLYGON_SEPOLIA: Self = Self(10007);

    const EVM_CHAINS: &'static [Self] = &[
        Self::ETHEREUM,
        Self::BSC,
        Self::POLYGON,
        Self::AVALANCHE,
        Self::OASIS,
        Self::AURORA,
        Self::FANTOM,
        Self::KARURA,
        Self::ACALA,
        Self::KLAYTN,
        Self::CELO,
        Self::MOONBEAM,
        Self::NEON,
        Self::ARBITRUM,
        Self::OPTIMISM,
        Self::GNOSIS,
        Self::BASE,
        Self::ROOTSTOCK,
        Self::SCROLL,
        Self::MANTLE,
        Self::BLAST,
        Self::XLAYER,
        Self::LINEA,
        Self::BERACHAIN,
        Self::SEIEVM,
        Self::SNAXCHAIN,
        Self::UNICHAIN,
        Self::WORLDCHAIN,
        Self::INK,
        Self::HYPEREVM,
        Self::MONAD,
        Self::MEZO,
        Self::SEPOLIA,
        Self::ARBITRUM_SEPOLIA,
        Self::BASE_SEPOLIA,
        Self::OPTIMISM_SEPOLIA,
        Self::HOLESKY,
        Self::POLYGON_SEPOLIA,
    ];

    /// Whether transaction hashes on this chain use the EVM `0x`-prefixed hex format.
    pub fn is_evm(&self) -> bool {
        Self::EVM_CHAINS.contains(self)
    }
}

impl From<u16> for ChainId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChainId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}
