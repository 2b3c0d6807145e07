pub const MAINNET_WORMSCAN_ENDPOINT: &str = "https://api.wormscan.io";
pub const TESTNET_WORMSCAN_ENDPOINT: &str = "https://api.testnet.wormscan.io";

pub const MAINNET_RETRIES: i64 = 5;
pub const DEFAULT_RETRIES: i64 = 3;

pub const DEDUP_CACHE_CAPACITY: usize = 100;
