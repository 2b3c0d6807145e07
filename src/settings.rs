use crate::consts::{
    DEFAULT_RETRIES, MAINNET_RETRIES, MAINNET_WORMSCAN_ENDPOINT, TESTNET_WORMSCAN_ENDPOINT,
};
use anyhow::anyhow;
use config::{Config, File};
use serde::{Deserialize, Serialize, de::IgnoredAny};
use serde_with::{DeserializeFromStr, SerializeDisplay, serde_as};
use std::{fmt, str::FromStr, time::Duration};
use thiserror::Error;
use url::Url;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, DeserializeFromStr, SerializeDisplay,
)]
pub enum Environment {
    #[default]
    Mainnet,
    Testnet,
    Devnet,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown environment: {0}. expected mainnet|testnet|devnet")]
pub struct UnknownEnvironment(String);

impl Environment {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Devnet => "devnet",
        }
    }

    fn default_wormscan_endpoint(&self) -> Option<Url> {
        let endpoint = match self {
            Self::Mainnet => MAINNET_WORMSCAN_ENDPOINT,
            Self::Testnet => TESTNET_WORMSCAN_ENDPOINT,
            Self::Devnet => return None,
        };
        Some(Url::parse(endpoint).expect("valid url"))
    }

    fn default_retries(&self) -> i64 {
        match self {
            Self::Mainnet => MAINNET_RETRIES,
            Self::Testnet | Self::Devnet => DEFAULT_RETRIES,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "devnet" => Ok(Self::Devnet),
            other => Err(UnknownEnvironment(other.to_string())),
        }
    }
}

/// Explicit overrides on top of the per-environment defaults.
/// Every field left as `None` falls back to the environment's default.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverSettings {
    pub wormscan_endpoint: Option<Url>,
    /// Number of requests made to the indexer per message.
    /// Values below one still result in a single request.
    pub retries: Option<i64>,
    #[serde_as(as = "Option<serde_with::DurationMilliSeconds<u64>>")]
    pub backoff_step: Option<Duration>,
    #[serde_as(as = "Option<serde_with::DurationSeconds<u64>>")]
    pub request_timeout: Option<Duration>,
}

/// Configuration of a single source-tx stage. Fixed for the stage's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub environment: Environment,
    /// `None` disables resolution: every fetch attempt fails immediately.
    pub wormscan_endpoint: Option<Url>,
    pub retries: i64,
    pub backoff_step: Duration,
    pub request_timeout: Duration,
}

impl ResolverConfig {
    pub fn new(environment: Environment, overrides: &ResolverSettings) -> Self {
        Self {
            environment,
            wormscan_endpoint: overrides
                .wormscan_endpoint
                .clone()
                .or_else(|| environment.default_wormscan_endpoint()),
            retries: overrides
                .retries
                .unwrap_or_else(|| environment.default_retries()),
            backoff_step: overrides.backoff_step.unwrap_or_else(defaults::backoff_step),
            request_timeout: overrides
                .request_timeout
                .unwrap_or_else(defaults::request_timeout),
        }
    }

    pub fn for_environment(environment: Environment) -> Self {
        Self::new(environment, &ResolverSettings::default())
    }

    /// Number of indexer requests per message; never less than one.
    pub fn max_attempts(&self) -> usize {
        usize::try_from(self.retries).unwrap_or(0).max(1)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub environment: Environment,
    pub resolver: ResolverSettings,

    pub config: IgnoredAny,
}

impl Settings {
    /// Reads the file named by `SOURCE_TX__CONFIG` (if set), then applies
    /// `SOURCE_TX__*` environment variables on top.
    pub fn build() -> anyhow::Result<Self> {
        let config_path = std::env::var("SOURCE_TX__CONFIG");

        let mut builder = Config::builder();
        if let Ok(config_path) = config_path {
            builder = builder.add_source(File::with_name(&config_path));
        };
        builder = builder.add_source(
            config::Environment::with_prefix("SOURCE_TX")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()?
            .try_deserialize()
            .map_err(|err| anyhow!(err))
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::new(self.environment, &self.resolver)
    }
}

mod defaults {
    use std::time::Duration;

    pub fn backoff_step() -> Duration {
        Duration::from_millis(200)
    }

    pub fn request_timeout() -> Duration {
        Duration::from_secs(10)
    }
}
