use crate::message::MessageId;
use async_trait::async_trait;
use reqwest::{StatusCode, header};
use serde::Deserialize;
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("vaa is not indexed yet")]
    NotIndexed,
    #[error("server error: {0}")]
    Server(StatusCode),
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),
    #[error("wormscan endpoint is not configured")]
    EndpointNotConfigured,
}

impl FetchError {
    /// Label used for the fetch attempts metric.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotIndexed => "not_indexed",
            Self::Server(_) => "server_error",
            Self::Request(_) | Self::Url(_) => "transport_error",
            Self::Decode(_) => "decode_error",
            Self::EndpointNotConfigured => "disabled",
        }
    }
}

/// A single lookup of the source transaction hash of a VAA.
///
/// `Ok(None)` means the indexer answered but did not report a hash.
#[async_trait]
pub trait TxHashSource: Send + Sync {
    async fn fetch_tx_hash(&self, id: &MessageId) -> Result<Option<String>, FetchError>;
}

#[async_trait]
impl<T: TxHashSource + ?Sized> TxHashSource for Arc<T> {
    async fn fetch_tx_hash(&self, id: &MessageId) -> Result<Option<String>, FetchError> {
        (**self).fetch_tx_hash(id).await
    }
}

#[derive(Debug, Deserialize)]
struct VaaResponse {
    data: Option<VaaData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VaaData {
    tx_hash: Option<String>,
}

#[derive(Clone, Debug)]
pub struct WormscanClient {
    client: reqwest::Client,
    endpoint: Option<Url>,
}

impl WormscanClient {
    pub fn new(endpoint: Option<Url>, request_timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: Option<Url>) -> Self {
        Self { client, endpoint }
    }

    fn vaa_url(&self, id: &MessageId) -> Result<Url, FetchError> {
        let endpoint = self
            .endpoint
            .as_ref()
            .ok_or(FetchError::EndpointNotConfigured)?;
        let url = format!(
            "{}/api/v1/vaas/{}/{}/{}",
            endpoint.as_str().trim_end_matches('/'),
            id.emitter_chain,
            id.emitter_address_hex(),
            id.sequence
        );
        Ok(Url::parse(&url)?)
    }
}

#[async_trait]
impl TxHashSource for WormscanClient {
    async fn fetch_tx_hash(&self, id: &MessageId) -> Result<Option<String>, FetchError> {
        let url = self.vaa_url(id)?;
        let resp = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(FetchError::Request)?;

        // Plain 500 falls through to body parsing; only statuses above it are
        // treated as an indexer outage.
        match resp.status() {
            StatusCode::NOT_FOUND => Err(FetchError::NotIndexed),
            status if status.as_u16() > 500 => Err(FetchError::Server(status)),
            _ => {
                let body: VaaResponse = resp.json().await.map_err(FetchError::Decode)?;
                Ok(body
                    .data
                    .and_then(|data| data.tx_hash)
                    .filter(|hash| !hash.is_empty()))
            }
        }
    }
}
