use crate::{
    cache::DedupCache,
    message::MessageId,
    metrics,
    resolver::HashResolver,
    settings::{Environment, ResolverConfig},
    wormscan::{TxHashSource, WormscanClient},
};
use async_trait::async_trait;
use tracing::Instrument;

/// Downstream processing handed to a [`Middleware`].
#[async_trait]
pub trait Next<C: Send>: Send + Sync {
    async fn call(&self, ctx: &mut C);
}

#[async_trait]
impl<C, F> Next<C> for F
where
    C: Send,
    F: Fn(&mut C) + Send + Sync,
{
    async fn call(&self, ctx: &mut C) {
        self(ctx)
    }
}

/// A single pipeline stage. Invoked once per message; must always hand the
/// context over to `next`.
#[async_trait]
pub trait Middleware<C: Send>: Send + Sync {
    async fn handle(&self, ctx: &mut C, next: &dyn Next<C>);
}

/// What the source-tx stage reads from and writes to the host's context.
pub trait SourceTxContext: Send {
    fn vaa(&self) -> &MessageId;

    fn environment(&self) -> Option<Environment> {
        None
    }

    /// Span the stage's events are recorded in.
    fn span(&self) -> tracing::Span {
        tracing::Span::current()
    }

    fn set_source_tx_hash(&mut self, tx_hash: Option<String>);
}

#[derive(Debug, Clone)]
pub struct ProcessingContext {
    pub vaa: MessageId,
    pub env: Environment,
    pub span: tracing::Span,
    /// `None` until resolved, and when resolution failed.
    pub source_tx_hash: Option<String>,
}

impl ProcessingContext {
    pub fn new(vaa: MessageId, env: Environment) -> Self {
        let span = tracing::info_span!(
            "vaa",
            emitter_chain = %vaa.emitter_chain,
            emitter_address = %vaa.emitter_address_hex(),
            sequence = vaa.sequence,
        );
        Self {
            vaa,
            env,
            span,
            source_tx_hash: None,
        }
    }
}

impl SourceTxContext for ProcessingContext {
    fn vaa(&self) -> &MessageId {
        &self.vaa
    }

    fn environment(&self) -> Option<Environment> {
        Some(self.env)
    }

    fn span(&self) -> tracing::Span {
        self.span.clone()
    }

    fn set_source_tx_hash(&mut self, tx_hash: Option<String>) {
        self.source_tx_hash = tx_hash;
    }
}

/// Enriches each message with the hash of the transaction that emitted it.
///
/// Successful lookups are kept in a [`DedupCache`] shared by every invocation
/// of this stage, so a message is fetched from the indexer at most once while
/// it stays cached. Failed lookups are not cached and are retried on the next
/// invocation. The stage never fails: an unresolved hash is left as `None`
/// and processing continues downstream.
#[derive(Debug)]
pub struct SourceTxStage<S = WormscanClient> {
    config: ResolverConfig,
    resolver: HashResolver<S>,
    cache: DedupCache,
}

impl SourceTxStage<WormscanClient> {
    pub fn new(config: ResolverConfig) -> Result<Self, reqwest::Error> {
        let client =
            WormscanClient::new(config.wormscan_endpoint.clone(), config.request_timeout)?;
        Ok(Self::with_source(config, client))
    }
}

impl<S: TxHashSource> SourceTxStage<S> {
    pub fn with_source(config: ResolverConfig, source: S) -> Self {
        let resolver = HashResolver::new(source, config.backoff_step);
        Self {
            config,
            resolver,
            cache: DedupCache::default(),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn cache(&self) -> &DedupCache {
        &self.cache
    }

    /// Cached hash if any, otherwise a fresh lookup against the indexer.
    pub async fn resolve_source_tx(&self, id: &MessageId) -> Option<String> {
        let key = id.cache_key();
        if let Some(tx_hash) = self.cache.get(&key) {
            metrics::CACHE_LOOKUPS.with_label_values(&["hit"]).inc();
            tracing::debug!(tx_hash = %tx_hash, "source tx hash found in cache");
            return Some(tx_hash);
        }
        metrics::CACHE_LOOKUPS.with_label_values(&["miss"]).inc();

        let tx_hash = self
            .resolver
            .resolve(id, self.config.max_attempts())
            .await;
        match &tx_hash {
            Some(hash) => {
                self.cache.insert(key, hash.clone());
                metrics::RESOLUTIONS.with_label_values(&["found"]).inc();
                tracing::info!(tx_hash = %hash, "source tx hash retrieved");
            }
            None => {
                metrics::RESOLUTIONS.with_label_values(&["not_found"]).inc();
                tracing::warn!(
                    attempts = self.config.max_attempts(),
                    "source tx hash was not retrieved"
                );
            }
        }
        tx_hash
    }

    pub async fn process<C: SourceTxContext>(&self, ctx: &mut C) {
        if let Some(env) = ctx
            .environment()
            .filter(|env| *env != self.config.environment)
        {
            tracing::warn!(
                context_environment = %env,
                stage_environment = %self.config.environment,
                "context environment differs from the stage configuration, ignoring it"
            );
        }

        let id = *ctx.vaa();
        let tx_hash = self.resolve_source_tx(&id).await;
        ctx.set_source_tx_hash(tx_hash);
    }
}

#[async_trait]
impl<C, S> Middleware<C> for SourceTxStage<S>
where
    C: SourceTxContext,
    S: TxHashSource,
{
    async fn handle(&self, ctx: &mut C, next: &dyn Next<C>) {
        let span = ctx.span();
        self.process(ctx).instrument(span).await;
        next.call(ctx).await;
    }
}
