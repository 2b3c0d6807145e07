use anyhow::{Context, Result};
use clap::Parser;
use source_tx_resolver::{Settings, SourceTxStage, cli::Args};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let args = Args::parse();

    let mut settings = Settings::build().context("failed to load settings")?;
    if let Some(environment) = args.environment {
        settings.environment = environment;
    }
    if let Some(endpoint) = args.endpoint {
        settings.resolver.wormscan_endpoint = Some(endpoint);
    }
    if let Some(retries) = args.retries {
        settings.resolver.retries = Some(retries);
    }

    let config = settings.resolver_config();
    let stage = SourceTxStage::new(config).context("failed to build wormscan client")?;
    let tx_hash = stage.resolve_source_tx(&args.message_id).await;

    let config = stage.config();
    println!("environment:    {}", config.environment);
    match &config.wormscan_endpoint {
        Some(endpoint) => println!("endpoint:       {endpoint}"),
        None => println!("endpoint:       <disabled>"),
    }
    println!("message id:     {}", args.message_id);
    match tx_hash {
        Some(tx_hash) => println!("source tx hash: {tx_hash}"),
        None => println!("source tx hash: <not found>"),
    }

    Ok(())
}
