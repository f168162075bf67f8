/// Pump.fun Mint Watcher
///
/// Streams Solana transactions from a Geyser endpoint and reports every new
/// pump.fun token creation with its decoded metadata.
mod cli;
mod config;
mod etl;
mod grpc;
mod logging;
mod metadata;
mod models;
mod pipeline;
mod rpc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, OutputFormat};
use config::{Config, RunMode, StreamConfig};
use etl::load::{EventSink, JsonLinesSink, LogSink};
use etl::transform::EventFormatter;
use metadata::ImageResolver;
use pipeline::{Pipeline, PipelineStats, StreamTermination};
use rpc::SolanaRpcClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    logging::init();

    let cli = Cli::parse();
    let config = Config::load(&cli)?;

    let resolver = ImageResolver::new(config.gateway.clone()).context("Failed to create HTTP client")?;
    let formatter = EventFormatter::from_config(&config, resolver);

    match config.output {
        OutputFormat::Log => run(&config, formatter, LogSink).await,
        OutputFormat::Json => run(&config, formatter, JsonLinesSink::new(std::io::stdout())).await,
    }
}

async fn run<K: EventSink>(config: &Config, formatter: EventFormatter, sink: K) -> Result<()> {
    match &config.mode {
        RunMode::Live(stream_config) => run_live(stream_config, formatter, sink).await,
        RunMode::Replay { rpc_url, signature } => run_replay(rpc_url, signature, formatter, sink).await,
    }
}

/// Subscribe to the Geyser stream and process updates until it stops
async fn run_live<K: EventSink>(stream_config: &StreamConfig, formatter: EventFormatter, sink: K) -> Result<()> {
    let mut client = grpc::connect(stream_config).await?;
    let request = grpc::create_subscribe_request(stream_config);

    let (_subscribe_tx, stream) =
        client.subscribe_with_request(Some(request)).await.context("Failed to send subscribe request")?;
    tracing::info!("Geyser connection established - watching new Pump mints");

    let mut pipeline = Pipeline::new(formatter, sink);
    let report = pipeline.run(stream).await;

    match report.termination {
        StreamTermination::Completed => {
            tracing::info!("Stream completed, {} mints reported", report.stats.records_emitted);
            Ok(())
        }
        StreamTermination::Errored(reason) => Err(anyhow::anyhow!("Subscription stream failed: {}", reason)),
    }
}

/// Run one historical transaction through the formatter
async fn run_replay<K: EventSink>(rpc_url: &str, signature: &str, formatter: EventFormatter, sink: K) -> Result<()> {
    let rpc_client = SolanaRpcClient::new(rpc_url.to_string());
    tracing::info!("Replaying {} from {}", signature, rpc_client.endpoint());

    let tx = rpc_client.fetch_transaction(signature).await?;

    let mut pipeline = Pipeline::new(formatter, sink);
    let mut stats = PipelineStats::new();
    pipeline.process_transaction(&tx, &mut stats).await?;

    if stats.records_emitted == 0 {
        tracing::info!("No pump.fun create instruction in {}", signature);
    }

    Ok(())
}
