/// Geyser gRPC Module
///
/// Connection setup and subscription request for the Yellowstone Geyser stream.
use anyhow::{Context, Result};
use std::collections::HashMap;
use yellowstone_grpc_client::{ClientTlsConfig, GeyserGrpcClient, Interceptor};
use yellowstone_grpc_proto::prelude::{CommitmentLevel, SubscribeRequest, SubscribeRequestFilterTransactions};

use crate::cli::Commitment;
use crate::config::{StreamConfig, TRANSACTION_FILTER_NAME};

/// Connect to the Geyser endpoint with the configured x-token
pub async fn connect(config: &StreamConfig) -> Result<GeyserGrpcClient<impl Interceptor>> {
    let client = GeyserGrpcClient::build_from_shared(config.endpoint.clone())
        .context("Invalid Geyser endpoint")?
        .x_token(Some(config.token.clone()))
        .context("Invalid Geyser token")?
        .tls_config(ClientTlsConfig::new().with_native_roots())
        .context("Failed to configure TLS")?
        .connect()
        .await
        .with_context(|| format!("Failed to connect to {}", config.endpoint))?;

    tracing::info!("Connected to Geyser endpoint {}", config.endpoint);
    Ok(client)
}

/// Subscription for every transaction touching the watched programs
pub fn create_subscribe_request(config: &StreamConfig) -> SubscribeRequest {
    let mut transactions = HashMap::new();
    transactions.insert(
        TRANSACTION_FILTER_NAME.to_string(),
        SubscribeRequestFilterTransactions { account_include: config.program_ids.clone(), ..Default::default() },
    );

    SubscribeRequest {
        transactions,
        commitment: Some(commitment_level(config.commitment) as i32),
        ..Default::default()
    }
}

fn commitment_level(commitment: Commitment) -> CommitmentLevel {
    match commitment {
        Commitment::Processed => CommitmentLevel::Processed,
        Commitment::Confirmed => CommitmentLevel::Confirmed,
        Commitment::Finalized => CommitmentLevel::Finalized,
    }
}
