/// RPC Client Module
///
/// Fetches a single confirmed transaction over Solana JSON-RPC so it can be run
/// through the same formatter as the live stream.
use anyhow::{Context, Result};
use solana_client::{nonblocking::rpc_client::RpcClient, rpc_config::RpcTransactionConfig};
use solana_sdk::{message::VersionedMessage, signature::Signature};
use solana_transaction_status::UiTransactionEncoding;
use std::str::FromStr;

use crate::models::{CompiledInstruction, Message, TransactionUpdate};

pub struct SolanaRpcClient {
    client: RpcClient,
    endpoint: String,
}

impl SolanaRpcClient {
    /// Create a new RPC client connected to the specified endpoint
    pub fn new(endpoint: String) -> Self {
        let client = RpcClient::new(endpoint.clone());

        Self { client, endpoint }
    }

    /// Get the endpoint URL this client is connected to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch a transaction by signature
    pub async fn fetch_transaction(&self, signature: &str) -> Result<TransactionUpdate> {
        let parsed = Signature::from_str(signature).with_context(|| format!("Invalid signature {}", signature))?;

        tracing::debug!("Fetching transaction {}", signature);

        let confirmed = self
            .client
            .get_transaction_with_config(
                &parsed,
                RpcTransactionConfig {
                    encoding: Some(UiTransactionEncoding::Base64),
                    commitment: None,
                    max_supported_transaction_version: Some(0),
                },
            )
            .await
            .with_context(|| format!("Failed to fetch transaction {}", signature))?;

        let transaction =
            confirmed.transaction.transaction.decode().context("Transaction could not be decoded from base64")?;

        Ok(TransactionUpdate {
            signature: parsed.to_string(),
            slot: confirmed.slot,
            message: message_from_versioned(&transaction.message),
        })
    }
}

/// Static account keys and top-level instructions of a decoded message
pub fn message_from_versioned(message: &VersionedMessage) -> Message {
    Message {
        account_keys: message.static_account_keys().to_vec(),
        instructions: message
            .instructions()
            .iter()
            .map(|ix| CompiledInstruction {
                program_id_index: ix.program_id_index as u32,
                accounts: ix.accounts.clone(),
                data: ix.data.clone(),
            })
            .collect(),
    }
}
