/// Configuration Module
///
/// Static program constants plus the runtime settings assembled from the
/// environment (`.env`) and command-line overrides.
use std::env;
use std::time::Duration;

use crate::cli::{Cli, Commitment, OutputFormat};
use crate::models::{AccountRole, AccountSelector};

/// pump.fun bonding curve program
pub const PUMP_PROGRAM_ID: &str = "6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P";

/// Discriminator of the pump.fun `create` instruction
pub const PUMP_FUN_CREATE_IX_DISCRIMINATOR: [u8; 8] = [24, 30, 200, 40, 5, 28, 7, 119];

/// Account slots of the `create` instruction we report
pub const CREATE_ACCOUNT_SELECTORS: [AccountSelector; 4] = [
    AccountSelector { role: AccountRole::Mint, index: 0 },
    AccountSelector { role: AccountRole::BondingCurve, index: 2 },
    AccountSelector { role: AccountRole::AssociatedBondingCurve, index: 3 },
    AccountSelector { role: AccountRole::User, index: 7 },
];

/// IPFS gateways, in the order they are tried
pub const DEFAULT_GATEWAYS: [&str; 3] =
    ["https://dweb.link/ipfs/", "https://cloudflare-ipfs.com/ipfs/", "https://ipfs.io/ipfs/"];

/// Host used when rewriting `ipfs://` image links
pub const CANONICAL_IPFS_HOST: &str = "cloudflare-ipfs.com";

pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(5);

/// Name of the transaction filter in the subscribe request
pub const TRANSACTION_FILTER_NAME: &str = "pumpFun";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} not found in environment. Please provide it in your .env file or via {flag}")]
    Missing { var: &'static str, flag: &'static str },

    #[error("gateway timeout must be greater than 0")]
    ZeroTimeout,
}

/// Settings for the gateway fallback chain
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub gateways: Vec<String>,
    pub canonical_host: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            gateways: DEFAULT_GATEWAYS.iter().map(|g| g.to_string()).collect(),
            canonical_host: CANONICAL_IPFS_HOST.to_string(),
            timeout: DEFAULT_GATEWAY_TIMEOUT,
        }
    }
}

/// Connection settings for the Geyser stream
#[derive(Debug, Clone)]
pub struct StreamConfig {
    pub endpoint: String,
    pub token: String,
    pub commitment: Commitment,
    pub program_ids: Vec<String>,
}

/// Which source of transactions to run against
#[derive(Debug, Clone)]
pub enum RunMode {
    Live(StreamConfig),
    Replay { rpc_url: String, signature: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: RunMode,
    pub gateway: GatewayConfig,
    pub discriminators: Vec<[u8; 8]>,
    pub selectors: Vec<AccountSelector>,
    pub output: OutputFormat,
}

impl Config {
    /// Build the runtime configuration from CLI flags, falling back to environment variables
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        Self::from_lookup(cli, |key| env::var(key).ok())
    }

    fn from_lookup(cli: &Cli, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let resolve = |flag_value: &Option<String>, var: &'static str, flag: &'static str| {
            flag_value
                .clone()
                .or_else(|| lookup(var))
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing { var, flag })
        };

        let mode = match &cli.replay {
            Some(signature) => RunMode::Replay {
                rpc_url: resolve(&cli.rpc_url, "RPC_URL", "--rpc-url")?,
                signature: signature.clone(),
            },
            None => RunMode::Live(StreamConfig {
                endpoint: resolve(&cli.endpoint, "ENDPOINT", "--endpoint")?,
                token: resolve(&cli.token, "TOKEN", "--token")?,
                commitment: cli.commitment,
                program_ids: vec![PUMP_PROGRAM_ID.to_string()],
            }),
        };

        if cli.gateway_timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let mut gateway = GatewayConfig { timeout: Duration::from_secs(cli.gateway_timeout), ..Default::default() };
        if !cli.gateways.is_empty() {
            gateway.gateways = cli.gateways.clone();
        }

        Ok(Self {
            mode,
            gateway,
            discriminators: vec![PUMP_FUN_CREATE_IX_DISCRIMINATOR],
            selectors: CREATE_ACCOUNT_SELECTORS.to_vec(),
            output: cli.output,
        })
    }
}
