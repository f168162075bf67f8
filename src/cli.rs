/// CLI Module
///
/// Command-line interface configuration using clap.
use clap::{Parser, ValueEnum};

/// Pump.fun Mint Watcher
///
/// Watch a Geyser stream for new pump.fun token creations and print them
#[derive(Parser, Debug)]
#[command(name = "pump-mint-watcher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Geyser gRPC endpoint (overrides ENDPOINT env var)
    #[arg(short = 'e', long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Geyser x-token (overrides TOKEN env var)
    #[arg(short = 't', long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Commitment level for the subscription
    #[arg(short = 'c', long, value_enum, default_value_t = Commitment::Finalized)]
    pub commitment: Commitment,

    /// IPFS gateway base URL, tried in the given order (repeatable, replaces the defaults)
    #[arg(short = 'g', long = "gateway", value_name = "URL")]
    pub gateways: Vec<String>,

    /// Per-gateway request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value = "5")]
    pub gateway_timeout: u64,

    /// How detected mints are written out
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Log)]
    pub output: OutputFormat,

    /// Decode a single transaction fetched over JSON-RPC instead of streaming
    #[arg(long, value_name = "SIGNATURE")]
    pub replay: Option<String>,

    /// JSON-RPC endpoint used by --replay (overrides RPC_URL env var)
    #[arg(short = 'r', long, value_name = "URL", requires = "replay")]
    pub rpc_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable banner through the logger
    Log,
    /// One JSON object per line on stdout
    Json,
}
