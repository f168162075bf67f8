/// Token Metadata Module
///
/// Resolves the image of a freshly created token. The metadata JSON behind the
/// token URI is fetched through a list of IPFS gateways in priority order, the
/// first body carrying an `image` field wins.
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::sync::Arc;

use crate::config::GatewayConfig;

/// Returned when no image could be resolved
pub const INVALID_URI: &str = "invalid uri";

const IPFS_SCHEME: &str = "ipfs://";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// Fetches the metadata JSON document at a URL
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, FetchError>;
}

/// Gateway fetcher over HTTP
pub struct HttpMetadataFetcher {
    client: Client,
}

impl HttpMetadataFetcher {
    pub fn new(config: &GatewayConfig) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl MetadataFetcher for HttpMetadataFetcher {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let response = self.client.get(url).header(ACCEPT, "application/json").send().await?.error_for_status()?;

        let body = response.json::<serde_json::Value>().await?;
        if !body.is_object() {
            return Err(FetchError::Unexpected(format!("expected a JSON object from {}", url)));
        }
        Ok(body)
    }
}

pub struct ImageResolver {
    fetcher: Arc<dyn MetadataFetcher>,
    config: GatewayConfig,
}

impl ImageResolver {
    /// Create a resolver that talks to the configured gateways over HTTP
    pub fn new(config: GatewayConfig) -> Result<Self, FetchError> {
        let fetcher = HttpMetadataFetcher::new(&config)?;
        Ok(Self::with_fetcher(Arc::new(fetcher), config))
    }

    pub fn with_fetcher(fetcher: Arc<dyn MetadataFetcher>, config: GatewayConfig) -> Self {
        Self { fetcher, config }
    }

    /// Resolve the image URI behind a token metadata URI
    ///
    /// Never fails: gateway errors are logged and the next gateway is tried,
    /// [`INVALID_URI`] is returned once every gateway has been exhausted.
    pub async fn resolve(&self, metadata_uri: &str) -> String {
        if metadata_uri.is_empty() || metadata_uri == INVALID_URI {
            return INVALID_URI.to_string();
        }

        let cid = content_id(metadata_uri);

        for gateway in &self.config.gateways {
            let gateway_url = format!("{}{}", gateway, cid);

            match self.fetcher.fetch_json(&gateway_url).await {
                Ok(body) => match image_field(&body) {
                    Some(image) => {
                        tracing::debug!("Resolved metadata for {} from {}", cid, gateway);
                        return normalize_image_uri(image, &self.config.canonical_host);
                    }
                    None => tracing::warn!("No image in metadata from {} for {}", gateway, cid),
                },
                Err(e) => tracing::warn!("Failed to fetch from {}: {}", gateway, e),
            }
        }

        INVALID_URI.to_string()
    }
}

/// Trailing path segment of a URI
pub fn content_id(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}

fn image_field(body: &serde_json::Value) -> Option<&str> {
    body.get("image").and_then(|v| v.as_str()).filter(|s| !s.is_empty())
}

/// Rewrite `ipfs://<cid>` onto the canonical HTTP gateway, pass anything else through
pub fn normalize_image_uri(image: &str, canonical_host: &str) -> String {
    match image.strip_prefix(IPFS_SCHEME) {
        Some(cid) => format!("https://{}/ipfs/{}", canonical_host, cid),
        None => image.to_string(),
    }
}
