//! Faucet client
//!
//! Requests test funds for an address on networks that run a faucet.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::FaucetConfig;
use crate::error::{Error, Result};
use crate::network::NetworkDescriptor;

/// Outcome of a successful faucet request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaucetReceipt {
    /// Payment (transaction) identifier returned by the faucet
    pub payment_id: String,
    /// Explorer link for the payment
    pub explorer_url: String,
}

/// Something that can fund an address
#[async_trait]
pub trait FaucetService: Send + Sync {
    async fn request_funds(&self, address: &str, network: &NetworkDescriptor) -> Result<FaucetReceipt>;
}

#[derive(Debug, Serialize)]
struct FaucetRequest<'a> {
    address: &'a str,
    network: &'a str,
}

#[derive(Debug, Deserialize)]
struct FaucetResponse {
    #[serde(default)]
    message: Option<FaucetMessage>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct FaucetMessage {
    #[serde(rename = "paymentID")]
    payment_id: Option<String>,
}

/// Faucet reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpFaucetClient {
    client: reqwest::Client,
    config: FaucetConfig,
}

impl HttpFaucetClient {
    pub fn new(config: FaucetConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::UpstreamUnavailable(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FaucetConfig {
        &self.config
    }
}

/// Faucet alias of `network`, or an error when it has none
pub fn faucet_alias(network: &NetworkDescriptor) -> Result<&'static str> {
    network
        .faucet_alias
        .ok_or_else(|| Error::Faucet(format!("No faucet for network {}", network.name)))
}

/// Explorer link for a faucet payment
pub fn explorer_tx_url(explorer_url: &str, network: &NetworkDescriptor, payment_id: &str) -> String {
    format!(
        "{}/{}/tx/{}",
        explorer_url.trim_end_matches('/'),
        network.name,
        payment_id
    )
}

fn parse_response(body: &str) -> Result<String> {
    let response: FaucetResponse = serde_json::from_str(body)
        .map_err(|e| Error::Faucet(format!("Unexpected faucet response: {}", e)))?;

    if let Some(error) = response.error {
        return Err(Error::Faucet(format!("Faucet rejected request: {}", error)));
    }

    response
        .message
        .and_then(|message| message.payment_id)
        .ok_or_else(|| Error::Faucet("Faucet response has no payment id".to_string()))
}

#[async_trait]
impl FaucetService for HttpFaucetClient {
    async fn request_funds(&self, address: &str, network: &NetworkDescriptor) -> Result<FaucetReceipt> {
        let alias = faucet_alias(network)?;
        tracing::info!(network = %network.name, alias, address, "requesting faucet funds");

        let response = self
            .client
            .post(&self.config.url)
            .json(&FaucetRequest { address, network: alias })
            .send()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("Faucet request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("Failed to read faucet response: {}", e)))?;

        if !status.is_success() {
            tracing::warn!(%status, "faucet returned an error status");
            return Err(Error::Faucet(format!("Faucet returned {}: {}", status, body)));
        }

        let payment_id = parse_response(&body)?;
        Ok(FaucetReceipt {
            explorer_url: explorer_tx_url(&self.config.explorer_url, network, &payment_id),
            payment_id,
        })
    }
}
