//! Chain RPC provider setup and the client seam used by probes and oracles

use alloy::{
    primitives::{Address, Bytes, keccak256},
    providers::{Provider, ProviderBuilder},
    rpc::types::eth::TransactionRequest,
    transports::http::reqwest::Url,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use crate::{
    config::Config,
    errors::{ProbeError, ProbeResult},
    ConcreteProvider,
};

/// The two RPC capabilities the sidecar needs from a chain node.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// `eth_blockNumber`.
    async fn block_number(&self) -> Result<u64>;

    /// Read-only `eth_call` of a zero-argument method, e.g.
    /// `latestAnswer()`; returns the ABI-encoded return data.
    async fn call_view(&self, contract: Address, signature: &str) -> Result<Bytes>;
}

#[async_trait]
impl ChainClient for ConcreteProvider {
    async fn block_number(&self) -> Result<u64> {
        self.get_block_number()
            .await
            .context("Failed to get block number")
    }

    async fn call_view(&self, contract: Address, signature: &str) -> Result<Bytes> {
        let data = keccak256(signature)[..4].to_vec();
        let tx = TransactionRequest::default()
            .to(contract)
            .input(data.into());

        self.call(&tx)
            .await
            .with_context(|| format!("Failed to call {} on {}", signature, contract))
    }
}

pub fn setup_provider(config: &Config) -> Result<Arc<ConcreteProvider>> {
    if !config.rpc_url_configured {
        warn!("⚠️ INFURA_URL not set, falling back to {}", config.rpc_url);
    }

    let rpc_url: Url = config.rpc_url.parse().context("Invalid RPC URL")?;
    let provider: Arc<ConcreteProvider> = Arc::new(
        ProviderBuilder::new()
            .on_http(rpc_url)
            .boxed()
    );

    Ok(provider)
}

/// One-shot connectivity check at startup. Failure is logged, never fatal.
pub async fn test_connection(client: &dyn ChainClient) -> Option<u64> {
    info!("🔗 Testing connection to Ethereum...");
    match client.block_number().await {
        Ok(block) => {
            info!("✅ Connected to Ethereum. Latest block: {}", block);
            Some(block)
        }
        Err(e) => {
            error!("Cannot connect to Ethereum provider: {:#}", e);
            None
        }
    }
}

/// `block_number` bounded by `timeout`; elapsed time counts as unreachable.
pub async fn block_number_within(client: &dyn ChainClient, timeout: Duration) -> ProbeResult<u64> {
    match tokio::time::timeout(timeout, client.block_number()).await {
        Ok(Ok(block)) => Ok(block),
        Ok(Err(e)) => Err(ProbeError::UpstreamUnreachable {
            message: format!("{:#}", e),
            source: Some(e),
        }),
        Err(_) => Err(ProbeError::UpstreamUnreachable {
            message: format!("block number request timed out after {:?}", timeout),
            source: None,
        }),
    }
}
