use alloy::{
    network::EthereumWallet,
    providers::{Provider, ProviderBuilder, RootProvider},
    signers::local::PrivateKeySigner,
    transports::http::{Client, Http},
};
use anyhow::{anyhow, Result};
use std::str::FromStr;
use tracing::debug;

/// An HTTP connection to a network. Holds a plain provider for
/// preflight queries; submission goes through a wallet-backed provider
/// built per invocation with [`Connection::signer_provider`].
#[derive(Debug, Clone)]
pub struct Connection {
    rpc_url: String,
    provider: RootProvider<Http<Client>>,
}

impl Connection {
    pub fn new(rpc_url: &str) -> Result<Self> {
        let provider = ProviderBuilder::new().on_http(
            rpc_url
                .parse()
                .map_err(|e| anyhow!("Invalid RPC URL '{}': {}", rpc_url, e))?,
        );

        Ok(Self {
            rpc_url: rpc_url.to_string(),
            provider,
        })
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    pub fn provider(&self) -> &RootProvider<Http<Client>> {
        &self.provider
    }

    /// Build a provider that signs with the given key. Nonce and fee
    /// filling are left to alloy's recommended fillers; this tool does
    /// no nonce management of its own.
    pub fn signer_provider(&self, signer: PrivateKeySigner) -> Result<impl Provider<Http<Client>>> {
        let wallet = EthereumWallet::from(signer);
        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(wallet)
            .on_http(
                self.rpc_url
                    .parse()
                    .map_err(|e| anyhow!("Invalid RPC URL '{}': {}", self.rpc_url, e))?,
            );

        Ok(provider)
    }

    /// Preflight: confirm the endpoint answers at all before a
    /// transaction is signed.
    pub async fn check(&self) -> Result<()> {
        match self.provider.get_block_number().await {
            Ok(block) => {
                debug!("Connected to {} at block {}", self.rpc_url, block);
                Ok(())
            }
            Err(e) => Err(anyhow!(
                "Cannot connect to RPC endpoint '{}': {}",
                self.rpc_url,
                e
            )),
        }
    }

    pub async fn chain_id(&self) -> Result<u64> {
        let chain_id = self.provider.get_chain_id().await?;
        Ok(chain_id)
    }
}

/// Parse a signing key from its hex form, '0x' prefix optional.
pub fn parse_signer(private_key: &str) -> Result<PrivateKeySigner> {
    let private_key = private_key.trim();
    let private_key = private_key.strip_prefix("0x").unwrap_or(private_key);

    PrivateKeySigner::from_str(private_key).map_err(|e| anyhow!("Invalid private key: {}", e))
}
