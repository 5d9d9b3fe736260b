//! The name registry contract, reached over JSON-RPC.

use std::sync::Arc;

use async_trait::async_trait;
use ethers::{
    contract::{abigen, ContractCall},
    middleware::SignerMiddleware,
    providers::{Http, JsonRpcClient, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{Address, TxHash, U256},
};
use log::{debug, info};

use crate::{
    biz::{Connector, NameHash, Registry},
    config::Config,
    error::Error,
};

abigen!(
    SimpleRegistry,
    r#"[
        function fee() external view returns (uint256)
        function reserve(bytes32 name) external payable
        function getOwner(bytes32 name) external view returns (address)
    ]"#,
);

/// Dials nodes over HTTP.
#[derive(Debug, Clone, Default)]
pub struct RpcConnector {
    /// If set, the node must report this chain id.
    chain_id: Option<u64>,
    /// Send pre-EIP-1559 transactions.
    legacy_tx: bool,
}

impl RpcConnector {
    pub fn new(config: &Config) -> Self {
        Self {
            chain_id: config.chain_id,
            legacy_tx: config.legacy_tx,
        }
    }

    /// Bind the registry at `contract` on an already constructed provider.
    pub async fn bind<P>(
        &self,
        provider: Provider<P>,
        contract: Address,
    ) -> Result<RpcRegistry<P>, Error>
    where
        P: JsonRpcClient + Clone + 'static,
    {
        // The http transport is connectionless, ask for the chain id to know the node is there.
        let chain_id = provider.get_chainid().await?.as_u64();
        if let Some(expected) = self.chain_id {
            if expected != chain_id {
                return Err(Error::ChainIdMismatch(expected, chain_id));
            }
        }

        Ok(RpcRegistry {
            contract: SimpleRegistry::new(contract, Arc::new(provider.clone())),
            provider,
            chain_id,
            legacy_tx: self.legacy_tx,
        })
    }
}

#[async_trait]
impl Connector for RpcConnector {
    type Registry = RpcRegistry<Http>;

    async fn connect(&self, rpc_url: &str, contract: Address) -> Result<Self::Registry, Error> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| Error::InvalidRpcUrl(format!("{rpc_url}: {e}")))?;

        let registry = self.bind(provider, contract).await?;
        info!("📣 Connected to {rpc_url}, chain id: {}", registry.chain_id);

        Ok(registry)
    }
}

#[derive(Debug, Clone)]
pub struct RpcRegistry<P = Http> {
    provider: Provider<P>,
    // Read-only binding, transactions get their own signing binding.
    contract: SimpleRegistry<Provider<P>>,
    chain_id: u64,
    legacy_tx: bool,
}

impl<P> RpcRegistry<P>
where
    P: JsonRpcClient + Clone + 'static,
{
    // `reserve(name_hash)` carrying `value`, in the configured transaction type.
    fn reservation<M: Middleware>(
        &self,
        contract: &SimpleRegistry<M>,
        name_hash: NameHash,
        value: U256,
    ) -> ContractCall<M, ()> {
        let call = contract.reserve(name_hash.into()).value(value);
        if self.legacy_tx {
            call.legacy()
        } else {
            call
        }
    }
}

#[async_trait]
impl<P> Registry for RpcRegistry<P>
where
    P: JsonRpcClient + Clone + 'static,
{
    async fn fee(&self) -> Result<U256, Error> {
        self.contract
            .fee()
            .call()
            .await
            .map_err(|e| Error::CallFailed("fee", e.to_string()))
    }

    async fn reserve(
        &self,
        signer: LocalWallet,
        name_hash: NameHash,
        value: U256,
    ) -> Result<TxHash, Error> {
        let signer = signer.with_chain_id(self.chain_id);
        debug!("Signing reservation as {:?}", signer.address());

        let client = Arc::new(SignerMiddleware::new(self.provider.clone(), signer));
        let contract = SimpleRegistry::new(self.contract.address(), client);

        let call = self.reservation(&contract, name_hash, value);
        let pending = call
            .send()
            .await
            .map_err(|e| Error::SubmitFailed("reserve", e.to_string()))?;

        Ok(*pending)
    }

    async fn get_owner(&self, name_hash: NameHash) -> Result<Address, Error> {
        self.contract
            .get_owner(name_hash.into())
            .call()
            .await
            .map_err(|e| Error::CallFailed("get_owner", e.to_string()))
    }
}
