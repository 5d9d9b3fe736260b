use async_trait::async_trait;
use ethers::{
    signers::LocalWallet,
    types::{Address, TxHash, U256},
};

use crate::error::Error;

use super::NameHash;

/// Connector dials a node and binds the name registry contract on it.
#[async_trait]
pub trait Connector: Send + Sync {
    type Registry: Registry;

    /// Connect to the node at `rpc_url`, failing if it is unreachable.
    async fn connect(&self, rpc_url: &str, contract: Address) -> Result<Self::Registry, Error>;
}

/// Registry is a typed handle on the deployed name registry contract.
#[async_trait]
pub trait Registry: Send + Sync {
    /// The value a reservation must carry.
    async fn fee(&self) -> Result<U256, Error>;

    /// Submit a reservation of `name_hash`, signed by `signer`, and return the hash of the
    /// pending transaction. The signer is consumed by the submission.
    async fn reserve(
        &self,
        signer: LocalWallet,
        name_hash: NameHash,
        value: U256,
    ) -> Result<TxHash, Error>;

    /// The current owner of `name_hash`, the zero address if unreserved.
    async fn get_owner(&self, name_hash: NameHash) -> Result<Address, Error>;
}
