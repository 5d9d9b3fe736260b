//! Mock registry for testing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ethers::{
    providers::ProviderError,
    signers::{LocalWallet, Signer},
    types::{Address, TxHash, U256},
};

use crate::{
    biz::{Connector, NameHash, Registry},
    error::Error,
};

/// What the mock received with a `reserve` call.
#[derive(Debug, Clone, Copy)]
pub struct Reservation {
    pub signer: Address,
    pub name_hash: NameHash,
    pub value: U256,
}

#[derive(Debug, Default)]
struct Record {
    calls: Vec<&'static str>,
    reservation: Option<Reservation>,
    queried: Option<NameHash>,
}

/// Scripted connector. Every call is recorded in order; the call named by `fail_at`
/// returns an error instead of its scripted value.
#[derive(Debug, Clone)]
pub struct MockConnector {
    pub fee: U256,
    pub tx_hash: TxHash,
    pub owner: Address,
    pub fail_at: Option<&'static str>,
    record: Arc<Mutex<Record>>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self {
            fee: U256::exp10(15),
            tx_hash: TxHash::repeat_byte(0xab),
            owner: Address::repeat_byte(0x5a),
            fail_at: None,
            record: Arc::default(),
        }
    }
}

impl MockConnector {
    pub fn failing_at(call: &'static str) -> Self {
        Self {
            fail_at: Some(call),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.record.lock().unwrap().calls.clone()
    }

    pub fn reservation(&self) -> Option<Reservation> {
        self.record.lock().unwrap().reservation
    }

    pub fn queried(&self) -> Option<NameHash> {
        self.record.lock().unwrap().queried
    }

    // Record `call` and report whether it is scripted to fail.
    fn enter(&self, call: &'static str) -> bool {
        self.record.lock().unwrap().calls.push(call);
        self.fail_at == Some(call)
    }
}

#[async_trait]
impl Connector for MockConnector {
    type Registry = MockConnector;

    async fn connect(&self, _rpc_url: &str, _contract: Address) -> Result<Self::Registry, Error> {
        if self.enter("connect") {
            let err = ProviderError::CustomError("connection refused".to_string());
            return Err(err.into());
        }
        Ok(self.clone())
    }
}

#[async_trait]
impl Registry for MockConnector {
    async fn fee(&self) -> Result<U256, Error> {
        if self.enter("fee") {
            return Err(Error::CallFailed("fee", "execution reverted".to_string()));
        }
        Ok(self.fee)
    }

    async fn reserve(
        &self,
        signer: LocalWallet,
        name_hash: NameHash,
        value: U256,
    ) -> Result<TxHash, Error> {
        if self.enter("reserve") {
            return Err(Error::SubmitFailed("reserve", "insufficient funds".to_string()));
        }
        self.record.lock().unwrap().reservation = Some(Reservation {
            signer: signer.address(),
            name_hash,
            value,
        });
        Ok(self.tx_hash)
    }

    async fn get_owner(&self, name_hash: NameHash) -> Result<Address, Error> {
        if self.enter("get_owner") {
            return Err(Error::CallFailed("get_owner", "execution reverted".to_string()));
        }
        self.record.lock().unwrap().queried = Some(name_hash);
        Ok(self.owner)
    }
}
