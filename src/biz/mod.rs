//! Reserving names on the registry and looking up their owners.

use std::io::Write;

use ethers::{
    signers::LocalWallet,
    types::{Address, TxHash},
    utils::to_checksum,
};
use log::info;
use wallet::Keystore;

use crate::{config::Config, error::Error};

mod name;
mod registry;

pub use name::*;
pub use registry::*;

/// The outcome of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    /// The hash of the pending reservation transaction.
    pub tx_hash: TxHash,
    /// The owner of the name when queried, right after submission.
    pub owner: Address,
}

/// Reserve `name` with the first account of the keystore, then query its owner.
///
/// The transaction hash is written to `out` as soon as the transaction is submitted, the
/// owner once the query returns. `password` is only asked for after the node is reached.
pub async fn reserve_name<C, P, W>(
    config: &Config,
    name: &str,
    connector: &C,
    password: P,
    out: &mut W,
) -> Result<Receipt, Error>
where
    C: Connector,
    P: FnOnce() -> std::io::Result<String>,
    W: Write,
{
    let keystore = Keystore::open(&config.wallet.keystore_dir);
    let account = keystore
        .accounts()?
        .into_iter()
        .next()
        .ok_or_else(|| Error::EmptyKeystore(config.wallet.keystore_dir.clone()))?;
    info!("📣 Account: {}", to_checksum(&Address::from(account.address), None));

    let registry = connector
        .connect(&config.rpc_url, config.contract_address)
        .await?;
    info!("📣 Registry: {:?}", config.contract_address);

    let signer = LocalWallet::from(keystore.decrypt(&account, &password()?)?);

    let name_hash = NameHash::compute(name, config.name_hash);
    info!("📣 Name '{}' hashed to {}", name, name_hash);

    let fee = registry.fee().await?;
    info!("📣 Reservation fee: {} wei", fee);

    let tx_hash = registry.reserve(signer, name_hash, fee).await?;
    writeln!(out, "Reservation pending: {:?}", tx_hash)?;

    let owner = registry.get_owner(name_hash).await?;
    writeln!(out, "{}", to_checksum(&owner, None))?;

    Ok(Receipt { tx_hash, owner })
}

/// Query the current owner of `name` without touching the keystore.
pub async fn lookup_owner<C, W>(
    config: &Config,
    name: &str,
    connector: &C,
    out: &mut W,
) -> Result<Address, Error>
where
    C: Connector,
    W: Write,
{
    let registry = connector
        .connect(&config.rpc_url, config.contract_address)
        .await?;

    let name_hash = NameHash::compute(name, config.name_hash);
    let owner = registry.get_owner(name_hash).await?;
    writeln!(out, "{}", to_checksum(&owner, None))?;

    Ok(owner)
}
