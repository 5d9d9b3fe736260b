use std::path::PathBuf;

use crate::Address;

#[derive(thiserror::Error, Debug)]
pub enum WalletError {
    #[error("Failed to access keystore: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to decrypt key file {0}: {1}")]
    DecryptFailed(PathBuf, eth_keystore::KeystoreError),
    #[error("Failed to encrypt key: {0}")]
    EncryptFailed(eth_keystore::KeystoreError),
    #[error("Invalid private key in {0}")]
    InvalidKey(PathBuf),
    #[error("Key file belongs to {actual}, expected {expected}")]
    AddressMismatch { expected: Address, actual: Address },
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}
