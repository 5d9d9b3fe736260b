//! Address type for accounts.

use std::{
    fmt::{self, Debug},
    ops::Deref,
    str::FromStr,
};

use ethers_core::types::H160;
use k256::ecdsa::SigningKey;
use sha3::{Digest, Keccak256};

use crate::WalletError;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Address([u8; 20]);

impl Address {
    /// Derive the account address of a private key: the last 20 bytes of the
    /// keccak256 hash of the uncompressed public key.
    pub fn from_key(key: &SigningKey) -> Self {
        let pubkey = key.verifying_key().to_encoded_point(false);
        let hash = Keccak256::digest(&pubkey.as_bytes()[1..]);

        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&hash[12..]);
        Self(bytes)
    }

    fn fmt_as_hex(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_as_hex(f)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_as_hex(f)
    }
}

impl Deref for Address {
    type Target = [u8; 20];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

// Accepts both geth's bare hex and the '0x'-prefixed form.
impl FromStr for Address {
    type Err = WalletError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let val = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .unwrap_or(value);

        let bytes = hex::decode(val).map_err(|_| WalletError::InvalidAddress(value.to_string()))?;
        let bytes: [u8; 20] = bytes
            .try_into()
            .map_err(|_| WalletError::InvalidAddress(value.to_string()))?;

        Ok(Self(bytes))
    }
}

// The address type of the chain client.
impl From<Address> for H160 {
    fn from(addr: Address) -> Self {
        H160(addr.0)
    }
}
