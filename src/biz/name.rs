//! Registry keys derived from human-readable names.

use std::{fmt, ops::Deref};

use clap::ValueEnum;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tiny_keccak::{Hasher, Keccak};

/// The digest used to turn a name into a registry key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgo {
    /// The digest the deployed registry was built around.
    #[default]
    Sha256,
    Keccak256,
}

/// A 32-byte registry key, passed to the contract as `bytes32`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct NameHash([u8; 32]);

impl NameHash {
    pub fn compute(name: &str, algo: HashAlgo) -> Self {
        let mut out = [0u8; 32];
        match algo {
            HashAlgo::Sha256 => out.copy_from_slice(&Sha256::digest(name.as_bytes())),
            HashAlgo::Keccak256 => {
                let mut hasher = Keccak::v256();
                hasher.update(name.as_bytes());
                hasher.finalize(&mut out);
            }
        }
        Self(out)
    }
}

impl Deref for NameHash {
    type Target = [u8; 32];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<NameHash> for [u8; 32] {
    fn from(hash: NameHash) -> Self {
        hash.0
    }
}

// For better logging.
impl fmt::Debug for NameHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for NameHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
