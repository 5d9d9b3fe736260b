//! A keystore of encrypted accounts, stored as Web3 Secret Storage files.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::SystemTime,
};

use k256::ecdsa::SigningKey;
use log::{debug, warn};
use rand_core::OsRng;
use serde::{de::IgnoredAny, Deserialize};

mod address;
mod error;

pub use address::Address;
pub use error::WalletError;

/// An account stored in the keystore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub address: Address,
    /// The key file holding the encrypted private key.
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Keystore {
    dir: PathBuf,
}

impl Keystore {
    /// Open a keystore directory. The directory doesn't have to exist yet.
    pub fn open(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// All accounts in the keystore, sorted by key file path.
    ///
    /// A directory that is missing or can't be scanned holds no accounts.
    pub fn accounts(&self) -> Result<Vec<Account>, WalletError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(err) => {
                warn!("Failed to scan keystore {:?}: {}", self.dir, err);
                return Ok(vec![]);
            }
        };

        let mut accounts = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type()?.is_file() || is_ignored(&path) {
                continue;
            }

            match read_account(&path) {
                Some(address) => accounts.push(Account { address, path }),
                None => warn!("Skipped non-keystore file: {:?}", path),
            }
        }

        accounts.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(accounts)
    }

    /// Create a new account encrypted with `password`.
    pub fn new_account(&self, password: &str) -> Result<Account, WalletError> {
        fs::create_dir_all(&self.dir)?;

        let privkey = SigningKey::random(&mut OsRng);
        let address = Address::from_key(&privkey);
        let name = format!("UTC--{}--{}", unix_timestamp(), hex::encode(*address));

        eth_keystore::encrypt_key(
            &self.dir,
            &mut OsRng,
            privkey.to_bytes(),
            password,
            Some(&name),
        )
        .map_err(WalletError::EncryptFailed)?;

        debug!("New key file: {}", name);
        Ok(Account {
            address,
            path: self.dir.join(name),
        })
    }

    /// Decrypt the private key of `account`.
    pub fn decrypt(&self, account: &Account, password: &str) -> Result<SigningKey, WalletError> {
        let secret = eth_keystore::decrypt_key(&account.path, password)
            .map_err(|e| WalletError::DecryptFailed(account.path.clone(), e))?;

        let privkey = SigningKey::from_slice(&secret)
            .map_err(|_| WalletError::InvalidKey(account.path.clone()))?;

        let actual = Address::from_key(&privkey);
        if actual != account.address {
            return Err(WalletError::AddressMismatch {
                expected: account.address,
                actual,
            });
        }

        Ok(privkey)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WalletConfig {
    pub keystore_dir: String,
}

// The parts of a key file needed to list it without decrypting.
#[derive(Deserialize)]
struct KeyFile {
    address: Option<String>,
    #[serde(alias = "Crypto")]
    #[allow(dead_code)]
    crypto: IgnoredAny,
}

fn is_ignored(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(true, |name| {
            name.starts_with('.') || name.ends_with('~') || name == "README"
        })
}

fn read_account(path: &Path) -> Option<Address> {
    let content = fs::read(path).ok()?;
    let key_file: KeyFile = serde_json::from_slice(&content).ok()?;

    if let Some(address) = key_file.address {
        return address.parse().ok();
    }

    // geth names key files `UTC--<created at>--<address>`.
    let name = path.file_name()?.to_str()?;
    name.rsplit("--").next()?.parse().ok()
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSWORD: &str = "correct horse";

    #[test]
    fn missing_dir_is_empty() {
        let tmpdir = tempfile::tempdir().unwrap();
        let keystore = Keystore::open(tmpdir.path().join("nope"));
        assert!(keystore.accounts().unwrap().is_empty());
    }

    #[test]
    fn keystore_path_is_a_file() {
        let tmpdir = tempfile::tempdir().unwrap();
        let file = tmpdir.path().join("keystore");
        fs::write(&file, "not a directory").unwrap();

        let keystore = Keystore::open(&file);
        assert!(keystore.accounts().unwrap().is_empty());
    }

    #[test]
    fn io_errors_keep_their_cause() {
        let tmpdir = tempfile::tempdir().unwrap();
        let file = tmpdir.path().join("keystore");
        fs::write(&file, "not a directory").unwrap();

        let err = Keystore::open(&file).new_account(PASSWORD).unwrap_err();
        assert!(matches!(err, WalletError::IoError(_)));

        let msg = err.to_string();
        assert!(msg.starts_with("Failed to access keystore: "));
        assert!(msg.len() > "Failed to access keystore: ".len());
    }

    #[test]
    fn wallet_works() {
        let tmpdir = tempfile::tempdir().unwrap();
        let keystore = Keystore::open(tmpdir.path().join("keystore"));

        let acc = keystore.new_account(PASSWORD).unwrap();
        assert_eq!(keystore.accounts().unwrap(), vec![acc.clone()]);

        let key = keystore.decrypt(&acc, PASSWORD).unwrap();
        assert_eq!(Address::from_key(&key), acc.address);
    }

    #[test]
    fn wrong_password_fails() {
        let tmpdir = tempfile::tempdir().unwrap();
        let keystore = Keystore::open(tmpdir.path());

        let acc = keystore.new_account(PASSWORD).unwrap();
        let err = keystore.decrypt(&acc, "wrong").unwrap_err();
        assert!(matches!(err, WalletError::DecryptFailed(..)));
    }

    #[test]
    fn address_must_match_key() {
        let tmpdir = tempfile::tempdir().unwrap();
        let keystore = Keystore::open(tmpdir.path());

        let mut acc = keystore.new_account(PASSWORD).unwrap();
        acc.address = Address::from([0x11; 20]);
        let err = keystore.decrypt(&acc, PASSWORD).unwrap_err();
        assert!(matches!(err, WalletError::AddressMismatch { .. }));
    }

    #[test]
    fn accounts_are_sorted_and_junk_is_skipped() {
        let tmpdir = tempfile::tempdir().unwrap();
        let dir = tmpdir.path();

        let crypto = r#""crypto": {"cipher": "aes-128-ctr"}"#;
        fs::write(
            dir.join("b-key"),
            format!(r#"{{"address": "2222222222222222222222222222222222222222", {crypto}}}"#),
        )
        .unwrap();
        fs::write(
            dir.join("UTC--2018-01-01T00-00-00.000000000Z--1111111111111111111111111111111111111111"),
            format!("{{{crypto}}}"),
        )
        .unwrap();
        fs::write(dir.join(".hidden"), format!("{{{crypto}}}")).unwrap();
        fs::write(dir.join("README"), "keys live here").unwrap();
        fs::write(dir.join("notes.txt"), "not json").unwrap();
        fs::write(dir.join("no-address"), format!("{{{crypto}}}")).unwrap();
        fs::create_dir(dir.join("subdir")).unwrap();

        let accounts = Keystore::open(dir).accounts().unwrap();
        let addrs: Vec<_> = accounts.iter().map(|a| a.address).collect();
        assert_eq!(
            addrs,
            vec![Address::from([0x11; 20]), Address::from([0x22; 20])]
        );
    }
}
