use ethers::providers::ProviderError;

/// The exit status reserved for an empty keystore.
pub const EXIT_EMPTY_KEYSTORE: i32 = 2;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Config file not exist: {0}")]
    ConfigNotExist(String),
    #[error(transparent)]
    InvalidConfig(#[from] toml::de::Error),
    #[error("Empty wallet at {0}, create an account first")]
    EmptyKeystore(String),
    #[error("Invalid rpc url: {0}")]
    InvalidRpcUrl(String),
    #[error("Failed to connect to the node: {0}")]
    ConnectFailed(#[from] ProviderError),
    #[error("Chain id mismatch: expected '{0}', node reports '{1}'")]
    ChainIdMismatch(u64, u64),
    #[error("Failed to call '{0}': {1}")]
    CallFailed(&'static str, String),
    #[error("Failed to submit '{0}': {1}")]
    SubmitFailed(&'static str, String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    WalletError(#[from] wallet::WalletError),
}

impl Error {
    /// The process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::EmptyKeystore(_) => EXIT_EMPTY_KEYSTORE,
            _ => 1,
        }
    }
}
