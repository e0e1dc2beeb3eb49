//! Error types for the mina-keyring library

use thiserror::Error;

/// Custom error type for keyring operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The network identifier is not one of the registered networks
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    /// The HD node could not produce the requested child private key
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// Base58Check or payload layout problem
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The entropy provider refused access to the key tree
    #[error("Entropy access denied: {0}")]
    EntropyDenied(String),

    /// A collaborator (signing client, faucet transport) failed
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Mnemonic error: {0}")]
    Mnemonic(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Faucet error: {0}")]
    Faucet(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for keyring operations
pub type Result<T> = std::result::Result<T, Error>;
