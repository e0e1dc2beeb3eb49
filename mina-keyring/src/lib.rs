//! Mina keyring - per-network HD key derivation for the Mina protocol
//!
//! This library derives Mina account keys from a host-supplied BIP44 key
//! node (`m/44'/12586'`), encodes them in Mina's private key text format and
//! delegates public key computation to a signing client configured for the
//! network's curve variant. It also carries the account store, faucet and
//! configuration plumbing a wallet host needs around that pipeline.

pub mod account;
pub mod config;
pub mod crypto;
pub mod error;
pub mod faucet;
pub mod network;

#[cfg(test)]
mod testing;

// Re-export commonly used types for convenience
pub use account::{AccountIndex, KeyringService};
pub use crypto::keys::{KeyDerivationEngine, KeyPair};
pub use error::{Error, Result};
pub use network::{CurveVariant, Network, NetworkDescriptor, NetworkRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
