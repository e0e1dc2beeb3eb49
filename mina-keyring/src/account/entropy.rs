//! Entropy providers
//!
//! Sources of the coin-type node (`m/44'/<coin_type>'`) the derivation engine
//! walks. A provider refusing access fails with [`Error::EntropyDenied`]; a
//! node that cannot be used fails with [`Error::KeyDerivation`].

use async_trait::async_trait;

use crate::crypto::keys::{Bip32Node, HdNode, BIP44_PURPOSE, HARDENED_OFFSET};
use crate::crypto::mnemonic::mnemonic_to_seed;
use crate::error::{Error, Result};

/// Supplies the hierarchical key node for a coin type
#[async_trait]
pub trait EntropyProvider: Send + Sync {
    type Node: HdNode + Send;

    /// Node scoped to `m/44'/<coin_type>'`
    async fn bip44_node(&self, coin_type: u32) -> Result<Self::Node>;
}

/// Derives coin-type nodes from a locally held BIP39 seed
pub struct SeedEntropyProvider {
    seed: Vec<u8>,
}

impl std::fmt::Debug for SeedEntropyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedEntropyProvider").finish_non_exhaustive()
    }
}

impl SeedEntropyProvider {
    pub fn from_seed(seed: impl Into<Vec<u8>>) -> Self {
        Self { seed: seed.into() }
    }

    pub fn from_mnemonic(phrase: &str, passphrase: Option<&str>) -> Result<Self> {
        let seed = mnemonic_to_seed(phrase, passphrase)?;
        Ok(Self::from_seed(seed.to_vec()))
    }
}

#[async_trait]
impl EntropyProvider for SeedEntropyProvider {
    type Node = Bip32Node;

    async fn bip44_node(&self, coin_type: u32) -> Result<Bip32Node> {
        tracing::debug!(coin_type, "deriving coin-type node from local seed");
        Bip32Node::from_seed(&self.seed)?.derive_bip44_coin(coin_type)
    }
}

/// Serves a single node handed over by the host
#[derive(Debug, Clone)]
pub struct StaticNodeProvider {
    coin_type: u32,
    node: Bip32Node,
}

impl StaticNodeProvider {
    /// Wrap a node the host scoped to `m/44'/<coin_type>'`
    pub fn new(coin_type: u32, node: Bip32Node) -> Result<Self> {
        if node.depth() != 2 || node.child_index() != coin_type | HARDENED_OFFSET {
            return Err(Error::KeyDerivation(format!(
                "Node at depth {} index {:#x} is not m/{}'/{}'",
                node.depth(),
                node.child_index(),
                BIP44_PURPOSE,
                coin_type
            )));
        }
        Ok(Self { coin_type, node })
    }

    pub fn from_json(coin_type: u32, json: &str) -> Result<Self> {
        Self::new(coin_type, Bip32Node::from_json(json)?)
    }
}

#[async_trait]
impl EntropyProvider for StaticNodeProvider {
    type Node = Bip32Node;

    async fn bip44_node(&self, coin_type: u32) -> Result<Bip32Node> {
        if coin_type != self.coin_type {
            return Err(Error::EntropyDenied(format!(
                "Access to coin type {} was not granted",
                coin_type
            )));
        }
        Ok(self.node.clone())
    }
}
