//! Per-network account key derivation

use serde::{Deserialize, Serialize};

use crate::account::AccountIndex;
use crate::crypto::client::SigningClient;
use crate::error::{Error, Result};
use crate::network::NetworkDescriptor;
use super::encoding::encode_private_key;
use super::node::HdNode;

/// A Mina key pair in its text representation
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    /// Base58Check private key (`EK...`)
    private_key: String,
    /// Base58 public key as produced by the signing client
    public_key: String,
}

impl KeyPair {
    /// Create a new key pair
    pub fn new(private_key: String, public_key: String) -> Self {
        Self { private_key, public_key }
    }

    /// Get the encoded private key
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// Get the public key
    pub fn public_key(&self) -> &str {
        &self.public_key
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}

/// Turns a host key-tree node into Mina account keys
///
/// Stateless: every call recomputes from its inputs and keeps nothing, so
/// concurrent calls need no coordination.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyDerivationEngine;

impl KeyDerivationEngine {
    /// Derive the encoded private key for `account` below a node scoped to
    /// `m/44'/<coin_type>'`
    pub fn derive_private_key<N: HdNode>(node: &N, account: AccountIndex) -> Result<String> {
        let child = node.derive_hardened(account.value())?;
        let raw = child.private_key_bytes().ok_or_else(|| {
            Error::KeyDerivation(format!("Unable to derive private key for account {}", account))
        })?;

        Ok(encode_private_key(&raw))
    }

    /// Derive the full key pair, asking `client` for the public key with the
    /// network's curve variant
    pub fn derive<N, C>(
        node: &N,
        network: &NetworkDescriptor,
        account: AccountIndex,
        client: &C,
    ) -> Result<KeyPair>
    where
        N: HdNode,
        C: SigningClient + ?Sized,
    {
        let private_key = Self::derive_private_key(node, account)?;
        let public_key = client.derive_public_key(network.curve_variant, &private_key)?;

        tracing::debug!(
            network = %network.name,
            account = account.value(),
            public_key = %public_key,
            "derived account key pair"
        );

        Ok(KeyPair::new(private_key, public_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::encoding::decode_private_key;
    use crate::network::{Network, NetworkRegistry};
    use crate::testing::{FakeNode, FakeSigningClient};

    fn account(index: u32) -> AccountIndex {
        AccountIndex::try_from(index).unwrap()
    }

    #[test]
    fn test_derive_private_key_from_fake_node() {
        let node = FakeNode::new([0x11; 32]);
        let private_key = KeyDerivationEngine::derive_private_key(&node, account(0)).unwrap();

        let scalar = decode_private_key(&private_key).unwrap();
        let child = node.derive_hardened(0).unwrap().private_key_bytes().unwrap();
        let mut expected = child;
        expected[0] &= 0x3f;
        expected.reverse();
        assert_eq!(scalar, expected);
    }

    #[test]
    fn test_derive_uses_curve_variant() {
        let node = FakeNode::new([0x22; 32]);
        let client = FakeSigningClient::default();

        let mainnet = NetworkRegistry::descriptor(Network::Mainnet);
        let devnet = NetworkRegistry::descriptor(Network::Devnet);
        let berkeley = NetworkRegistry::descriptor(Network::Berkeley);

        let a = KeyDerivationEngine::derive(&node, &mainnet, account(0), &client).unwrap();
        let b = KeyDerivationEngine::derive(&node, &devnet, account(0), &client).unwrap();
        let c = KeyDerivationEngine::derive(&node, &berkeley, account(0), &client).unwrap();

        assert_eq!(a.private_key(), b.private_key());
        assert_ne!(a.public_key(), b.public_key());
        assert_eq!(b, c);
    }

    #[test]
    fn test_public_only_node_fails() {
        let node = FakeNode::public_only();
        let client = FakeSigningClient::default();
        let devnet = NetworkRegistry::descriptor(Network::Devnet);

        let result = KeyDerivationEngine::derive(&node, &devnet, account(3), &client);
        assert!(matches!(result, Err(Error::KeyDerivation(_))));
        assert_eq!(client.calls(), 0);
    }

    #[test]
    fn test_client_failure_propagates() {
        let node = FakeNode::new([0x33; 32]);
        let client = FakeSigningClient::failing();
        let mainnet = NetworkRegistry::descriptor(Network::Mainnet);

        let result = KeyDerivationEngine::derive(&node, &mainnet, account(0), &client);
        assert!(matches!(result, Err(Error::UpstreamUnavailable(_))));
    }

    #[test]
    fn test_key_pair_debug_redacts_private_key() {
        let pair = KeyPair::new("EKsecret".to_string(), "B62public".to_string());
        let debug = format!("{:?}", pair);

        assert!(!debug.contains("EKsecret"));
        assert!(debug.contains("B62public"));
        assert_eq!(
            serde_json::to_value(&pair).unwrap(),
            serde_json::json!({ "privateKey": "EKsecret", "publicKey": "B62public" })
        );
    }
}
