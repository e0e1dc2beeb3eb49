//! Tests for per-network key derivation

mod common;

use std::sync::Arc;

use common::{DigestClient, GOLDEN_PRIVATE_KEYS, PHRASE};
use mina_keyring::account::{EntropyProvider, InMemoryAccountStore, SeedEntropyProvider, StaticNodeProvider};
use mina_keyring::crypto::keys::encoding::{decode_payload, PRIVATE_KEY_VERSION};
use mina_keyring::crypto::{mnemonic_to_seed, Bip32Node, HdNode};
use mina_keyring::network::MINA_COIN_TYPE;
use mina_keyring::{
    AccountIndex, CurveVariant, Error, KeyDerivationEngine, KeyringService, Network, NetworkRegistry,
};

fn coin_node() -> Bip32Node {
    let seed = mnemonic_to_seed(PHRASE, None).unwrap();
    Bip32Node::from_seed(&seed).unwrap().derive_bip44_coin(MINA_COIN_TYPE).unwrap()
}

fn account(index: u32) -> AccountIndex {
    AccountIndex::try_from(index).unwrap()
}

#[test]
fn test_golden_private_keys() {
    let node = coin_node();

    for (index, expected) in GOLDEN_PRIVATE_KEYS.iter().enumerate() {
        let private_key = KeyDerivationEngine::derive_private_key(&node, account(index as u32)).unwrap();
        assert_eq!(&private_key, expected);
    }
}

#[test]
fn test_determinism() {
    let node = coin_node();
    let berkeley = NetworkRegistry::resolve("berkeley").unwrap();

    let first = KeyDerivationEngine::derive(&node, &berkeley, account(7), &DigestClient).unwrap();
    let second = KeyDerivationEngine::derive(&node, &berkeley, account(7), &DigestClient).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_distinct_accounts() {
    let node = coin_node();
    let mainnet = NetworkRegistry::resolve("mainnet").unwrap();

    let zero = KeyDerivationEngine::derive(&node, &mainnet, account(0), &DigestClient).unwrap();
    let one = KeyDerivationEngine::derive(&node, &mainnet, account(1), &DigestClient).unwrap();

    assert_ne!(zero.private_key(), one.private_key());
    assert_ne!(zero.public_key(), one.public_key());
}

#[test]
fn test_payload_layout() {
    let node = coin_node();
    let private_key = KeyDerivationEngine::derive_private_key(&node, account(0)).unwrap();
    let payload = decode_payload(&private_key).unwrap();

    let mut expected = node.derive_hardened(0).unwrap().private_key_bytes().unwrap();
    expected[0] &= 0x3f;
    expected.reverse();

    assert_eq!(payload[..2], PRIVATE_KEY_VERSION);
    assert_eq!(payload[2..], expected);
    // Masked top bits end up in the last payload byte
    assert_eq!(payload[33] & 0xc0, 0);
}

#[test]
fn test_registry_scenario() {
    assert_eq!(NetworkRegistry::resolve("berkeley").unwrap().curve_variant, CurveVariant::Testnet);
    assert_eq!(NetworkRegistry::resolve("devnet").unwrap().curve_variant, CurveVariant::Testnet);
    assert_eq!(NetworkRegistry::resolve("mainnet").unwrap().curve_variant, CurveVariant::Mainnet);
    assert!(matches!(NetworkRegistry::resolve("berkley"), Err(Error::UnknownNetwork(_))));
}

#[test]
fn test_public_only_node_yields_no_key() {
    let node = coin_node().neuter();
    let devnet = NetworkRegistry::resolve("devnet").unwrap();

    let result = KeyDerivationEngine::derive(&node, &devnet, account(0), &DigestClient);
    assert!(matches!(result, Err(Error::KeyDerivation(_))));
}

#[tokio::test]
async fn test_host_supplied_node_matches_seed() {
    let node = coin_node();
    let json = serde_json::json!({
        "depth": 2,
        "index": node.child_index(),
        "privateKey": format!("0x{}", hex::encode(node.private_key_bytes().unwrap())),
        "publicKey": format!("0x{}", hex::encode(node.public_key())),
        "chainCode": format!("0x{}", hex::encode(node.chain_code())),
    })
    .to_string();

    let provider = StaticNodeProvider::from_json(MINA_COIN_TYPE, &json).unwrap();
    let host_node = provider.bip44_node(MINA_COIN_TYPE).await.unwrap();

    assert_eq!(
        KeyDerivationEngine::derive_private_key(&host_node, account(2)).unwrap(),
        GOLDEN_PRIVATE_KEYS[2]
    );
}

#[tokio::test]
async fn test_concurrent_derivations() {
    let service = Arc::new(KeyringService::new(
        Network::Devnet,
        SeedEntropyProvider::from_mnemonic(PHRASE, None).unwrap(),
        DigestClient,
        InMemoryAccountStore::new(),
    ));

    let handles: Vec<_> = (0..3u32)
        .map(|index| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.generate_keypair(Some(index)).await })
        })
        .collect();

    for (index, handle) in handles.into_iter().enumerate() {
        let key_pair = handle.await.unwrap().unwrap();
        assert_eq!(key_pair.private_key(), GOLDEN_PRIVATE_KEYS[index]);
    }
}

#[tokio::test]
async fn test_default_account_is_zero() {
    let service = KeyringService::new(
        Network::Mainnet,
        SeedEntropyProvider::from_mnemonic(PHRASE, None).unwrap(),
        DigestClient,
        InMemoryAccountStore::new(),
    );

    let key_pair = service.generate_keypair(None).await.unwrap();
    assert_eq!(key_pair.private_key(), GOLDEN_PRIVATE_KEYS[0]);
    assert!(key_pair.public_key().starts_with("B62"));
}
