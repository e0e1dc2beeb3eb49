//! Hierarchical-deterministic key nodes
//!
//! The node handed to the derivation engine is an opaque capability owned by
//! the host. [`HdNode`] exposes only the two things the engine needs from it.
//! [`Bip32Node`] is a secp256k1 BIP32 implementation of that capability, used
//! when the seed is available locally or the host ships a serialized node.

use hmac::{Hmac, Mac};
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use serde::Deserialize;
use sha2::Sha512;

use crate::error::{Error, Result};

/// Hardened derivation offset (2^31)
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// BIP44 purpose segment
pub const BIP44_PURPOSE: u32 = 44;

/// Deepest node BIP32 can serialize
pub const MAX_DEPTH: u8 = u8::MAX;

/// A key-tree node the derivation engine can walk
pub trait HdNode: Sized {
    /// Derive the hardened child at `index'`. `index` is the unhardened value.
    fn derive_hardened(&self, index: u32) -> Result<Self>;

    /// The node's 32-byte private scalar, if it carries one
    fn private_key_bytes(&self) -> Option<[u8; 32]>;
}

/// A secp256k1 BIP32 extended key
#[derive(Clone)]
pub struct Bip32Node {
    depth: u8,
    child_index: u32,
    chain_code: [u8; 32],
    private_key: Option<[u8; 32]>,
    public_key: [u8; 33],
}

impl std::fmt::Debug for Bip32Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bip32Node")
            .field("depth", &self.depth)
            .field("child_index", &self.child_index)
            .field("public_key", &hex::encode(self.public_key))
            .field("has_private_key", &self.private_key.is_some())
            .finish()
    }
}

/// Serialized node as handed over by a wallet host
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeJson {
    depth: u8,
    #[serde(default)]
    index: u32,
    #[serde(default)]
    private_key: Option<String>,
    public_key: String,
    chain_code: String,
}

impl Bip32Node {
    /// Derive the master node from a seed
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        let mut hmac = Hmac::<Sha512>::new_from_slice(b"Bitcoin seed")
            .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;

        hmac.update(seed);
        let result = hmac.finalize().into_bytes();

        let mut secret_key = [0u8; 32];
        let mut chain_code = [0u8; 32];

        secret_key.copy_from_slice(&result[0..32]);
        chain_code.copy_from_slice(&result[32..64]);

        Self::from_parts(0, 0, chain_code, secret_key)
    }

    /// Parse a node serialized by the host
    ///
    /// Keys are `0x`-prefixed hex. `publicKey` may be compressed (33 bytes) or
    /// uncompressed (65 bytes). A node without `privateKey` is public-only.
    pub fn from_json(json: &str) -> Result<Self> {
        let node: NodeJson = serde_json::from_str(json)
            .map_err(|e| Error::KeyDerivation(format!("Malformed node: {}", e)))?;

        let chain_code: [u8; 32] = decode_hex_array(&node.chain_code, "chainCode")?;
        let public_key = PublicKey::from_slice(&decode_hex(&node.public_key, "publicKey")?)
            .map_err(|e| Error::KeyDerivation(format!("Invalid public key: {}", e)))?
            .serialize();

        match node.private_key {
            Some(private_key) => {
                let private_key: [u8; 32] = decode_hex_array(&private_key, "privateKey")?;
                let parsed = Self::from_parts(node.depth, node.index, chain_code, private_key)?;
                if parsed.public_key != public_key {
                    return Err(Error::KeyDerivation(
                        "Public key does not match private key".to_string(),
                    ));
                }
                Ok(parsed)
            }
            None => Ok(Self {
                depth: node.depth,
                child_index: node.index,
                chain_code,
                private_key: None,
                public_key,
            }),
        }
    }

    fn from_parts(depth: u8, child_index: u32, chain_code: [u8; 32], private_key: [u8; 32]) -> Result<Self> {
        let secp = Secp256k1::new();
        let secret_key = SecretKey::from_slice(&private_key)
            .map_err(|e| Error::KeyDerivation(format!("Invalid secret key: {}", e)))?;
        let public_key = PublicKey::from_secret_key(&secp, &secret_key).serialize();

        Ok(Self {
            depth,
            child_index,
            chain_code,
            private_key: Some(private_key),
            public_key,
        })
    }

    /// Derive through a full path of raw child indices
    pub fn derive_path(&self, path: &[u32]) -> Result<Self> {
        path.iter().try_fold(self.clone(), |node, &index| node.derive_child(index))
    }

    /// Derive the node scoped to `m/44'/<coin_type>'` from a master node
    pub fn derive_bip44_coin(&self, coin_type: u32) -> Result<Self> {
        self.derive_path(&[BIP44_PURPOSE | HARDENED_OFFSET, coin_type | HARDENED_OFFSET])
    }

    /// Derive a child at a raw index. Only hardened indices are supported.
    pub fn derive_child(&self, index: u32) -> Result<Self> {
        if index < HARDENED_OFFSET {
            return Err(Error::KeyDerivation(format!(
                "Non-hardened derivation is not supported: {}",
                index
            )));
        }
        if self.depth == MAX_DEPTH {
            return Err(Error::KeyDerivation("Maximum derivation depth exceeded".to_string()));
        }
        let parent_key = self.private_key.ok_or_else(|| {
            Error::KeyDerivation("Cannot derive a hardened child from a public-only node".to_string())
        })?;

        let parent_secret_key = SecretKey::from_slice(&parent_key)
            .map_err(|e| Error::KeyDerivation(format!("Invalid parent key: {}", e)))?;

        let mut data = Vec::with_capacity(37);
        data.push(0);
        data.extend_from_slice(&parent_key);
        data.extend_from_slice(&index.to_be_bytes());

        let mut hmac = Hmac::<Sha512>::new_from_slice(&self.chain_code)
            .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;

        hmac.update(&data);
        let result = hmac.finalize().into_bytes();

        let mut child_chain_code = [0u8; 32];
        child_chain_code.copy_from_slice(&result[32..64]);

        // child = parse256(IL) + parent (mod n)
        let child_secret_key = SecretKey::from_slice(&result[0..32])
            .map_err(|e| Error::KeyDerivation(format!("Invalid child key: {}", e)))?
            .add_tweak(&parent_secret_key.into())
            .map_err(|e| Error::KeyDerivation(format!("Key addition error: {}", e)))?;

        Self::from_parts(
            self.depth + 1,
            index,
            child_chain_code,
            child_secret_key.secret_bytes(),
        )
    }

    /// Drop the private key, keeping a public-only node
    pub fn neuter(&self) -> Self {
        Self {
            private_key: None,
            ..self.clone()
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Raw child index this node was derived at, hardened bit included
    pub fn child_index(&self) -> u32 {
        self.child_index
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Compressed secp256k1 public key
    pub fn public_key(&self) -> &[u8; 33] {
        &self.public_key
    }
}

impl HdNode for Bip32Node {
    fn derive_hardened(&self, index: u32) -> Result<Self> {
        if index >= HARDENED_OFFSET {
            return Err(Error::InvalidInput(format!(
                "Child index out of hardened range: {}",
                index
            )));
        }
        self.derive_child(index | HARDENED_OFFSET)
    }

    fn private_key_bytes(&self) -> Option<[u8; 32]> {
        self.private_key
    }
}

fn decode_hex(value: &str, field: &str) -> Result<Vec<u8>> {
    hex::decode(value.trim_start_matches("0x"))
        .map_err(|e| Error::KeyDerivation(format!("Invalid {} hex: {}", field, e)))
}

fn decode_hex_array<const N: usize>(value: &str, field: &str) -> Result<[u8; N]> {
    decode_hex(value, field)?.try_into().map_err(|bytes: Vec<u8>| {
        Error::KeyDerivation(format!("Invalid {} length: {}", field, bytes.len()))
    })
}
