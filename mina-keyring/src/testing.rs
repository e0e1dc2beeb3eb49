//! Deterministic fakes shared by unit tests

use std::sync::atomic::{AtomicUsize, Ordering};

use sha2::{Digest, Sha256};

use crate::crypto::client::SigningClient;
use crate::crypto::keys::HdNode;
use crate::error::{Error, Result};
use crate::network::CurveVariant;

/// Node whose children are hashes of the parent bytes and the index
#[derive(Debug, Clone)]
pub struct FakeNode {
    bytes: Option<[u8; 32]>,
}

impl FakeNode {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self { bytes: Some(bytes) }
    }

    pub fn public_only() -> Self {
        Self { bytes: None }
    }
}

impl HdNode for FakeNode {
    fn derive_hardened(&self, index: u32) -> Result<Self> {
        let Some(bytes) = self.bytes else {
            return Ok(Self::public_only());
        };
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        hasher.update(index.to_be_bytes());
        Ok(Self::new(hasher.finalize().into()))
    }

    fn private_key_bytes(&self) -> Option<[u8; 32]> {
        self.bytes
    }
}

/// Signing client producing `B62`-prefixed digests of its inputs
#[derive(Debug, Default)]
pub struct FakeSigningClient {
    failing: bool,
    calls: AtomicUsize,
}

impl FakeSigningClient {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SigningClient for FakeSigningClient {
    fn derive_public_key(&self, variant: CurveVariant, private_key: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(Error::UpstreamUnavailable("signing client offline".to_string()));
        }
        let digest = Sha256::digest(format!("{}:{}", variant, private_key));
        Ok(format!("B62{}", hex::encode(&digest[..26])))
    }

    fn create_nullifier(
        &self,
        variant: CurveVariant,
        message: &[u64],
        private_key: &str,
    ) -> Result<serde_json::Value> {
        let public_key = self.derive_public_key(variant, private_key)?;
        Ok(serde_json::json!({
            "publicKey": public_key,
            "message": message,
        }))
    }
}
