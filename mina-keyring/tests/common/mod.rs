//! Shared helpers for integration tests

use mina_keyring::crypto::SigningClient;
use mina_keyring::{CurveVariant, Error, Result};
use sha2::{Digest, Sha256};

pub const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

/// Golden private keys for `PHRASE` at m/44'/12586'/i'
pub const GOLDEN_PRIVATE_KEYS: [&str; 3] = [
    "EKDsMLijx8UPwQSxUTqB44iedMzGubUozot1QX4t2Ffrpc29NMEV",
    "EKExUpLx34Et5F6oC1DEodYsfaqHNJNjcusSDi7EJSade8CkyMEx",
    "EKFKCkFcaCo3cqP2wSmo8zGrwZjSsDsAv6SkQH7Nw5zGfKzP1679",
];

/// Deterministic stand-in for a Mina signing client
#[derive(Debug, Default, Clone)]
pub struct DigestClient;

impl SigningClient for DigestClient {
    fn derive_public_key(&self, variant: CurveVariant, private_key: &str) -> Result<String> {
        mina_keyring::crypto::decode_private_key(private_key)?;
        let digest = Sha256::digest(format!("{}:{}", variant, private_key));
        Ok(format!("B62{}", hex::encode(&digest[..26])))
    }

    fn create_nullifier(
        &self,
        _variant: CurveVariant,
        _message: &[u64],
        _private_key: &str,
    ) -> Result<serde_json::Value> {
        Err(Error::UpstreamUnavailable("nullifiers not supported".to_string()))
    }
}
