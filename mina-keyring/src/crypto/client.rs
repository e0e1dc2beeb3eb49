//! Signing client seam
//!
//! Curve arithmetic on Pallas lives in the network's signing client, not in
//! this crate. The keyring hands it encoded private keys and a curve variant.

use crate::error::Result;
use crate::network::CurveVariant;

/// A Mina signing client able to work on encoded private keys
pub trait SigningClient: Send + Sync {
    /// Compute the Base58 public key for an encoded private key
    fn derive_public_key(&self, variant: CurveVariant, private_key: &str) -> Result<String>;

    /// Build the public part of a protocol nullifier for `message`
    fn create_nullifier(
        &self,
        variant: CurveVariant,
        message: &[u64],
        private_key: &str,
    ) -> Result<serde_json::Value>;
}

impl<C: SigningClient + ?Sized> SigningClient for std::sync::Arc<C> {
    fn derive_public_key(&self, variant: CurveVariant, private_key: &str) -> Result<String> {
        (**self).derive_public_key(variant, private_key)
    }

    fn create_nullifier(
        &self,
        variant: CurveVariant,
        message: &[u64],
        private_key: &str,
    ) -> Result<serde_json::Value> {
        (**self).create_nullifier(variant, message, private_key)
    }
}
