//! Keyring service
//!
//! Composes the network registry, an entropy provider, a signing client and
//! the account store into the operations a wallet host exposes. Each call
//! fetches a fresh node and derives from scratch; nothing is cached and the
//! account store is only read.

use crate::crypto::client::SigningClient;
use crate::crypto::keys::{KeyDerivationEngine, KeyPair};
use crate::error::{Error, Result};
use crate::faucet::{FaucetReceipt, FaucetService};
use crate::network::{Network, NetworkDescriptor, NetworkRegistry};
use super::entropy::EntropyProvider;
use super::index::AccountIndex;
use super::store::AccountStore;

/// Per-network key operations
pub struct KeyringService<E, C, S> {
    network: NetworkDescriptor,
    entropy: E,
    client: C,
    store: S,
    faucet: Option<Box<dyn FaucetService>>,
}

impl<E, C, S> KeyringService<E, C, S>
where
    E: EntropyProvider,
    C: SigningClient,
    S: AccountStore,
{
    pub fn new(network: Network, entropy: E, client: C, store: S) -> Self {
        Self {
            network: NetworkRegistry::descriptor(network),
            entropy,
            client,
            store,
            faucet: None,
        }
    }

    /// Attach a faucet for [`KeyringService::request_faucet`]
    pub fn with_faucet(mut self, faucet: impl FaucetService + 'static) -> Self {
        self.faucet = Some(Box::new(faucet));
        self
    }

    pub fn network(&self) -> &NetworkDescriptor {
        &self.network
    }

    /// The account the store currently has selected for this network
    pub async fn current_account(&self) -> Result<AccountIndex> {
        Ok(self.store.load(self.network.name).await?.current_index())
    }

    /// Derive the key pair for `index`, or for the selected account
    pub async fn generate_keypair(&self, index: Option<u32>) -> Result<KeyPair> {
        let account = match index {
            Some(index) => AccountIndex::try_from(index)?,
            None => self.current_account().await?,
        };

        let node = self.entropy.bip44_node(self.network.coin_type).await?;
        KeyDerivationEngine::derive(&node, &self.network, account, &self.client)
    }

    /// Public key of the selected account
    pub async fn get_public_key(&self) -> Result<String> {
        let key_pair = self.generate_keypair(None).await?;
        Ok(key_pair.public_key().to_string())
    }

    /// Public nullifier of `message` for the selected account
    ///
    /// Built with the network's curve variant, so testnet networks get
    /// testnet nullifiers rather than mainnet ones.
    pub async fn create_nullifier(&self, message: &[u64]) -> Result<serde_json::Value> {
        let key_pair = self.generate_keypair(None).await?;
        self.client
            .create_nullifier(self.network.curve_variant, message, key_pair.private_key())
    }

    /// Ask the faucet to fund `address` on this network
    pub async fn request_faucet(&self, address: &str) -> Result<FaucetReceipt> {
        let faucet = self
            .faucet
            .as_ref()
            .ok_or_else(|| Error::Faucet("No faucet configured".to_string()))?;

        faucet.request_funds(address, &self.network).await
    }
}
