//! Account records and the account store seam
//!
//! The keyring only reads the current selection from the store; the host
//! owns writes. Invariants (unique indices, a current index that names an
//! existing generated account, at most one selected imported account that
//! actually exists) are enforced by [`NetworkAccounts`].

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::network::Network;
use super::index::AccountIndex;

/// An account derived from the host seed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub index: AccountIndex,
    pub name: String,
    pub address: String,
}

/// An account imported from an external private key
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedAccount {
    pub index: AccountIndex,
    pub name: String,
    pub address: String,
    pub private_key: String,
}

impl std::fmt::Debug for ImportedAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportedAccount")
            .field("index", &self.index)
            .field("name", &self.name)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Generated and imported accounts of one network
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkAccounts {
    #[serde(default)]
    generated: BTreeMap<AccountIndex, AccountRecord>,
    #[serde(default)]
    imported: BTreeMap<AccountIndex, ImportedAccount>,
    #[serde(default)]
    current_index: AccountIndex,
    #[serde(default)]
    selected_imported: Option<AccountIndex>,
}

impl NetworkAccounts {
    /// Index of the generated account in use
    pub fn current_index(&self) -> AccountIndex {
        self.current_index
    }

    /// The imported account in use, if one is selected
    pub fn selected_imported(&self) -> Option<&ImportedAccount> {
        self.selected_imported.and_then(|index| self.imported.get(&index))
    }

    pub fn generated(&self) -> impl Iterator<Item = &AccountRecord> {
        self.generated.values()
    }

    pub fn imported(&self) -> impl Iterator<Item = &ImportedAccount> {
        self.imported.values()
    }

    /// First index after the highest generated account
    pub fn next_generated_index(&self) -> Result<AccountIndex> {
        match self.generated.keys().next_back() {
            None => Ok(AccountIndex::default()),
            Some(last) => last
                .next()
                .ok_or_else(|| Error::Storage("No account indices left".to_string())),
        }
    }

    pub fn add_generated(&mut self, record: AccountRecord) -> Result<()> {
        if self.generated.contains_key(&record.index) {
            return Err(Error::Storage(format!(
                "Generated account {} already exists",
                record.index
            )));
        }
        self.generated.insert(record.index, record);
        Ok(())
    }

    pub fn add_imported(&mut self, account: ImportedAccount) -> Result<()> {
        if self.imported.contains_key(&account.index) {
            return Err(Error::Storage(format!(
                "Imported account {} already exists",
                account.index
            )));
        }
        self.imported.insert(account.index, account);
        Ok(())
    }

    /// Remove an imported account, dropping the selection if it pointed there
    pub fn remove_imported(&mut self, index: AccountIndex) -> Option<ImportedAccount> {
        if self.selected_imported == Some(index) {
            self.selected_imported = None;
        }
        self.imported.remove(&index)
    }

    /// Switch to a generated account and clear any imported selection
    pub fn select_generated(&mut self, index: AccountIndex) -> Result<()> {
        if !self.generated.contains_key(&index) {
            return Err(Error::Storage(format!("No generated account {}", index)));
        }
        self.current_index = index;
        self.selected_imported = None;
        Ok(())
    }

    pub fn select_imported(&mut self, index: AccountIndex) -> Result<()> {
        if !self.imported.contains_key(&index) {
            return Err(Error::Storage(format!("No imported account {}", index)));
        }
        self.selected_imported = Some(index);
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Storage(e.to_string()))
    }

    /// Parse a snapshot and check it still holds the invariants
    pub fn from_json(json: &str) -> Result<Self> {
        let accounts: Self = serde_json::from_str(json).map_err(|e| Error::Storage(e.to_string()))?;
        accounts.validate()?;
        Ok(accounts)
    }

    fn validate(&self) -> Result<()> {
        if let Some((key, record)) = self.generated.iter().find(|(key, record)| **key != record.index) {
            return Err(Error::Storage(format!(
                "Generated account keyed {} claims index {}",
                key, record.index
            )));
        }
        if let Some((key, account)) = self.imported.iter().find(|(key, account)| **key != account.index) {
            return Err(Error::Storage(format!(
                "Imported account keyed {} claims index {}",
                key, account.index
            )));
        }
        // An empty store keeps the default index 0
        if !self.generated.is_empty() && !self.generated.contains_key(&self.current_index) {
            return Err(Error::Storage(format!(
                "Current account {} does not exist",
                self.current_index
            )));
        }
        if let Some(selected) = self.selected_imported {
            if !self.imported.contains_key(&selected) {
                return Err(Error::Storage(format!(
                    "Selected imported account {} does not exist",
                    selected
                )));
            }
        }
        Ok(())
    }
}

/// Persisted per-network account lists
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Accounts of `network`; an untouched network yields the empty default
    async fn load(&self, network: Network) -> Result<NetworkAccounts>;

    async fn save(&self, network: Network, accounts: NetworkAccounts) -> Result<()>;
}

/// Account store kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    networks: RwLock<HashMap<Network, NetworkAccounts>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn load(&self, network: Network) -> Result<NetworkAccounts> {
        let networks = self.networks.read().await;
        Ok(networks.get(&network).cloned().unwrap_or_default())
    }

    async fn save(&self, network: Network, accounts: NetworkAccounts) -> Result<()> {
        accounts.validate()?;
        self.networks.write().await.insert(network, accounts);
        Ok(())
    }
}
