//! Network registry
//!
//! Static mapping from a Mina network to the signing-client configuration
//! it needs and to the alias the faucet service knows it by. Every
//! network of the protocol family shares one BIP44 coin type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mina's registered SLIP-0044 coin type
pub const MINA_COIN_TYPE: u32 = 12586;

/// Supported Mina networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Berkeley,
    Devnet,
    Testworld,
}

impl Network {
    /// Every registered network, in declaration order
    pub const ALL: [Network; 4] = [
        Network::Mainnet,
        Network::Berkeley,
        Network::Devnet,
        Network::Testworld,
    ];

    /// Lowercase identifier used on the wire and in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Berkeley => "berkeley",
            Self::Devnet => "devnet",
            Self::Testworld => "testworld",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mainnet" => Ok(Self::Mainnet),
            "berkeley" => Ok(Self::Berkeley),
            "devnet" => Ok(Self::Devnet),
            "testworld" => Ok(Self::Testworld),
            other => Err(Error::UnknownNetwork(other.to_string())),
        }
    }
}

/// Signing parameters the downstream curve client is configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveVariant {
    Mainnet,
    Testnet,
}

impl CurveVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for CurveVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of one supported network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkDescriptor {
    /// The network this descriptor belongs to
    pub name: Network,
    /// BIP44 coin type, identical across the protocol family
    pub coin_type: u32,
    /// Which signing-client configuration keys for this network need
    pub curve_variant: CurveVariant,
    /// Name the faucet service uses for this network, if it has a faucet
    pub faucet_alias: Option<&'static str>,
}

/// Pure lookup over the fixed network table
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkRegistry;

impl NetworkRegistry {
    /// Resolve a network identifier to its descriptor
    ///
    /// Unknown identifiers are a hard error. There is no default network to
    /// fall back to: a key derived for the wrong curve variant is unusable on
    /// the intended chain.
    pub fn resolve(name: &str) -> Result<NetworkDescriptor> {
        let network = name.parse::<Network>().map_err(|e| {
            tracing::warn!(network = name, "rejected unknown network");
            e
        })?;
        Ok(Self::descriptor(network))
    }

    /// Descriptor for an already-typed network. Total over [`Network`].
    pub fn descriptor(network: Network) -> NetworkDescriptor {
        let (curve_variant, faucet_alias) = match network {
            Network::Mainnet => (CurveVariant::Mainnet, None),
            Network::Berkeley => (CurveVariant::Testnet, Some("berkeley-qanet")),
            Network::Devnet => (CurveVariant::Testnet, Some("devnet")),
            Network::Testworld => (CurveVariant::Testnet, Some("itn-qanet")),
        };

        NetworkDescriptor {
            name: network,
            coin_type: MINA_COIN_TYPE,
            curve_variant,
            faucet_alias,
        }
    }

    /// All registered descriptors
    pub fn all() -> Vec<NetworkDescriptor> {
        Network::ALL.iter().copied().map(Self::descriptor).collect()
    }
}
