//! Key derivation and encoding
//!
//! Host key-tree nodes, the per-account derivation engine and the Mina
//! private key text format.

mod derivation;
pub mod encoding;
pub mod node;

pub use derivation::*;
pub use encoding::{decode_private_key, encode_private_key};
pub use node::{Bip32Node, HdNode, BIP44_PURPOSE, HARDENED_OFFSET};
