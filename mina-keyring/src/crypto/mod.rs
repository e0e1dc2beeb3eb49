//! Cryptographic primitives and operations
//!
//! This module provides BIP39 seed handling, hierarchical key derivation and
//! the Mina private key encoding, plus the seam to the signing client that
//! owns curve arithmetic.

pub mod client;
pub mod keys;
pub mod mnemonic;

pub use client::*;
pub use keys::*;
pub use mnemonic::*;
