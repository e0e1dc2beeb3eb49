//! Account management functionality
//!
//! Account indices and records, the account store seam, entropy providers
//! and the keyring service that ties them to key derivation.

mod entropy;
mod index;
mod service;
mod store;

pub use entropy::*;
pub use index::*;
pub use service::*;
pub use store::*;
