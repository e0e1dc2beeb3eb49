//! Mina private key text encoding
//!
//! A Mina private key is the Base58Check encoding of a 34-byte payload:
//! the version tag `0x5a 0x01` followed by the 32-byte scalar in
//! little-endian order with its two most significant bits cleared.

use crate::error::{Error, Result};

/// Version tag of the private key payload
pub const PRIVATE_KEY_VERSION: [u8; 2] = [0x5a, 0x01];

/// Length of the versioned payload before the checksum
pub const PAYLOAD_LEN: usize = 34;

/// Clear the top two bits of the leading byte
///
/// Forces the big-endian scalar below 2^254, inside the Pallas scalar field.
/// The discarded bits are not recoverable.
pub fn mask_scalar(bytes: &[u8; 32]) -> [u8; 32] {
    let mut masked = *bytes;
    masked[0] &= 0x3f;
    masked
}

/// Reverse byte order end to end
pub fn reverse_bytes(bytes: &[u8; 32]) -> [u8; 32] {
    let mut reversed = *bytes;
    reversed.reverse();
    reversed
}

/// Prefix the little-endian scalar with the private key version tag
pub fn versioned_payload(scalar_le: &[u8; 32]) -> [u8; PAYLOAD_LEN] {
    let mut payload = [0u8; PAYLOAD_LEN];
    payload[..2].copy_from_slice(&PRIVATE_KEY_VERSION);
    payload[2..].copy_from_slice(scalar_le);
    payload
}

/// Encode raw child-key bytes as a Mina private key string
pub fn encode_private_key(raw: &[u8; 32]) -> String {
    let payload = versioned_payload(&reverse_bytes(&mask_scalar(raw)));
    bs58::encode(payload).with_check().into_string()
}

/// Decode a Mina private key string into its full versioned payload
///
/// Verifies the checksum, the payload length and the version tag.
pub fn decode_payload(encoded: &str) -> Result<[u8; PAYLOAD_LEN]> {
    let decoded = bs58::decode(encoded)
        .with_check(None)
        .into_vec()
        .map_err(|e| Error::Encoding(format!("Invalid Base58Check string: {}", e)))?;

    let payload: [u8; PAYLOAD_LEN] = decoded.try_into().map_err(|decoded: Vec<u8>| {
        Error::Encoding(format!("Invalid private key payload length: {}", decoded.len()))
    })?;

    if payload[..2] != PRIVATE_KEY_VERSION {
        return Err(Error::Encoding(format!(
            "Invalid private key version: {}",
            hex::encode(&payload[..2])
        )));
    }

    Ok(payload)
}

/// Decode a Mina private key string into its 32 little-endian scalar bytes
pub fn decode_private_key(encoded: &str) -> Result<[u8; 32]> {
    let payload = decode_payload(encoded)?;
    let mut scalar = [0u8; 32];
    scalar.copy_from_slice(&payload[2..]);
    Ok(scalar)
}
