//! Cryptographic utilities for the vault
//!
//! This module provides:
//! - SHA-256 hashing
//! - ECDSA key management (secp256k1)
//! - Recoverable signatures and signer recovery
//! - Address derivation

pub mod hash;
pub mod keys;

pub use hash::{double_sha256, sha256, sha256_hex};
pub use keys::{
    public_key_to_address, recover_public_key, recover_signer, sign_recoverable, KeyError,
    KeyPair, RECOVERABLE_SIGNATURE_LEN,
};
