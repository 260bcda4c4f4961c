//! ECDSA key management for the vault
//!
//! Provides key pair generation, recoverable signing, and signer
//! recovery using the secp256k1 elliptic curve (same as Bitcoin).
//!
//! Signatures are produced in recoverable RSV form (65 bytes:
//! `r || s || v`), so the signer's public key can be derived from the
//! signature and the signed digest alone.

use rand::rngs::OsRng;
use ripemd::Ripemd160;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use sha2::Digest;
use thiserror::Error;

use super::hash::{double_sha256, sha256};

/// Length of a recoverable signature in bytes (r || s || v)
pub const RECOVERABLE_SIGNATURE_LEN: usize = 65;

/// Errors that can occur during key operations
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Invalid private key")]
    InvalidPrivateKey,
    #[error("Invalid public key")]
    InvalidPublicKey,
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Invalid message digest")]
    InvalidDigest,
    #[error("Signature recovery failed")]
    RecoveryFailed,
}

/// A key pair consisting of a private key and its corresponding public key
#[derive(Clone)]
pub struct KeyPair {
    pub secret_key: SecretKey,
    pub public_key: PublicKey,
}

impl KeyPair {
    /// Generate a new random key pair
    pub fn generate() -> Self {
        let secp = Secp256k1::new();
        let (secret_key, public_key) = secp.generate_keypair(&mut OsRng);
        Self {
            secret_key,
            public_key,
        }
    }

    /// Create a key pair from an existing secret key
    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        let secp = Secp256k1::new();
        let public_key = PublicKey::from_secret_key(&secp, &secret_key);
        Self {
            secret_key,
            public_key,
        }
    }

    /// Create a key pair from a hex-encoded private key
    pub fn from_private_key_hex(hex_key: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_key).map_err(|_| KeyError::InvalidPrivateKey)?;
        let secret_key =
            SecretKey::from_slice(&bytes).map_err(|_| KeyError::InvalidPrivateKey)?;
        Ok(Self::from_secret_key(secret_key))
    }

    /// Get the private key as a hex string
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret_key.secret_bytes())
    }

    /// Get the public key as a hex string (compressed format)
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key.serialize())
    }

    /// Get the address derived from the public key
    /// Uses Bitcoin-style address generation: Base58Check(RIPEMD160(SHA256(pubkey)))
    pub fn address(&self) -> String {
        public_key_to_address(&self.public_key)
    }

    /// Sign a 32-byte digest, producing a recoverable RSV signature
    pub fn sign_recoverable(&self, digest: &[u8]) -> Result<Vec<u8>, KeyError> {
        sign_recoverable(&self.secret_key, digest)
    }
}

/// Convert a public key to its canonical address
pub fn public_key_to_address(public_key: &PublicKey) -> String {
    // SHA256 then RIPEMD160 of the compressed public key
    let sha256_hash = sha256(&public_key.serialize());
    let mut ripemd = Ripemd160::new();
    ripemd.update(&sha256_hash);
    let ripemd_hash = ripemd.finalize();

    // Version byte 0x00, then 4-byte double-SHA256 checksum
    let mut address_bytes = vec![0x00];
    address_bytes.extend_from_slice(&ripemd_hash);
    let checksum = double_sha256(&address_bytes);
    address_bytes.extend_from_slice(&checksum[..4]);

    bs58::encode(address_bytes).into_string()
}

/// Sign a 32-byte digest with a secret key, producing a 65-byte
/// recoverable signature (`r || s || v`)
pub fn sign_recoverable(secret_key: &SecretKey, digest: &[u8]) -> Result<Vec<u8>, KeyError> {
    let secp = Secp256k1::new();
    let message = Message::from_digest_slice(digest).map_err(|_| KeyError::InvalidDigest)?;

    let signature = secp.sign_ecdsa_recoverable(&message, secret_key);
    let (recovery_id, compact) = signature.serialize_compact();

    let mut bytes = Vec::with_capacity(RECOVERABLE_SIGNATURE_LEN);
    bytes.extend_from_slice(&compact);
    bytes.push(recovery_id.to_i32() as u8);
    Ok(bytes)
}

/// Recover the signing public key from a digest and a 65-byte
/// recoverable signature
pub fn recover_public_key(digest: &[u8], signature: &[u8]) -> Result<PublicKey, KeyError> {
    if signature.len() != RECOVERABLE_SIGNATURE_LEN {
        return Err(KeyError::InvalidSignature);
    }

    let secp = Secp256k1::new();
    let message = Message::from_digest_slice(digest).map_err(|_| KeyError::InvalidDigest)?;

    let recovery_id =
        RecoveryId::from_i32(signature[64] as i32).map_err(|_| KeyError::InvalidSignature)?;
    let sig = RecoverableSignature::from_compact(&signature[..64], recovery_id)
        .map_err(|_| KeyError::InvalidSignature)?;

    secp.recover_ecdsa(&message, &sig)
        .map_err(|_| KeyError::RecoveryFailed)
}

/// Recover the signer's address from a digest and a recoverable signature
pub fn recover_signer(digest: &[u8], signature: &[u8]) -> Result<String, KeyError> {
    let public_key = recover_public_key(digest, signature)?;
    Ok(public_key_to_address(&public_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_pair_generation() {
        let kp = KeyPair::generate();
        assert!(!kp.private_key_hex().is_empty());
        assert!(!kp.public_key_hex().is_empty());
        assert!(!kp.address().is_empty());
    }

    #[test]
    fn test_key_pair_from_hex() {
        let kp1 = KeyPair::generate();
        let private_hex = kp1.private_key_hex();

        let kp2 = KeyPair::from_private_key_hex(&private_hex).unwrap();
        assert_eq!(kp1.public_key_hex(), kp2.public_key_hex());
        assert_eq!(kp1.address(), kp2.address());
    }

    #[test]
    fn test_address_format() {
        let kp = KeyPair::generate();
        let address = kp.address();
        // Version 0x00 addresses start with '1'
        assert!(address.starts_with('1'));
    }

    #[test]
    fn test_sign_and_recover() {
        let kp = KeyPair::generate();
        let digest = sha256(b"approve transfer 42");

        let signature = kp.sign_recoverable(&digest).unwrap();
        assert_eq!(signature.len(), RECOVERABLE_SIGNATURE_LEN);

        let recovered = recover_signer(&digest, &signature).unwrap();
        assert_eq!(recovered, kp.address());
    }

    #[test]
    fn test_recover_wrong_digest_yields_different_signer() {
        let kp = KeyPair::generate();
        let digest = sha256(b"the signed message");
        let other = sha256(b"a different message");

        let signature = kp.sign_recoverable(&digest).unwrap();

        // Recovery against the wrong digest either fails outright or
        // yields some other key, never the one that signed.
        match recover_signer(&other, &signature) {
            Ok(address) => assert_ne!(address, kp.address()),
            Err(KeyError::RecoveryFailed) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn test_recover_rejects_malformed_signature() {
        let digest = sha256(b"message");

        assert!(matches!(
            recover_signer(&digest, &[0u8; 10]),
            Err(KeyError::InvalidSignature)
        ));

        // Recovery id out of range
        let mut sig = vec![1u8; 65];
        sig[64] = 9;
        assert!(matches!(
            recover_signer(&digest, &sig),
            Err(KeyError::InvalidSignature)
        ));
    }
}
