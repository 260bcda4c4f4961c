//! Multisig Vault: a threshold multi-signature wallet in Rust
//!
//! This crate provides the authorization engine for a pool of funds
//! jointly controlled by a fixed set of signers:
//! - One-time registration of a signer set and approval threshold
//! - Transfer proposals with monotonically assigned ids
//! - Replay-resistant commitment digests scoped to the vault instance
//! - Recoverable ECDSA signatures (secp256k1): signer identities are
//!   derived from the signature batch itself
//! - Distinct-signer approval counting with threshold-gated,
//!   execute-at-most-once fund movement
//! - JSON persistence with backups
//!
//! # Example
//!
//! ```rust
//! use multisig_vault::crypto::KeyPair;
//! use multisig_vault::ledger::Ledger;
//! use multisig_vault::vault::MultisigVault;
//!
//! let admin = KeyPair::generate().address();
//! let keys: Vec<KeyPair> = (0..3).map(|_| KeyPair::generate()).collect();
//! let signers: Vec<String> = keys.iter().map(|k| k.address()).collect();
//!
//! // 2-of-3 vault
//! let mut vault = MultisigVault::new(admin.clone());
//! vault.initialize(&admin, signers, 2).unwrap();
//!
//! // A signer proposes a transfer
//! let recipient = keys[2].address();
//! let id = vault.submit(&keys[0].address(), 100, recipient, None).unwrap();
//!
//! // Two signers sign the commitment digest off-chain
//! let digest = vault.proposal_digest(id).unwrap();
//! let sig_a = hex::encode(keys[0].sign_recoverable(&digest).unwrap());
//! let sig_b = hex::encode(keys[1].sign_recoverable(&digest).unwrap());
//!
//! // Fund the vault, then anyone may relay the signature batch
//! let mut ledger = Ledger::new();
//! ledger.deposit(vault.address().unwrap(), 100);
//! let record = vault.execute(id, &[sig_a, sig_b], &mut ledger).unwrap();
//! assert_eq!(record.amount, 100);
//! ```

pub mod cli;
pub mod crypto;
pub mod ledger;
pub mod storage;
pub mod vault;

// Re-export commonly used types
pub use crypto::KeyPair;
pub use ledger::{FundLedger, Ledger, TransferEvent};
pub use storage::{Storage, StorageConfig, VaultState};
pub use vault::{ExecutionRecord, MultisigVault, Proposal, SignerPolicy, VaultError};
