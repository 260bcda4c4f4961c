//! Threshold multi-signature vault
//!
//! A fixed set of signers jointly controls the vault's funds; moving
//! any amount requires recoverable signatures from at least
//! `threshold` distinct signers over the proposal's commitment digest.
//!
//! # Example
//!
//! ```ignore
//! use multisig_vault::vault::MultisigVault;
//! use multisig_vault::ledger::Ledger;
//!
//! // Admin registers a 2-of-3 policy
//! let mut vault = MultisigVault::new(admin_address);
//! vault.initialize(&admin_address, vec![alice, bob, charlie], 2)?;
//!
//! // A signer proposes a transfer
//! let id = vault.submit(&alice, 100, recipient, None)?;
//!
//! // Signers sign the commitment digest off-chain
//! let digest = vault.proposal_digest(id)?;
//! let sig_a = hex::encode(alice_keys.sign_recoverable(&digest)?);
//! let sig_b = hex::encode(bob_keys.sign_recoverable(&digest)?);
//!
//! // Anyone relays the batch; funds move once threshold is met
//! vault.execute(id, &[sig_a, sig_b], &mut ledger)?;
//! ```

pub mod engine;
pub mod policy;
pub mod proposal;

pub use engine::{ExecutionRecord, MultisigVault, VaultError};
pub use policy::SignerPolicy;
pub use proposal::{Proposal, ProposalLedger};
